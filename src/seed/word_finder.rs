//! Word finder drivers
//!
//! Pull word hits from a scanner one batch at a time, run each hit through
//! the diagonal table's admission test, extend the admitted ones and keep
//! extensions that reach the cutoff score.
//!
//! Extensions never leave the query context holding the hit. Query
//! coordinates of recorded hits are offsets into the concatenated query.

use tracing::trace;

use crate::core::blast_diagnostics::ScanStatistics;
use crate::core::blast_encoding::{Residues, Sequence, SequenceView};
use crate::core::blast_extend::{DiagonalTable, TwoHitAdmission};
use crate::core::blast_hits::{HitSink, InitialHit};
use crate::core::constants::{
    BLAST_UNGAPPED_X_DROPOFF_NUCL, BLAST_UNGAPPED_X_DROPOFF_PROT, BLAST_WINDOW_SIZE_PROT,
    BLAST_WORDSIZE_NUCL, BLAST_WORDSIZE_PROT,
};
use crate::core::error::{Result, SeedError};
use crate::core::extension::{extend_one_hit, extend_two_hit};
use crate::core::query_info::QueryInfo;
use crate::core::scan::{OffsetPair, ScanRange, Scanner};
use crate::utils::matrix::Scoring;

/// Parameters of one word finding pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordFinderConfig {
    /// Word length of a hit (and of the scanner)
    pub word_size: i32,
    /// X-drop for ungapped extension, in raw score units
    pub x_dropoff: i32,
    /// Minimum score for an extension to be recorded
    pub cutoff_score: i32,
    /// Largest allowed distance between the two hits of a pair
    pub window_size: i32,
    /// Require two hits on a diagonal before extending
    pub two_hit: bool,
}

impl Default for WordFinderConfig {
    fn default() -> Self {
        Self::protein_two_hit()
    }
}

impl WordFinderConfig {
    /// Protein search with the two-hit heuristic
    pub fn protein_two_hit() -> Self {
        Self {
            word_size: BLAST_WORDSIZE_PROT,
            x_dropoff: BLAST_UNGAPPED_X_DROPOFF_PROT,
            cutoff_score: 0,
            window_size: BLAST_WINDOW_SIZE_PROT,
            two_hit: true,
        }
    }

    /// Protein search extending every word hit
    pub fn protein_one_hit() -> Self {
        Self {
            window_size: 0,
            two_hit: false,
            ..Self::protein_two_hit()
        }
    }

    /// One-hit nucleotide search
    pub fn nucleotide() -> Self {
        Self {
            word_size: BLAST_WORDSIZE_NUCL,
            x_dropoff: BLAST_UNGAPPED_X_DROPOFF_NUCL,
            cutoff_score: 0,
            window_size: 0,
            two_hit: false,
        }
    }

    pub fn with_word_size(mut self, word_size: i32) -> Self {
        self.word_size = word_size;
        self
    }

    pub fn with_x_dropoff(mut self, x_dropoff: i32) -> Self {
        self.x_dropoff = x_dropoff;
        self
    }

    pub fn with_cutoff_score(mut self, cutoff_score: i32) -> Self {
        self.cutoff_score = cutoff_score;
        self
    }

    /// Switch to two-hit mode with the given window
    pub fn with_two_hit_window(mut self, window_size: i32) -> Self {
        self.window_size = window_size;
        self.two_hit = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.word_size <= 0 {
            return Err(SeedError::InvalidWordSize {
                word_size: self.word_size,
            });
        }
        if self.x_dropoff <= 0 {
            return Err(SeedError::InvalidDropoff {
                dropoff: self.x_dropoff,
            });
        }
        if self.window_size < 0 || (self.two_hit && self.window_size <= 0) {
            return Err(SeedError::InvalidWindow {
                window: self.window_size,
            });
        }
        Ok(())
    }

    /// Amount the diagonal table advances after a subject of `subject_len`
    #[inline]
    pub fn table_advance(&self, subject_len: usize) -> i32 {
        let len = subject_len.min(i32::MAX as usize) as i32;
        if self.two_hit {
            len.saturating_add(self.window_size)
        } else {
            len
        }
    }
}

/// Scores query positions of one context with their offset in the
/// concatenated query, so PSSM rows line up.
struct ContextScoring<'a, M: ?Sized> {
    matrix: &'a M,
    query_offset: usize,
}

impl<M: Scoring + ?Sized> Scoring for ContextScoring<'_, M> {
    #[inline(always)]
    fn score(&self, query_pos: usize, query_residue: u8, subject_residue: u8) -> i32 {
        self.matrix
            .score(query_pos + self.query_offset, query_residue, subject_residue)
    }
}

/// Everything a driver reads but never changes
struct PassInputs<'a, Sc: ?Sized, M: ?Sized> {
    scanner: &'a Sc,
    matrix: &'a M,
    query: &'a [u8],
    query_info: &'a QueryInfo,
    subject: &'a Sequence,
    config: &'a WordFinderConfig,
}

impl<Sc: Scanner + ?Sized, M: Scoring + ?Sized> PassInputs<'_, Sc, M> {
    /// Query slice and scoring for the context containing `q_off`, plus the
    /// context start
    #[inline]
    fn context(&self, q_off: u32) -> (&[u8], ContextScoring<'_, M>, u32) {
        let ctx = self.query_info.contexts()[self.query_info.context_of(q_off)];
        let start = ctx.query_offset as usize;
        let end = (ctx.end() as usize).min(self.query.len());
        (
            &self.query[start..end],
            ContextScoring {
                matrix: self.matrix,
                query_offset: start,
            },
            ctx.query_offset,
        )
    }
}

fn check_inputs<Sc: Scanner + ?Sized>(
    table: &DiagonalTable,
    scanner: &Sc,
    query: &[u8],
    query_info: &QueryInfo,
    subject: &Sequence,
    config: &WordFinderConfig,
    two_hit: bool,
) -> Result<()> {
    config.validate()?;
    if config.two_hit != two_hit || table.multiple_hits() != two_hit {
        return Err(SeedError::ModeMismatch {
            table: table.multiple_hits(),
            config: config.two_hit,
        });
    }
    if scanner.word_length() != config.word_size as usize {
        return Err(SeedError::InvalidWordSize {
            word_size: config.word_size,
        });
    }
    let mode = scanner.mode();
    if subject.encoding() != mode.subject_encoding() {
        return Err(SeedError::EncodingMismatch {
            mode,
            encoding: subject.encoding(),
        });
    }
    if query_info.total_length() > query.len() {
        return Err(SeedError::InvalidQueryLength {
            query_length: query_info.total_length() as i32,
        });
    }
    Ok(())
}

/// Run the scanner over the whole subject, handing every batch to
/// `on_batch`. Returns the number of word hits scanned.
fn scan_subject<Sc, F>(scanner: &Sc, subject: &Sequence, mut on_batch: F) -> u64
where
    Sc: Scanner + ?Sized,
    F: FnMut(&[OffsetPair]),
{
    let Some(mut range) = ScanRange::for_subject(subject.len(), scanner.word_length()) else {
        return 0;
    };
    let mut scanned = 0u64;
    let mut offset_pairs = vec![OffsetPair::default(); scanner.offset_array_size()];

    while !range.is_done() {
        let prev_first = range.first;
        let hits = scanner.scan(subject, &mut offset_pairs, &mut range);
        if hits == 0 && range.first == prev_first {
            // Scanner made no progress; a batch this size always fits one
            // position, so this only happens with a misbehaving scanner.
            break;
        }
        scanned += hits as u64;
        on_batch(&offset_pairs[..hits]);
    }
    scanned
}

/// One-hit word finder for a single subject.
///
/// Every word hit that is not inside the last extension on its diagonal is
/// extended. Returns the counters for this subject; the table is advanced by
/// the subject length before returning.
#[allow(clippy::too_many_arguments)]
pub fn word_finder_one_hit<Sc, M, H>(
    table: &mut DiagonalTable,
    scanner: &Sc,
    matrix: &M,
    query: &[u8],
    query_info: &QueryInfo,
    subject: &Sequence,
    config: &WordFinderConfig,
    hits: &mut H,
) -> Result<ScanStatistics>
where
    Sc: Scanner + ?Sized,
    M: Scoring + ?Sized,
    H: HitSink + ?Sized,
{
    check_inputs(table, scanner, query, query_info, subject, config, false)?;

    let inputs = PassInputs {
        scanner,
        matrix,
        query,
        query_info,
        subject,
        config,
    };
    let stats = match subject.view() {
        SequenceView::Residue(r) => one_hit_pass(table, &inputs, r, hits),
        SequenceView::Packed(p) => one_hit_pass(table, &inputs, &p, hits),
    };

    table.update(config.table_advance(subject.len()));
    Ok(stats)
}

fn one_hit_pass<Sc, M, S, H>(
    table: &mut DiagonalTable,
    inputs: &PassInputs<'_, Sc, M>,
    residues: &S,
    hits: &mut H,
) -> ScanStatistics
where
    Sc: Scanner + ?Sized,
    M: Scoring + ?Sized,
    S: Residues + ?Sized,
    H: HitSink + ?Sized,
{
    let config = inputs.config;
    let word_size = config.word_size;
    let mut counts = ScanStatistics::default();

    let scanned = scan_subject(inputs.scanner, inputs.subject, |batch| {
        for pair in batch {
            let diag = table.index_of(pair.q_off, pair.s_off);
            if !table.one_hit_admit(diag, pair.s_off) {
                counts.seeds_masked += 1;
                continue;
            }

            let (query, scoring, ctx_start) = inputs.context(pair.q_off);
            let ext = extend_one_hit(
                &scoring,
                query,
                residues,
                pair.s_off as usize,
                (pair.q_off - ctx_start) as usize,
                config.x_dropoff,
                word_size as usize,
            );
            counts.hits_extended += 1;
            table.one_hit_record(diag, pair.s_off, ext.s_last_off as i32, word_size);

            trace!(
                q_off = pair.q_off,
                s_off = pair.s_off,
                score = ext.score,
                length = ext.length,
                "one-hit extension"
            );

            if ext.score >= config.cutoff_score {
                let mut hit = InitialHit::from_extension(&ext, pair.q_off, pair.s_off);
                hit.query_start += ctx_start;
                hits.push(hit);
                counts.hits_saved += 1;
            }
        }
    });

    counts.hits_scanned = scanned;
    counts
}

/// Two-hit word finder for a single subject.
///
/// A hit is extended only when an earlier hit on the same diagonal lies
/// between `word_size` and `window_size - 1` residues before it, and both
/// lie in the same query context. The table is advanced by the subject
/// length plus the window before returning.
#[allow(clippy::too_many_arguments)]
pub fn word_finder_two_hit<Sc, M, H>(
    table: &mut DiagonalTable,
    scanner: &Sc,
    matrix: &M,
    query: &[u8],
    query_info: &QueryInfo,
    subject: &Sequence,
    config: &WordFinderConfig,
    hits: &mut H,
) -> Result<ScanStatistics>
where
    Sc: Scanner + ?Sized,
    M: Scoring + ?Sized,
    H: HitSink + ?Sized,
{
    check_inputs(table, scanner, query, query_info, subject, config, true)?;
    if table.window() != config.window_size {
        return Err(SeedError::InvalidWindow {
            window: config.window_size,
        });
    }

    let inputs = PassInputs {
        scanner,
        matrix,
        query,
        query_info,
        subject,
        config,
    };
    let stats = match subject.view() {
        SequenceView::Residue(r) => two_hit_pass(table, &inputs, r, hits),
        SequenceView::Packed(p) => two_hit_pass(table, &inputs, &p, hits),
    };

    table.update(config.table_advance(subject.len()));
    Ok(stats)
}

fn two_hit_pass<Sc, M, S, H>(
    table: &mut DiagonalTable,
    inputs: &PassInputs<'_, Sc, M>,
    residues: &S,
    hits: &mut H,
) -> ScanStatistics
where
    Sc: Scanner + ?Sized,
    M: Scoring + ?Sized,
    S: Residues + ?Sized,
    H: HitSink + ?Sized,
{
    let config = inputs.config;
    let word_size = config.word_size;
    let mut counts = ScanStatistics::default();

    let scanned = scan_subject(inputs.scanner, inputs.subject, |batch| {
        for pair in batch {
            let diag = table.index_of(pair.q_off, pair.s_off);

            let (last_hit, diff) = match table.two_hit_classify(diag, pair.s_off, word_size) {
                TwoHitAdmission::Masked => {
                    counts.seeds_masked += 1;
                    continue;
                }
                TwoHitAdmission::FlagReset => continue,
                TwoHitAdmission::TooFar => {
                    counts.seeds_too_far += 1;
                    continue;
                }
                TwoHitAdmission::Overlap => {
                    counts.seeds_overlap += 1;
                    continue;
                }
                TwoHitAdmission::Second { last_hit, diff } => (last_hit, diff),
            };

            let (query, scoring, ctx_start) = inputs.context(pair.q_off);
            // Pair spans two contexts: start over from this hit
            let same_context = pair
                .q_off
                .checked_sub(diff as u32)
                .is_some_and(|q_first| {
                    inputs
                        .query_info
                        .within_one_context(q_first, (diff + word_size) as u32)
                });
            if !same_context {
                counts.seeds_context_boundary += 1;
                table.two_hit_set_first(diag, pair.s_off);
                continue;
            }

            let result = extend_two_hit(
                &scoring,
                query,
                residues,
                (last_hit + word_size).max(0) as usize,
                pair.s_off as usize,
                (pair.q_off - ctx_start) as usize,
                config.x_dropoff,
                word_size as usize,
            );
            let ext = result.extension;
            counts.hits_extended += 1;
            if result.right_extended {
                counts.right_extensions += 1;
            }
            table.two_hit_record(
                diag,
                pair.s_off,
                result.right_extended,
                ext.s_last_off as i32,
                word_size,
            );

            trace!(
                q_off = pair.q_off,
                s_off = pair.s_off,
                first_hit = last_hit,
                score = ext.score,
                length = ext.length,
                right_extended = result.right_extended,
                "two-hit extension"
            );

            if ext.score >= config.cutoff_score {
                let mut hit = InitialHit::from_extension(&ext, pair.q_off, pair.s_off);
                hit.query_start += ctx_start;
                hits.push(hit);
                counts.hits_saved += 1;
            }
        }
    });

    counts.hits_scanned = scanned;
    counts
}

/// Run the one-hit or two-hit driver, as selected by the table's mode.
#[allow(clippy::too_many_arguments)]
pub fn word_finder<Sc, M, H>(
    table: &mut DiagonalTable,
    scanner: &Sc,
    matrix: &M,
    query: &[u8],
    query_info: &QueryInfo,
    subject: &Sequence,
    config: &WordFinderConfig,
    hits: &mut H,
) -> Result<ScanStatistics>
where
    Sc: Scanner + ?Sized,
    M: Scoring + ?Sized,
    H: HitSink + ?Sized,
{
    if table.multiple_hits() {
        word_finder_two_hit(table, scanner, matrix, query, query_info, subject, config, hits)
    } else {
        word_finder_one_hit(table, scanner, matrix, query, query_info, subject, config, hits)
    }
}

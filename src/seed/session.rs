//! Per-query search session
//!
//! Bundles one query's diagonal table with its scanner, scoring and
//! configuration, and runs the word finder over a stream of subjects.
//! A session is single-threaded; a parallel caller gives every worker its
//! own session (and therefore its own table).

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::blast_diagnostics::{diagnostics_enabled, ScanStatistics};
use crate::core::blast_encoding::Sequence;
use crate::core::blast_extend::DiagonalTable;
use crate::core::blast_hits::{HitSink, InitHitList};
use crate::core::error::SeedError;
use crate::core::query_info::QueryInfo;
use crate::core::scan::Scanner;
use crate::seed::word_finder::{word_finder, WordFinderConfig};
use crate::utils::matrix::ScoringMatrix;

pub struct UngappedSearch<'a, Sc: ?Sized> {
    table: DiagonalTable,
    scanner: &'a Sc,
    matrix: &'a ScoringMatrix,
    query: &'a [u8],
    query_info: QueryInfo,
    config: WordFinderConfig,
    statistics: ScanStatistics,
    subjects_searched: usize,
    diagnostics: bool,
}

impl<'a, Sc: Scanner + ?Sized> UngappedSearch<'a, Sc> {
    /// Start a search for `query` laid out as `query_info`, with a new
    /// diagonal table.
    pub fn new(
        scanner: &'a Sc,
        matrix: &'a ScoringMatrix,
        query: &'a [u8],
        query_info: QueryInfo,
        config: WordFinderConfig,
    ) -> Result<Self> {
        let query_length = check_setup(scanner, matrix, query, &query_info, &config)?;
        let table = DiagonalTable::new(query_length, config.two_hit, config.window_size)
            .with_context(|| format!("failed to create diagonal table for query of length {}", query_length))?;

        Ok(Self::assemble(table, scanner, matrix, query, query_info, config))
    }

    /// Start a search reusing a table from an earlier query.
    ///
    /// The table must have been cleared since its last subject, be large
    /// enough for this query and match the configured mode and window.
    pub fn with_table(
        mut table: DiagonalTable,
        scanner: &'a Sc,
        matrix: &'a ScoringMatrix,
        query: &'a [u8],
        query_info: QueryInfo,
        config: WordFinderConfig,
    ) -> Result<Self> {
        let query_length = check_setup(scanner, matrix, query, &query_info, &config)?;
        table
            .check_reusable(query_length, config.two_hit, config.window_size)
            .context("diagonal table cannot be reused for this query")?;
        table.assign_query(query_length);

        Ok(Self::assemble(table, scanner, matrix, query, query_info, config))
    }

    fn assemble(
        table: DiagonalTable,
        scanner: &'a Sc,
        matrix: &'a ScoringMatrix,
        query: &'a [u8],
        query_info: QueryInfo,
        config: WordFinderConfig,
    ) -> Self {
        Self {
            table,
            scanner,
            matrix,
            query,
            query_info,
            config,
            statistics: ScanStatistics::default(),
            subjects_searched: 0,
            diagnostics: diagnostics_enabled(),
        }
    }

    /// Search one subject, pushing qualifying hits into `hits`.
    ///
    /// Hits are not sorted here; sort once the whole pass is done.
    pub fn search_subject<H: HitSink + ?Sized>(&mut self, subject: &Sequence, hits: &mut H) -> Result<ScanStatistics> {
        let stats = word_finder(
            &mut self.table,
            self.scanner,
            self.matrix,
            self.query,
            &self.query_info,
            subject,
            &self.config,
            hits,
        )
        .with_context(|| format!("word finder failed on subject #{}", self.subjects_searched))?;

        self.statistics += stats;
        self.subjects_searched += 1;
        debug!(
            subject = self.subjects_searched - 1,
            length = subject.len(),
            extended = stats.hits_extended,
            saved = stats.hits_saved,
            "subject searched"
        );
        if self.diagnostics {
            stats.log_summary("subject");
        }
        Ok(stats)
    }

    /// Search a batch of subjects into a fresh hit list, sorted by score.
    pub fn search_subjects<'s, I>(&mut self, subjects: I) -> Result<(InitHitList, ScanStatistics)>
    where
        I: IntoIterator<Item = &'s Sequence>,
    {
        let mut hits = InitHitList::new();
        let mut batch = ScanStatistics::default();
        for subject in subjects {
            batch += self.search_subject(subject, &mut hits)?;
        }
        hits.sort_by_score_descending();

        if self.diagnostics {
            batch.log_summary("batch");
        }
        Ok((hits, batch))
    }

    /// Totals over every subject searched so far
    pub fn statistics(&self) -> ScanStatistics {
        self.statistics
    }

    pub fn subjects_searched(&self) -> usize {
        self.subjects_searched
    }

    pub fn config(&self) -> &WordFinderConfig {
        &self.config
    }

    pub fn table(&self) -> &DiagonalTable {
        &self.table
    }

    /// End the session and hand the table back for another query. Call
    /// `DiagonalTable::clear` before reusing it.
    pub fn into_table(self) -> DiagonalTable {
        self.table
    }
}

/// Validate everything a session depends on; returns the query length.
fn check_setup<Sc: Scanner + ?Sized>(
    scanner: &Sc,
    matrix: &ScoringMatrix,
    query: &[u8],
    query_info: &QueryInfo,
    config: &WordFinderConfig,
) -> Result<i32> {
    config.validate().context("invalid word finder configuration")?;

    let mode = scanner.mode();
    if mode.requires_pssm() && !matrix.is_pssm() {
        return Err(SeedError::ScoringMismatch { mode }.into());
    }

    let total = query_info.total_length();
    let query_length = i32::try_from(total)
        .ok()
        .filter(|_| total <= query.len())
        .ok_or(SeedError::InvalidQueryLength {
            query_length: total.min(i32::MAX as usize) as i32,
        })?;

    if let ScoringMatrix::Pssm(pssm) = matrix {
        if pssm.rows() < total {
            return Err(SeedError::PssmTooShort {
                rows: pssm.rows(),
                query_length: total,
            }
            .into());
        }
    }

    Ok(query_length)
}

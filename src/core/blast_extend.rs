//! Diagonal table for word-hit tracking
//!
//! Every (query_offset, subject_offset) word hit lies on a diagonal. The table
//! keeps, per diagonal, where the last hit (or the end of the last
//! extension) was, so the word finders can skip hits inside already-extended
//! regions and pair up hits for the two-hit heuristic.
//!
//! Stored positions are `subject_offset + offset`, where `offset` is a rolling
//! base advanced after each subject. Advancing the base makes every old entry
//! look far away without touching the array; the array is only rewritten
//! when the base approaches overflow.

use tracing::debug;

use super::constants::DIAG_OFFSET_LIMIT;
use super::error::{Result, SeedError};

/// Per-diagonal state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiagStruct {
    /// Last hit position on this diagonal, with the table offset added
    pub last_hit: i32,
    /// An extension just finished here; the next hit starts a fresh pair
    /// (two-hit mode only)
    pub flag: bool,
}

impl DiagStruct {
    /// State of a diagonal after `DiagonalTable::clear`
    #[inline]
    pub fn cleared(window: i32) -> Self {
        Self {
            last_hit: -window,
            flag: false,
        }
    }
}

/// Outcome of presenting a word hit to a two-hit diagonal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TwoHitAdmission {
    /// Inside the region covered by the last extension
    Masked,
    /// First hit after an extension; the flag was cleared and the hit stored
    FlagReset,
    /// Too far from the previous hit; stored as the new first hit
    TooFar,
    /// Overlaps the previous hit; nothing stored
    Overlap,
    /// Second hit of a pair. `last_hit` is the first hit in subject
    /// coordinates, `diff` the distance between the two.
    Second { last_hit: i32, diff: i32 },
}

/// Hashed circular array of `DiagStruct`, one slot per diagonal modulo a
/// power of two.
///
/// One table serves one query against a stream of subjects. It is not
/// shared between threads; a parallel caller gives each worker its own.
#[derive(Debug, Clone)]
pub struct DiagonalTable {
    array: Vec<DiagStruct>,
    diag_mask: u32,
    offset: i32,
    window: i32,
    multiple_hits: bool,
    query_length: i32,
    /// No hit has been recorded since creation or the last `clear`
    clean: bool,
}

impl DiagonalTable {
    /// Create a table for a query of `query_length` residues.
    ///
    /// The array length is the smallest power of two `>= query_length +
    /// window`. Entries start zeroed; with `offset = window` a zeroed entry
    /// already reads as "more than `window` away" from every subject offset.
    pub fn new(query_length: i32, multiple_hits: bool, window: i32) -> Result<Self> {
        if query_length < 0 {
            return Err(SeedError::InvalidQueryLength { query_length });
        }
        if window < 0 || (multiple_hits && window == 0) {
            return Err(SeedError::InvalidWindow { window });
        }

        let too_large = SeedError::DiagonalTableTooLarge {
            query_length,
            window,
        };
        let needed = query_length.checked_add(window).ok_or(too_large.clone())?;
        let diag_array_length = (needed as u32)
            .checked_next_power_of_two()
            .filter(|&n| n <= i32::MAX as u32)
            .ok_or(too_large)? as usize;

        let mut array = Vec::new();
        array
            .try_reserve_exact(diag_array_length)
            .map_err(|_| SeedError::AllocationFailed {
                entries: diag_array_length,
            })?;
        array.resize(diag_array_length, DiagStruct::default());

        Ok(Self {
            array,
            diag_mask: (diag_array_length - 1) as u32,
            offset: window,
            window,
            multiple_hits,
            query_length,
            clean: true,
        })
    }

    /// Reset the rolling offset and every diagonal to `last_hit = -window`.
    pub fn clear(&mut self) {
        debug!(
            entries = self.array.len(),
            offset = self.offset,
            window = self.window,
            "clearing diagonal table"
        );
        self.offset = self.window;
        self.array.fill(DiagStruct::cleared(self.window));
        self.clean = true;
    }

    /// Advance past a finished subject.
    ///
    /// Once the offset reaches `i32::MAX / 4` the table is cleared instead,
    /// so `subject_offset + offset` never overflows.
    pub fn update(&mut self, length: i32) {
        if self.offset >= DIAG_OFFSET_LIMIT {
            self.clear();
        } else {
            self.offset = self.offset.saturating_add(length);
            self.clean = false;
        }
    }

    /// Diagonal slot for a hit.
    ///
    /// Two-hit tables key on `query - subject`, one-hit tables on
    /// `subject - query`. The result is always `< len()`.
    #[inline(always)]
    pub fn index_of(&self, query_offset: u32, subject_offset: u32) -> usize {
        let diag = if self.multiple_hits {
            query_offset.wrapping_sub(subject_offset)
        } else {
            subject_offset.wrapping_sub(query_offset)
        };
        (diag & self.diag_mask) as usize
    }

    /// Number of diagonal slots (a power of two)
    #[inline]
    pub fn len(&self) -> usize {
        self.array.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    #[inline]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    #[inline]
    pub fn window(&self) -> i32 {
        self.window
    }

    #[inline]
    pub fn multiple_hits(&self) -> bool {
        self.multiple_hits
    }

    /// Query length the table was sized for
    #[inline]
    pub fn query_length(&self) -> i32 {
        self.query_length
    }

    /// True until the first hit or subject after creation or `clear`
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.clean
    }

    /// Copy of one diagonal's state
    #[inline]
    pub fn entry(&self, index: usize) -> DiagStruct {
        self.array[index]
    }

    /// Iterate over all diagonal states
    pub fn entries(&self) -> impl Iterator<Item = DiagStruct> + '_ {
        self.array.iter().copied()
    }

    /// Check that this table may serve a new query with the given shape.
    ///
    /// A table that has seen subjects must be cleared first; otherwise
    /// entries left by the previous query would suppress or pair hits.
    pub fn check_reusable(&self, query_length: i32, multiple_hits: bool, window: i32) -> Result<()> {
        if multiple_hits != self.multiple_hits {
            return Err(SeedError::ModeMismatch {
                table: self.multiple_hits,
                config: multiple_hits,
            });
        }
        if window != self.window {
            return Err(SeedError::InvalidWindow { window });
        }
        let needed = query_length as i64 + window as i64;
        if query_length < 0 || needed > self.array.len() as i64 {
            return Err(SeedError::TableTooSmall {
                capacity: self.array.len(),
                query_length,
                window,
            });
        }
        if !self.clean {
            return Err(SeedError::TableNotCleared);
        }
        Ok(())
    }

    /// Adopt a new query length after `check_reusable` succeeded
    pub(crate) fn assign_query(&mut self, query_length: i32) {
        self.query_length = query_length;
    }

    // ------------------------------------------------------------------
    // One-hit admission
    // ------------------------------------------------------------------

    /// True when the hit lies at or beyond the end of the last extension on
    /// its diagonal
    #[inline(always)]
    pub(crate) fn one_hit_admit(&self, diag: usize, subject_offset: u32) -> bool {
        let last_hit = self.array[diag].last_hit.wrapping_sub(self.offset);
        let diff = (subject_offset as i32).wrapping_sub(last_hit);
        diff >= 0
    }

    /// Push the diagonal's marker to the end of a finished extension.
    ///
    /// The marker never stays at or before the seed word: a word whose best
    /// stretch ends early stops the right walk inside the word, and the same
    /// hit must still be masked afterwards.
    #[inline(always)]
    pub(crate) fn one_hit_record(
        &mut self,
        diag: usize,
        subject_offset: u32,
        s_last_off: i32,
        word_size: i32,
    ) {
        let word_end = (subject_offset as i32).wrapping_add(word_size);
        self.array[diag].last_hit = s_last_off
            .max(word_end)
            .wrapping_sub(word_size - 1)
            .wrapping_add(self.offset);
        self.clean = false;
    }

    // ------------------------------------------------------------------
    // Two-hit admission
    // ------------------------------------------------------------------

    #[inline(always)]
    pub(crate) fn two_hit_classify(
        &mut self,
        diag: usize,
        subject_offset: u32,
        word_size: i32,
    ) -> TwoHitAdmission {
        let offset = self.offset;
        let window = self.window;
        let s_plus_offset = (subject_offset as i32).wrapping_add(offset);
        let entry = &mut self.array[diag];

        if entry.flag {
            if s_plus_offset < entry.last_hit {
                return TwoHitAdmission::Masked;
            }
            entry.last_hit = s_plus_offset;
            entry.flag = false;
            self.clean = false;
            return TwoHitAdmission::FlagReset;
        }

        let last_hit = entry.last_hit.wrapping_sub(offset);
        let diff = (subject_offset as i32).wrapping_sub(last_hit);

        if diff >= window {
            entry.last_hit = s_plus_offset;
            self.clean = false;
            return TwoHitAdmission::TooFar;
        }
        if diff < word_size {
            return TwoHitAdmission::Overlap;
        }
        TwoHitAdmission::Second { last_hit, diff }
    }

    /// Make the present hit the first hit of a future pair
    #[inline(always)]
    pub(crate) fn two_hit_set_first(&mut self, diag: usize, subject_offset: u32) {
        self.array[diag].last_hit = (subject_offset as i32).wrapping_add(self.offset);
        self.clean = false;
    }

    /// Record the outcome of a two-hit extension.
    ///
    /// After a right extension the diagonal is flagged and its marker moved to
    /// the end of the extension, so later hits must start a new pair.
    /// Otherwise the current hit becomes the first hit.
    #[inline(always)]
    pub(crate) fn two_hit_record(
        &mut self,
        diag: usize,
        subject_offset: u32,
        right_extended: bool,
        s_last_off: i32,
        word_size: i32,
    ) {
        let offset = self.offset;
        let entry = &mut self.array[diag];
        if right_extended {
            entry.flag = true;
            entry.last_hit = s_last_off.wrapping_sub(word_size - 1).wrapping_add(offset);
        } else {
            entry.last_hit = (subject_offset as i32).wrapping_add(offset);
        }
        self.clean = false;
    }
}

//! Word finder counters
//!
//! Counts where word hits go: masked by an earlier extension, waiting for a
//! second hit, extended, saved. The drivers return a `ScanStatistics` per
//! subject; callers add them up. Summaries are logged only when the
//! SEEDEXT_DIAGNOSTICS environment variable is set.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use tracing::info;

/// Check if diagnostics are enabled via environment variable
pub fn diagnostics_enabled() -> bool {
    std::env::var("SEEDEXT_DIAGNOSTICS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Word hits reported by the scanner
    pub hits_scanned: u64,
    /// Ungapped extensions performed
    pub hits_extended: u64,
    /// Extensions at or above the cutoff score
    pub hits_saved: u64,
    /// Hits inside a region already covered by an extension
    pub seeds_masked: u64,
    // Two-hit only
    pub seeds_too_far: u64,
    pub seeds_overlap: u64,
    /// Pairs whose first hit lies in an earlier query context
    pub seeds_context_boundary: u64,
    /// Two-hit extensions whose left walk reached the first hit
    pub right_extensions: u64,
}

impl ScanStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one `info` event with every counter.
    pub fn log_summary(&self, label: &str) {
        info!(
            label,
            hits_scanned = self.hits_scanned,
            hits_extended = self.hits_extended,
            hits_saved = self.hits_saved,
            seeds_masked = self.seeds_masked,
            seeds_too_far = self.seeds_too_far,
            seeds_overlap = self.seeds_overlap,
            seeds_context_boundary = self.seeds_context_boundary,
            right_extensions = self.right_extensions,
            "word finder statistics"
        );
    }
}

impl AddAssign for ScanStatistics {
    fn add_assign(&mut self, rhs: Self) {
        self.hits_scanned += rhs.hits_scanned;
        self.hits_extended += rhs.hits_extended;
        self.hits_saved += rhs.hits_saved;
        self.seeds_masked += rhs.seeds_masked;
        self.seeds_too_far += rhs.seeds_too_far;
        self.seeds_overlap += rhs.seeds_overlap;
        self.seeds_context_boundary += rhs.seeds_context_boundary;
        self.right_extensions += rhs.right_extensions;
    }
}

impl Add for ScanStatistics {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl Sum for ScanStatistics {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a ScanStatistics> for ScanStatistics {
    fn sum<I: Iterator<Item = &'a ScanStatistics>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

//! Error types for the word finder
//!
//! Only parameter and allocation problems are errors. Empty results and
//! hits below cutoff are normal outcomes, and the rolling diagonal offset
//! heals itself (see `DiagonalTable::update`).

use thiserror::Error;

use super::blast_encoding::Encoding;
use super::scan::ScanMode;

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, SeedError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error("word size must be positive (got {word_size})")]
    InvalidWordSize { word_size: i32 },

    #[error("invalid two-hit window {window} (must be positive in two-hit mode, non-negative otherwise)")]
    InvalidWindow { window: i32 },

    #[error("X-drop must be positive (got {dropoff})")]
    InvalidDropoff { dropoff: i32 },

    #[error("invalid query length {query_length}")]
    InvalidQueryLength { query_length: i32 },

    #[error("diagonal table for query length {query_length} and window {window} does not fit in i32")]
    DiagonalTableTooLarge { query_length: i32, window: i32 },

    #[error("failed to allocate diagonal table with {entries} entries")]
    AllocationFailed { entries: usize },

    #[error("{mode:?} scanning requires a different subject encoding (got {encoding:?})")]
    EncodingMismatch { mode: ScanMode, encoding: Encoding },

    #[error("{mode:?} scanning is incompatible with the supplied scoring matrix")]
    ScoringMismatch { mode: ScanMode },

    #[error("PSSM covers {rows} query positions but the query has {query_length}")]
    PssmTooShort { rows: usize, query_length: usize },

    #[error("diagonal table must be cleared before it is reused for another query")]
    TableNotCleared,

    #[error("diagonal table holds {capacity} diagonals but query length {query_length} + window {window} needs more")]
    TableTooSmall {
        capacity: usize,
        query_length: i32,
        window: i32,
    },

    #[error("diagonal table mode (two_hit={table}) does not match the configuration (two_hit={config})")]
    ModeMismatch { table: bool, config: bool },
}

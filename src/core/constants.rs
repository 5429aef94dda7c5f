//! Default word-finder parameters
//!
//! These mirror the BLAST defaults for protein and nucleotide ungapped
//! word finding.

/// Default word size for protein searches (BLAST_WORDSIZE_PROT)
pub const BLAST_WORDSIZE_PROT: i32 = 3;

/// Default word size for nucleotide searches (BLAST_WORDSIZE_NUCL)
pub const BLAST_WORDSIZE_NUCL: i32 = 11;

/// Two-hit window for protein searches (BLAST_WINDOW_SIZE_PROT)
/// Maximum distance between the first and the second hit on a diagonal.
pub const BLAST_WINDOW_SIZE_PROT: i32 = 40;

/// Ungapped X-drop for protein searches, in raw score units
pub const BLAST_UNGAPPED_X_DROPOFF_PROT: i32 = 7;

/// Ungapped X-drop for nucleotide searches, in raw score units
pub const BLAST_UNGAPPED_X_DROPOFF_NUCL: i32 = 20;

/// Base capacity of one scan batch. The real batch is
/// `OFFSET_ARRAY_SIZE + longest_chain` so a single subject position can
/// always be stored whole.
pub const OFFSET_ARRAY_SIZE: usize = 4096;

/// Once the rolling diagonal offset reaches this value the table is cleared
/// instead of advanced, keeping `subject_offset + offset` inside i32.
pub const DIAG_OFFSET_LIMIT: i32 = i32::MAX / 4;

/// Bases per byte in ncbi2na packed sequences
pub const COMPRESSION_RATIO: usize = 4;

/// Longest word the direct-address (small) nucleotide table indexes:
/// 4^8 = 65,536 cells.
pub const SMALL_TABLE_MAX_WORD: usize = 8;

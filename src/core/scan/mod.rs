//! Subject scanning interface
//!
//! A scanner walks a subject and reports word hits as (query offset,
//! subject offset) pairs, a batch at a time. The word finders only depend on
//! the [`Scanner`] trait; [`WordScanner`] is an exact-word implementation.

mod word_scanner;

pub use word_scanner::WordScanner;

use super::blast_encoding::{Encoding, Sequence};
use super::constants::OFFSET_ARRAY_SIZE;

/// Query/subject offset pair for one word hit
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OffsetPair {
    pub q_off: u32,
    pub s_off: u32,
}

/// Kind of scan, which also fixes the subject encoding and scoring expected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanMode {
    /// Protein query against protein subjects (one residue per byte)
    Protein,
    /// Nucleotide query against packed subjects, hashed word index
    Nucleotide,
    /// Nucleotide query against packed subjects, direct-address index for
    /// short words
    NucleotideSmall,
    /// Reverse position-specific search: subjects scored against a PSSM
    Rps,
}

impl ScanMode {
    /// Subject encoding this mode scans
    pub fn subject_encoding(self) -> Encoding {
        match self {
            ScanMode::Protein | ScanMode::Rps => Encoding::Residue,
            ScanMode::Nucleotide | ScanMode::NucleotideSmall => Encoding::Ncbi2naPacked,
        }
    }

    #[inline]
    pub fn is_nucleotide(self) -> bool {
        matches!(self, ScanMode::Nucleotide | ScanMode::NucleotideSmall)
    }

    /// RPS scoring is position specific; every other mode uses a
    /// substitution matrix or PSSM at the caller's choice.
    #[inline]
    pub fn requires_pssm(self) -> bool {
        matches!(self, ScanMode::Rps)
    }
}

/// Scan cursor: word start positions `first..=last` remain to be scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanRange {
    pub first: usize,
    pub last: usize,
}

impl ScanRange {
    /// Full range for a subject, or `None` when the subject is shorter than
    /// one word
    pub fn for_subject(subject_len: usize, word_length: usize) -> Option<Self> {
        if word_length == 0 || subject_len < word_length {
            return None;
        }
        Some(Self {
            first: 0,
            last: subject_len - word_length,
        })
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.first > self.last
    }
}

/// Source of word hits
pub trait Scanner {
    fn mode(&self) -> ScanMode;

    fn word_length(&self) -> usize;

    /// Most query offsets reported for a single subject position
    fn longest_chain(&self) -> usize;

    /// Fill `offset_pairs` with hits starting at `range.first` and advance
    /// the cursor past the last position whose hits were all stored.
    ///
    /// Hits of one subject position are never split across batches.
    /// Returns the number of pairs written.
    fn scan(&self, subject: &Sequence, offset_pairs: &mut [OffsetPair], range: &mut ScanRange) -> usize;

    /// Batch size that always fits one position's hits
    fn offset_array_size(&self) -> usize {
        OFFSET_ARRAY_SIZE + self.longest_chain()
    }
}

impl<T: Scanner + ?Sized> Scanner for &T {
    fn mode(&self) -> ScanMode {
        (**self).mode()
    }

    fn word_length(&self) -> usize {
        (**self).word_length()
    }

    fn longest_chain(&self) -> usize {
        (**self).longest_chain()
    }

    fn scan(&self, subject: &Sequence, offset_pairs: &mut [OffsetPair], range: &mut ScanRange) -> usize {
        (**self).scan(subject, offset_pairs, range)
    }
}

//! Test utilities and helpers for unit tests
//!
//! - Scoring fixtures
//! - A scanner that replays a fixed list of word hits
//! - Sequence generators

use seedext::core::blast_encoding::Sequence;
use seedext::core::scan::{OffsetPair, ScanMode, ScanRange, Scanner};
use seedext::utils::matrix::SubstitutionMatrix;

/// +1 match / -2 mismatch over the 4-letter nucleotide alphabet
pub fn dna_matrix() -> SubstitutionMatrix {
    SubstitutionMatrix::match_mismatch(4, 1, -2)
}

/// `[0, 1, 2, 3]` repeated to `len` residues
pub fn acgt_repeat(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 4) as u8).collect()
}

/// Shorthand for an offset pair
pub fn pair(q_off: u32, s_off: u32) -> OffsetPair {
    OffsetPair { q_off, s_off }
}

/// Scanner replaying a fixed list of hits.
///
/// Hits are reported in subject order; hits at the same subject offset keep
/// the order they were given in (duplicates included).
pub struct FixedScanner {
    mode: ScanMode,
    word_length: usize,
    pairs: Vec<OffsetPair>,
}

impl FixedScanner {
    pub fn new(mode: ScanMode, word_length: usize, pairs: Vec<OffsetPair>) -> Self {
        Self {
            mode,
            word_length,
            pairs,
        }
    }

    /// Residue-coded subjects
    pub fn residues(word_length: usize, pairs: Vec<OffsetPair>) -> Self {
        Self::new(ScanMode::Protein, word_length, pairs)
    }
}

impl Scanner for FixedScanner {
    fn mode(&self) -> ScanMode {
        self.mode
    }

    fn word_length(&self) -> usize {
        self.word_length
    }

    fn longest_chain(&self) -> usize {
        self.pairs
            .iter()
            .map(|p| self.pairs.iter().filter(|o| o.s_off == p.s_off).count())
            .max()
            .unwrap_or(0)
    }

    fn scan(&self, _subject: &Sequence, offset_pairs: &mut [OffsetPair], range: &mut ScanRange) -> usize {
        let mut total = 0;
        let mut s = range.first;
        while s <= range.last {
            let at: Vec<OffsetPair> = self
                .pairs
                .iter()
                .copied()
                .filter(|p| p.s_off as usize == s)
                .collect();
            if at.len() > offset_pairs.len() - total {
                break;
            }
            offset_pairs[total..total + at.len()].copy_from_slice(&at);
            total += at.len();
            s += 1;
        }
        range.first = s;
        total
    }
}

//! Exact-word scanner
//!
//! Indexes every query word (never across a context boundary) and reports
//! each subject position whose word matches exactly. Nucleotide words use
//! 2 bits per base, protein words 8 bits per residue.

use rustc_hash::FxHashMap;

use super::{OffsetPair, ScanMode, ScanRange, Scanner};
use crate::core::blast_encoding::{Residues, Sequence, SequenceView};
use crate::core::constants::SMALL_TABLE_MAX_WORD;
use crate::core::error::{Result, SeedError};
use crate::core::query_info::QueryInfo;

/// Longest protein word that fits the 64-bit key
const MAX_PROTEIN_WORD: usize = 8;

/// Longest nucleotide word that fits the 64-bit key
const MAX_NUCLEOTIDE_WORD: usize = 32;

enum WordIndex {
    /// Word key -> query offsets
    Hashed(FxHashMap<u64, Vec<u32>>),
    /// Direct-address table over all 4^w nucleotide words
    Direct(Vec<Vec<u32>>),
}

impl WordIndex {
    #[inline(always)]
    fn get(&self, key: u64) -> &[u32] {
        match self {
            WordIndex::Hashed(map) => map.get(&key).map(Vec::as_slice).unwrap_or(&[]),
            WordIndex::Direct(table) => table.get(key as usize).map(Vec::as_slice).unwrap_or(&[]),
        }
    }
}

pub struct WordScanner {
    mode: ScanMode,
    word_length: usize,
    bits_per_residue: u32,
    key_mask: u64,
    index: WordIndex,
    longest_chain: usize,
    indexed_words: usize,
}

impl WordScanner {
    /// Index the words of `query` (one residue code per byte, nucleotides as
    /// 2-bit codes).
    pub fn new(mode: ScanMode, query: &[u8], query_info: &QueryInfo, word_length: usize) -> Result<Self> {
        let max_word = match mode {
            ScanMode::Protein | ScanMode::Rps => MAX_PROTEIN_WORD,
            ScanMode::Nucleotide => MAX_NUCLEOTIDE_WORD,
            ScanMode::NucleotideSmall => SMALL_TABLE_MAX_WORD,
        };
        if word_length == 0 || word_length > max_word {
            return Err(SeedError::InvalidWordSize {
                word_size: word_length as i32,
            });
        }
        if query_info.total_length() > query.len() {
            return Err(SeedError::InvalidQueryLength {
                query_length: query_info.total_length() as i32,
            });
        }

        let bits_per_residue = if mode.is_nucleotide() { 2 } else { 8 };
        let key_bits = word_length as u32 * bits_per_residue;
        let key_mask = if key_bits >= 64 {
            u64::MAX
        } else {
            (1u64 << key_bits) - 1
        };

        let mut scanner = Self {
            mode,
            word_length,
            bits_per_residue,
            key_mask,
            index: match mode {
                ScanMode::NucleotideSmall => WordIndex::Direct(vec![Vec::new(); 1usize << key_bits]),
                _ => WordIndex::Hashed(FxHashMap::default()),
            },
            longest_chain: 0,
            indexed_words: 0,
        };

        for ctx in query_info.contexts() {
            let start = ctx.query_offset as usize;
            let end = ctx.end() as usize;
            if end - start < word_length {
                continue;
            }
            for q_off in start..=end - word_length {
                let key = scanner.word_key(query, q_off);
                scanner.insert(key, q_off as u32);
            }
        }

        scanner.longest_chain = match &scanner.index {
            WordIndex::Hashed(map) => map.values().map(Vec::len).max().unwrap_or(0),
            WordIndex::Direct(table) => table.iter().map(Vec::len).max().unwrap_or(0),
        };

        Ok(scanner)
    }

    /// Number of query words indexed
    pub fn indexed_words(&self) -> usize {
        self.indexed_words
    }

    fn insert(&mut self, key: u64, q_off: u32) {
        match &mut self.index {
            WordIndex::Hashed(map) => map.entry(key).or_default().push(q_off),
            WordIndex::Direct(table) => table[key as usize].push(q_off),
        }
        self.indexed_words += 1;
    }

    #[inline(always)]
    fn residue_code(&self, residue: u8) -> u64 {
        if self.bits_per_residue == 2 {
            (residue & 0x03) as u64
        } else {
            residue as u64
        }
    }

    #[inline(always)]
    fn push_residue(&self, key: u64, residue: u8) -> u64 {
        let shifted = if self.bits_per_residue as usize * self.word_length >= 64 {
            key.wrapping_shl(self.bits_per_residue)
        } else {
            key << self.bits_per_residue
        };
        (shifted | self.residue_code(residue)) & self.key_mask
    }

    fn word_key<R: Residues + ?Sized>(&self, seq: &R, start: usize) -> u64 {
        (0..self.word_length).fold(0u64, |key, i| self.push_residue(key, seq.residue(start + i)))
    }

    fn scan_residues<R: Residues + ?Sized>(
        &self,
        subject: &R,
        offset_pairs: &mut [OffsetPair],
        range: &mut ScanRange,
    ) -> usize {
        let mut total = 0usize;
        if range.is_done() {
            return 0;
        }

        // Key of the word ending one before `range.first + word_length - 1`
        let mut key = (0..self.word_length - 1)
            .fold(0u64, |key, i| self.push_residue(key, subject.residue(range.first + i)));

        let mut s = range.first;
        while s <= range.last {
            key = self.push_residue(key, subject.residue(s + self.word_length - 1));
            let hits = self.index.get(key);
            if !hits.is_empty() {
                if hits.len() > offset_pairs.len() - total {
                    break;
                }
                let s_off = s as u32;
                for (slot, &q_off) in offset_pairs[total..total + hits.len()].iter_mut().zip(hits) {
                    *slot = OffsetPair { q_off, s_off };
                }
                total += hits.len();
            }
            s += 1;
        }

        range.first = s;
        total
    }
}

impl Scanner for WordScanner {
    fn mode(&self) -> ScanMode {
        self.mode
    }

    fn word_length(&self) -> usize {
        self.word_length
    }

    fn longest_chain(&self) -> usize {
        self.longest_chain
    }

    fn scan(&self, subject: &Sequence, offset_pairs: &mut [OffsetPair], range: &mut ScanRange) -> usize {
        match subject.view() {
            SequenceView::Residue(r) => self.scan_residues(r, offset_pairs, range),
            SequenceView::Packed(p) => self.scan_residues(&p, offset_pairs, range),
        }
    }
}

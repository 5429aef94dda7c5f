//! Scoring matrices for ungapped extension
//!
//! Two kinds of matrix drive the extension loops:
//! 1. A substitution matrix, scored by (query residue, subject residue)
//! 2. A position-specific scoring matrix (PSSM), scored by
//!    (query position, subject residue)
//!
//! Both sit behind the [`Scoring`] trait, so the extension code never needs
//! to know which one it was given.

/// Score source for one aligned residue pair.
///
/// `query_pos` and `query_residue` always describe the same query column;
/// an implementation reads whichever one it is keyed on.
pub trait Scoring {
    fn score(&self, query_pos: usize, query_residue: u8, subject_residue: u8) -> i32;
}

impl<T: Scoring + ?Sized> Scoring for &T {
    #[inline(always)]
    fn score(&self, query_pos: usize, query_residue: u8, subject_residue: u8) -> i32 {
        (**self).score(query_pos, query_residue, subject_residue)
    }
}

/// Dense square substitution matrix over a residue alphabet.
///
/// Residues outside the alphabet score `default_score`, which plays the
/// role of the sentinel penalty at sequence boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionMatrix {
    alphabet_size: usize,
    scores: Vec<i32>,
    default_score: i32,
}

impl SubstitutionMatrix {
    /// Build from square rows; returns `None` if the rows are not square.
    pub fn from_rows(rows: &[Vec<i32>], default_score: i32) -> Option<Self> {
        let alphabet_size = rows.len();
        if rows.iter().any(|r| r.len() != alphabet_size) {
            return None;
        }
        let scores = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Some(Self {
            alphabet_size,
            scores,
            default_score,
        })
    }

    /// Identity matrix: `reward` on the diagonal, `penalty` elsewhere.
    /// This is the blastn reward/penalty scheme when `alphabet_size == 4`.
    pub fn match_mismatch(alphabet_size: usize, reward: i32, penalty: i32) -> Self {
        let mut scores = vec![penalty; alphabet_size * alphabet_size];
        for a in 0..alphabet_size {
            scores[a * alphabet_size + a] = reward;
        }
        Self {
            alphabet_size,
            scores,
            default_score: penalty,
        }
    }

    #[inline]
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    #[inline]
    pub fn default_score(&self) -> i32 {
        self.default_score
    }

    /// Score of residue `a` against residue `b`
    #[inline(always)]
    pub fn pair_score(&self, a: u8, b: u8) -> i32 {
        let (a, b) = (a as usize, b as usize);
        if a < self.alphabet_size && b < self.alphabet_size {
            self.scores[a * self.alphabet_size + b]
        } else {
            self.default_score
        }
    }

    /// True when `score(a, b) == score(b, a)` for every pair
    pub fn is_symmetric(&self) -> bool {
        let n = self.alphabet_size;
        (0..n).all(|a| (0..n).all(|b| self.scores[a * n + b] == self.scores[b * n + a]))
    }
}

impl Scoring for SubstitutionMatrix {
    #[inline(always)]
    fn score(&self, _query_pos: usize, query_residue: u8, subject_residue: u8) -> i32 {
        self.pair_score(query_residue, subject_residue)
    }
}

/// Position-specific scoring matrix: one row per query position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pssm {
    alphabet_size: usize,
    rows: usize,
    scores: Vec<i32>,
    default_score: i32,
}

impl Pssm {
    /// Build from per-position rows; returns `None` if rows differ in width.
    pub fn from_rows(rows: &[Vec<i32>], default_score: i32) -> Option<Self> {
        let alphabet_size = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != alphabet_size) {
            return None;
        }
        Some(Self {
            alphabet_size,
            rows: rows.len(),
            scores: rows.iter().flat_map(|r| r.iter().copied()).collect(),
            default_score,
        })
    }

    /// Derive a PSSM from a query and a substitution matrix, i.e. the matrix
    /// row of each query residue. Scores equal the substitution scores.
    pub fn from_query(query: &[u8], matrix: &SubstitutionMatrix) -> Self {
        let alphabet_size = matrix.alphabet_size();
        let mut scores = Vec::with_capacity(query.len() * alphabet_size);
        for &q in query {
            scores.extend((0..alphabet_size).map(|s| matrix.pair_score(q, s as u8)));
        }
        Self {
            alphabet_size,
            rows: query.len(),
            scores,
            default_score: matrix.default_score(),
        }
    }

    /// Number of query positions covered
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    #[inline(always)]
    pub fn position_score(&self, query_pos: usize, subject_residue: u8) -> i32 {
        let s = subject_residue as usize;
        if query_pos < self.rows && s < self.alphabet_size {
            self.scores[query_pos * self.alphabet_size + s]
        } else {
            self.default_score
        }
    }
}

impl Scoring for Pssm {
    #[inline(always)]
    fn score(&self, query_pos: usize, _query_residue: u8, subject_residue: u8) -> i32 {
        self.position_score(query_pos, subject_residue)
    }
}

/// Either kind of matrix, chosen at search setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoringMatrix {
    Substitution(SubstitutionMatrix),
    Pssm(Pssm),
}

impl ScoringMatrix {
    #[inline]
    pub fn is_pssm(&self) -> bool {
        matches!(self, ScoringMatrix::Pssm(_))
    }
}

impl Scoring for ScoringMatrix {
    #[inline(always)]
    fn score(&self, query_pos: usize, query_residue: u8, subject_residue: u8) -> i32 {
        match self {
            ScoringMatrix::Substitution(m) => m.pair_score(query_residue, subject_residue),
            ScoringMatrix::Pssm(p) => p.position_score(query_pos, subject_residue),
        }
    }
}

impl From<SubstitutionMatrix> for ScoringMatrix {
    fn from(m: SubstitutionMatrix) -> Self {
        ScoringMatrix::Substitution(m)
    }
}

impl From<Pssm> for ScoringMatrix {
    fn from(p: Pssm) -> Self {
        ScoringMatrix::Pssm(p)
    }
}

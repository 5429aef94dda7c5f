//! Initial (ungapped) hit storage
//!
//! Word finders push every extension that clears the cutoff score here.
//! Nothing is merged or deduplicated; overlapping hits from different
//! diagonals are expected and left for later stages.

use std::cmp::Reverse;

use super::extension::UngappedExtension;

/// One ungapped alignment kept for later (gapped) processing.
///
/// Coordinates are 0-based. `seed_query`/`seed_subject` are the word hit
/// that triggered the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialHit {
    pub query_start: u32,
    pub subject_start: u32,
    pub length: u32,
    pub score: i32,
    pub seed_query: u32,
    pub seed_subject: u32,
}

impl InitialHit {
    pub fn from_extension(ext: &UngappedExtension, seed_query: u32, seed_subject: u32) -> Self {
        Self {
            query_start: ext.q_start as u32,
            subject_start: ext.s_start as u32,
            length: ext.length as u32,
            score: ext.score,
            seed_query,
            seed_subject,
        }
    }

    #[inline]
    pub fn query_end(&self) -> u32 {
        self.query_start + self.length
    }

    #[inline]
    pub fn subject_end(&self) -> u32 {
        self.subject_start + self.length
    }

    /// Diagonal as `query - subject`
    #[inline]
    pub fn diagonal(&self) -> i64 {
        self.query_start as i64 - self.subject_start as i64
    }
}

/// Destination for recorded hits
pub trait HitSink {
    fn push(&mut self, hit: InitialHit);

    /// Order hits by score, best first
    fn sort_by_score_descending(&mut self);
}

/// Append-only list of initial hits
#[derive(Debug, Clone, Default)]
pub struct InitHitList {
    hits: Vec<InitialHit>,
}

impl InitHitList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hits: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InitialHit> {
        self.hits.iter()
    }

    pub fn as_slice(&self) -> &[InitialHit] {
        &self.hits
    }

    /// Drop all hits, keeping the allocation for the next subject or query
    pub fn clear(&mut self) {
        self.hits.clear();
    }

    pub fn into_vec(self) -> Vec<InitialHit> {
        self.hits
    }
}

impl HitSink for InitHitList {
    #[inline]
    fn push(&mut self, hit: InitialHit) {
        self.hits.push(hit);
    }

    /// Stable: equal scores keep insertion (scan) order.
    fn sort_by_score_descending(&mut self) {
        self.hits.sort_by_key(|h| Reverse(h.score));
    }
}

impl HitSink for Vec<InitialHit> {
    #[inline]
    fn push(&mut self, hit: InitialHit) {
        Vec::push(self, hit);
    }

    fn sort_by_score_descending(&mut self) {
        self.sort_by_key(|h| Reverse(h.score));
    }
}

impl<'a> IntoIterator for &'a InitHitList {
    type Item = &'a InitialHit;
    type IntoIter = std::slice::Iter<'a, InitialHit>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.iter()
    }
}

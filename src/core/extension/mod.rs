//! Ungapped X-drop extension
//!
//! Extension walks outward from a word hit one residue pair at a time, keeps
//! the best running score, and stops once the score has fallen `dropoff`
//! below that best (or, to the right, drops to zero or below).
//!
//! All routines are generic over the scoring source (substitution matrix or
//! PSSM) and the residue storage (plain or packed), so one implementation
//! serves every scan mode.
//!
//! # Module Structure
//!
//! - `ungapped` - Left/right primitives and the one-hit extension
//! - `two_hit` - Two-hit extension with the left-reach gate

mod two_hit;
mod ungapped;

pub use two_hit::extend_two_hit;
pub use ungapped::{extend_left, extend_one_hit, extend_right};

/// Result of a right extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RightExtension {
    /// Best score reached, including the starting score
    pub score: i32,
    /// Residues to the right kept in the alignment
    pub length: usize,
    /// Rightmost subject position examined
    pub s_last_off: usize,
}

/// An ungapped alignment produced from a word hit.
///
/// Coordinates are 0-based; the alignment covers
/// `[q_start, q_start + length)` and `[s_start, s_start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UngappedExtension {
    pub score: i32,
    pub q_start: usize,
    pub s_start: usize,
    pub length: usize,
    /// Rightmost subject position examined, used to mask the diagonal
    pub s_last_off: usize,
}

impl UngappedExtension {
    #[inline]
    pub fn q_end(&self) -> usize {
        self.q_start + self.length
    }

    #[inline]
    pub fn s_end(&self) -> usize {
        self.s_start + self.length
    }
}

/// Result of a two-hit extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoHitExtension {
    pub extension: UngappedExtension,
    /// The left extension reached the first hit, so the right extension ran
    pub right_extended: bool,
}

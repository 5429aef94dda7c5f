//! Two-hit ungapped extension
//!
//! Reference: ncbi-blast/c++/src/algo/blast/core/aa_ungapped.c

use super::ungapped::{extend_left, extend_right};
use super::{TwoHitExtension, UngappedExtension};
use crate::core::blast_encoding::Residues;
use crate::utils::matrix::Scoring;

/// Two-hit ungapped extension.
///
/// Given a first hit ending at `s_left_off` and a second hit starting at
/// `(q_right_off, s_right_off)` on the same diagonal, extend left from the
/// second hit first. Only if that left extension reaches back to the first
/// hit (`left_d >= s_right_off - s_left_off`) does the right extension run,
/// seeded with the left score. This keeps two unrelated hits that happen to
/// share a diagonal from being joined.
///
/// The reported score is `max(left_score, right_score)`; when the gate stays
/// closed it is the left-only score.
///
/// Follows `s_BlastAaExtendTwoHit` in aa_ungapped.c.
///
/// The caller guarantees `word_size` residues exist at the second hit.
#[allow(clippy::too_many_arguments)]
pub fn extend_two_hit<M, Q, S>(
    matrix: &M,
    query: &Q,
    subject: &S,
    s_left_off: usize,
    s_right_off: usize,
    q_right_off: usize,
    dropoff: i32,
    word_size: usize,
) -> TwoHitExtension
where
    M: Scoring + ?Sized,
    Q: Residues + ?Sized,
    S: Residues + ?Sized,
{
    // One beyond the word position giving the best starting score
    let mut score = 0i32;
    let mut seed_score = 0i32;
    let mut right_d = 0usize;
    for i in 0..word_size {
        let q_pos = q_right_off + i;
        score += matrix.score(q_pos, query.residue(q_pos), subject.residue(s_right_off + i));
        if score > seed_score {
            seed_score = score;
            right_d = i + 1;
        }
    }

    let q_right_off = q_right_off + right_d;
    let s_right_off = s_right_off + right_d;

    // Reference: aa_ungapped.c:886-921 (s_BlastAaExtendLeft, seeded with 0)
    let (left_score, left_d) =
        extend_left(matrix, query, subject, q_right_off, s_right_off, dropoff, 0);

    let mut right_score = 0i32;
    let mut right_len = 0usize;
    let mut right_extended = false;
    let mut s_last_off = s_right_off;

    // NCBI BLAST reference (c++/src/algo/blast/core/aa_ungapped.c:1089-1158):
    //   if (left_d >= (s_right_off - s_left_off)) {
    //       right_extend = TRUE;
    //       right_score = s_BlastAaExtendRight(..., left_score, &right_d, s_last_off);
    //   }
    // right_extend is set on entry, however far the right walk gets.
    if left_d >= s_right_off.saturating_sub(s_left_off) {
        right_extended = true;
        let right = extend_right(
            matrix,
            query,
            subject,
            q_right_off,
            s_right_off,
            dropoff,
            left_score,
        );
        right_score = right.score;
        right_len = right.length;
        s_last_off = right.s_last_off;
    }

    TwoHitExtension {
        extension: UngappedExtension {
            score: left_score.max(right_score),
            q_start: q_right_off - left_d,
            s_start: s_right_off - left_d,
            length: left_d + right_len,
            s_last_off,
        },
        right_extended,
    }
}

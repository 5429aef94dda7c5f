//! X-drop primitives and the one-hit extension
//!
//! Reference: ncbi-blast/c++/src/algo/blast/core/aa_ungapped.c

use super::{RightExtension, UngappedExtension};
use crate::core::blast_encoding::Residues;
use crate::utils::matrix::Scoring;

// NCBI BLAST reference (c++/src/algo/blast/core/aa_ungapped.c:886-921):
//   for (i = n; i >= 0; i--) {
//       score += matrix[q[i]][s[i]];
//       if (score > maxscore) {
//           maxscore = score;
//           best_i = i;
//       }
//       if ((maxscore - score) >= dropoff)
//           break;
//   }
//   *length = n - best_i + 1;
//
// Walked here as (q_end-1-i, s_end-1-i), same termination.

/// Extend to the left of `(q_end, s_end)`, exclusive.
///
/// Scores positions `q_end-1, q_end-2, ...` on top of `maxscore` and stops
/// when the score falls `dropoff` below the best seen, or at the start of
/// either sequence. Ties keep the nearest position.
///
/// Returns `(best_score, length)` where `length` residues to the left are
/// part of the best-scoring extension.
#[inline]
pub fn extend_left<M, Q, S>(
    matrix: &M,
    query: &Q,
    subject: &S,
    q_end: usize,
    s_end: usize,
    dropoff: i32,
    maxscore: i32,
) -> (i32, usize)
where
    M: Scoring + ?Sized,
    Q: Residues + ?Sized,
    S: Residues + ?Sized,
{
    let n = q_end.min(s_end);

    let mut score = maxscore;
    let mut maxscore = maxscore;
    let mut length = 0usize;

    for i in 0..n {
        let q_pos = q_end - 1 - i;
        let s_pos = s_end - 1 - i;
        score += matrix.score(q_pos, query.residue(q_pos), subject.residue(s_pos));

        if score > maxscore {
            maxscore = score;
            length = i + 1;
        }

        if (maxscore - score) >= dropoff {
            break;
        }
    }

    (maxscore, length)
}

// NCBI BLAST reference (c++/src/algo/blast/core/aa_ungapped.c:846-866):
//   for (i = 0; i < n; i++) {
//       score += matrix[q[i]][s[i]];
//       if (score > maxscore) {
//           maxscore = score;
//           best_i = i;
//       }
//       if (score <= 0 || (maxscore - score) >= dropoff)
//           break;
//   }
//   *length = best_i + 1;
//   *s_last_off = s_off + i;

/// Extend to the right starting at `(q_start, s_start)`, inclusive.
///
/// Stops when the running score drops to zero or below, falls `dropoff`
/// below the best seen, or either sequence ends. `s_last_off` is the subject
/// position at which the walk stopped.
#[inline]
pub fn extend_right<M, Q, S>(
    matrix: &M,
    query: &Q,
    subject: &S,
    q_start: usize,
    s_start: usize,
    dropoff: i32,
    maxscore: i32,
) -> RightExtension
where
    M: Scoring + ?Sized,
    Q: Residues + ?Sized,
    S: Residues + ?Sized,
{
    let n = query
        .len()
        .saturating_sub(q_start)
        .min(subject.len().saturating_sub(s_start));

    let mut score = maxscore;
    let mut maxscore = maxscore;
    let mut length = 0usize;
    let mut i = 0usize;

    while i < n {
        let q_pos = q_start + i;
        score += matrix.score(q_pos, query.residue(q_pos), subject.residue(s_start + i));

        if score > maxscore {
            maxscore = score;
            length = i + 1;
        }

        if score <= 0 || (maxscore - score) >= dropoff {
            break;
        }
        i += 1;
    }

    RightExtension {
        score: maxscore,
        length,
        s_last_off: s_start + i,
    }
}

/// One-hit ungapped extension from the word at `(q_off, s_off)`.
///
/// The word is first scanned left to right for its best-scoring stretch
/// (running sum restarted whenever it drops to zero or below; the first
/// maximum wins). The extension then runs left from that stretch and right
/// from it, the right walk continuing from the left result.
///
/// Follows `s_BlastAaExtendOneHit` in aa_ungapped.c.
///
/// The caller guarantees `word_size` residues exist at both offsets.
pub fn extend_one_hit<M, Q, S>(
    matrix: &M,
    query: &Q,
    subject: &S,
    s_off: usize,
    q_off: usize,
    dropoff: i32,
    word_size: usize,
) -> UngappedExtension
where
    M: Scoring + ?Sized,
    Q: Residues + ?Sized,
    S: Residues + ?Sized,
{
    let mut score = 0i32;
    let mut sum = 0i32;
    let mut q_left_off = q_off;
    let mut q_best_left_off = q_off;
    let mut q_best_right_off = q_off + word_size.saturating_sub(1);

    // NCBI BLAST reference (s_BlastAaExtendOneHit):
    //   for (i = 0; i < word_size; i++) {
    //       sum += matrix[q[i]][s[i]];
    //       if (sum > score) {
    //           score = sum;
    //           q_best_right_off = q_off + i;
    //           q_best_left_off = q_left_off;
    //       } else if (sum <= 0) {
    //           sum = 0;
    //           q_left_off = q_off + i + 1;
    //       }
    //   }
    for i in 0..word_size {
        let q_pos = q_off + i;
        sum += matrix.score(q_pos, query.residue(q_pos), subject.residue(s_off + i));

        if sum > score {
            score = sum;
            q_best_right_off = q_pos;
            q_best_left_off = q_left_off;
        } else if sum <= 0 {
            sum = 0;
            q_left_off = q_pos + 1;
        }
    }

    let init_hit_width = q_best_right_off - q_best_left_off + 1;
    let s_left_off = s_off + (q_best_left_off - q_off);
    let s_right_off = s_off + (q_best_right_off - q_off);

    let (left_score, left_disp) = extend_left(
        matrix,
        query,
        subject,
        q_best_left_off,
        s_left_off,
        dropoff,
        score,
    );
    let right = extend_right(
        matrix,
        query,
        subject,
        q_best_right_off + 1,
        s_right_off + 1,
        dropoff,
        left_score,
    );

    UngappedExtension {
        score: right.score,
        q_start: q_best_left_off - left_disp,
        s_start: s_left_off - left_disp,
        length: left_disp + right.length + init_hit_width,
        s_last_off: right.s_last_off,
    }
}

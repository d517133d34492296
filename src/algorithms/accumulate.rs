//! Reconstruction of the orthogonal eigenvector matrix.
//!
//! The factorization never forms Q explicitly during the solve. Instead, the
//! tridiagonalization leaves its Householder reflections packed in the working
//! buffer (see [`crate::algorithms::tridiagonal`]) and the QR iteration leaves
//! an ordered log of Givens rotations. This module composes those factors on
//! demand, along two paths that must agree to rounding:
//!
//! - **Bulk** ([`accumulate_householder`] + [`apply_givens_to_columns`]):
//!   starting from the identity, the reflections are accumulated backward (last
//!   reflection first, which keeps the early updates confined to small trailing
//!   blocks) and the rotation log is then replayed in chronological order.
//! - **Single column** ([`extract_column`]): starting from a standard basis
//!   vector, the rotation log is unwound in reverse with transposed rotations,
//!   then the reflections are applied with descending index. This yields one
//!   eigenvector in O(N²) work without materializing Q.
//!
//! The ordering asymmetry between the two paths is not incidental: the bulk
//! path builds Q acting on columns, while the single-column path pulls one
//! basis vector back through Qᵗ. Changing either traversal order silently
//! produces vectors that disagree with the other path.
//!
//! [`permute_columns`] applies the eigenvalue-sort permutation to Q with one
//! saved column per permutation cycle (L copies for a cycle of length L).

use super::tridiagonal::at;
use super::GivensRotation;

/// Overwrites the `n`-by-`n` row-major buffer with the identity matrix.
pub fn fill_identity(q: &mut [f64], n: usize) {
    q.fill(0.0);
    for d in 0..n {
        q[at(d, d, n)] = 1.0;
    }
}

/// Multiplies the Householder reflections into `q` by backward accumulation:
/// `q <- H_0 * H_1 * ... * H_{n-3} * q`, applied from the last reflection to
/// the first.
///
/// `matrix` is the packed working buffer produced by the tridiagonalization;
/// `v` and `w` are length-`n` scratch vectors. Reflection `i` only touches rows
/// `i+1..n` of `q`, so accumulating backward keeps the early passes cheap.
pub fn accumulate_householder(q: &mut [f64], n: usize, matrix: &[f64], v: &mut [f64], w: &mut [f64]) {
    for i in (0..n.saturating_sub(2)).rev() {
        let rmin = i + 1;

        // Unpack v: implied zeros, the implied 1 at i+1, then the stored
        // essential components. The stored scale is 2/(v^T v), or exactly 0.0
        // for a degenerate reflection, in which case the update vanishes.
        let scale = matrix[at(rmin, i, n)];
        for r in 0..rmin {
            v[r] = 0.0;
        }
        v[rmin] = 1.0;
        for r in rmin + 1..n {
            v[r] = matrix[at(r, i, n)];
        }

        // w = (2/v^T v) * Q^T v, then Q <- Q - v * w^T.
        for r in 0..n {
            let mut sum = 0.0;
            for c in rmin..n {
                sum += v[c] * q[at(c, r, n)];
            }
            w[r] = scale * sum;
        }
        for r in rmin..n {
            let vr = v[r];
            for c in 0..n {
                q[at(r, c, n)] -= vr * w[c];
            }
        }
    }
}

/// Replays the rotation log in chronological order against the columns of `q`:
/// for each recorded rotation G, `q <- q * G`.
pub fn apply_givens_to_columns(q: &mut [f64], n: usize, givens: &[GivensRotation]) {
    for g in givens {
        for r in 0..n {
            let j = at(r, g.index, n);
            let q0 = q[j];
            let q1 = q[j + 1];
            q[j] = g.cs * q0 - g.sn * q1;
            q[j + 1] = g.sn * q0 + g.cs * q1;
        }
    }
}

/// Computes column `start_index` of Q into `out` without forming Q.
///
/// `out` becomes the standard basis vector e_{start_index}, the rotation log is
/// unwound in reverse chronological order with transposed rotations, and the
/// Householder reflections are then applied with descending index, each pass
/// reflecting `x` into the scratch buffer and swapping the two for the next
/// pass. The result always ends up in `out`.
///
/// `scratch` must have length `n`; its contents are unspecified on exit.
pub fn extract_column(
    matrix: &[f64],
    n: usize,
    givens: &[GivensRotation],
    start_index: usize,
    out: &mut [f64],
    scratch: &mut [f64],
) {
    debug_assert!(start_index < n);
    debug_assert_eq!(out.len(), n);
    debug_assert_eq!(scratch.len(), n);

    out.fill(0.0);
    out[start_index] = 1.0;

    // Unwind the rotations: the log maps diagonal space back toward
    // tridiagonal space, so the inverse (transpose) of each rotation is
    // applied, newest first.
    for g in givens.iter().rev() {
        let x0 = out[g.index];
        let x1 = out[g.index + 1];
        out[g.index] = g.cs * x0 + g.sn * x1;
        out[g.index + 1] = -g.sn * x0 + g.cs * x1;
    }

    // Apply the reflections, ping-ponging between the two buffers. Reflection
    // i leaves components 0..=i untouched.
    let reflections = n.saturating_sub(2);
    let mut x: &mut [f64] = out;
    let mut y: &mut [f64] = scratch;
    for i in (0..reflections).rev() {
        let r0 = i + 1;
        let scale = matrix[at(r0, i, n)];

        y[..r0].copy_from_slice(&x[..r0]);

        // s = (2/v^T v) * Dot(v, x), with the implied v[i+1] = 1.
        let mut s = x[r0];
        for j in r0 + 1..n {
            s += x[j] * matrix[at(j, i, n)];
        }
        s *= scale;

        y[r0] = x[r0] - s;
        for r in r0 + 1..n {
            y[r] = x[r] - s * matrix[at(r, i, n)];
        }

        core::mem::swap(&mut x, &mut y);
    }

    // After an odd number of swaps the result lives in the scratch buffer
    // (now `x`) and must be copied back into the output (now `y`).
    if reflections % 2 == 1 {
        y.copy_from_slice(x);
    }
}

/// Reorders the columns of `q` so that column `i` of the result is column
/// `permutation[i]` of the input, and returns the number of transpositions
/// performed.
///
/// Each nontrivial cycle of the permutation is rotated in place: the first
/// column of the cycle is saved once, every other column is copied directly to
/// its destination, and the saved column closes the cycle. A cycle of length L
/// therefore costs exactly L column copies and contributes L−1 transpositions
/// to the returned count, which the caller uses to track the determinant
/// parity of Q.
///
/// `visited` and `saved` are length-`n` scratch buffers.
pub fn permute_columns(
    q: &mut [f64],
    n: usize,
    permutation: &[usize],
    visited: &mut [bool],
    saved: &mut [f64],
) -> usize {
    debug_assert_eq!(permutation.len(), n);

    visited.fill(false);
    let mut transpositions = 0;

    for i in 0..n {
        if visited[i] || permutation[i] == i {
            continue;
        }

        // Column i starts a cycle with at least two elements.
        let start = i;
        let mut current = i;
        for j in 0..n {
            saved[j] = q[at(j, i, n)];
        }
        loop {
            let next = permutation[current];
            if next == start {
                break;
            }
            transpositions += 1;
            visited[current] = true;
            for j in 0..n {
                q[at(j, current, n)] = q[at(j, next, n)];
            }
            current = next;
        }
        visited[current] = true;
        for j in 0..n {
            q[at(j, current, n)] = saved[j];
        }
    }

    transpositions
}

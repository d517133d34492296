//! This module provides a high-level, user-friendly API for computing the
//! eigendecomposition of a real symmetric matrix, `Q^T * A * Q = D`.
//!
//! The functions here accept and return [`faer`] dense matrix types and report
//! failures through [`EigenError`]. They are thin wrappers over the stateful
//! [`SymmetricEigensolver`], which works on flat buffers and sentinel returns;
//! use the core type directly when you need buffer-level control, repeated
//! solves without reallocation, or single-eigenvector extraction.

use crate::{
    algorithms::{EigenvectorMatrixType, SolveStatus, SortOrder},
    error::{EigenError, EigenErrorKind},
    solver::SymmetricEigensolver,
};
use faer::{Mat, MatRef};

/// Default QR iteration budget per matrix order.
///
/// Empirically the implicit-shift iteration converges in roughly `2N + 8`
/// outer iterations for dense random symmetric inputs, so a budget of `30 * N`
/// leaves a wide margin without risking unbounded loops on adversarial input.
pub const DEFAULT_MAX_ITERATIONS_PER_ORDER: u32 = 30;

/// The result of a successful symmetric eigendecomposition.
#[derive(Debug, Clone)]
pub struct Eigendecomposition {
    /// The eigenvalues, in the order requested by the [`SortOrder`] argument.
    pub eigenvalues: Vec<f64>,
    /// The orthogonal matrix Q whose i-th column is the eigenvector paired
    /// with `eigenvalues[i]`.
    pub eigenvectors: Mat<f64>,
    /// Number of outer QR iterations consumed.
    pub iterations: u32,
    /// Whether Q is a rotation or a reflection.
    pub matrix_type: EigenvectorMatrixType,
}

/// Computes the full eigendecomposition of the real symmetric matrix `matrix`.
///
/// Only the upper triangle of `matrix` (including the diagonal) is read; the
/// strict lower triangle is assumed to mirror it. The returned eigenvalues and
/// eigenvector columns are ordered according to `sort`.
///
/// The QR iteration budget is [`DEFAULT_MAX_ITERATIONS_PER_ORDER`] times the
/// matrix order; use [`eigh_with_max_iterations`] to control it explicitly.
///
/// # Example
///
/// ```rust
/// use faer::mat;
/// use symmetric_qr::{eigh, SortOrder};
///
/// let a = mat![[2.0, -1.0], [-1.0, 2.0]];
/// let decomposition = eigh(a.as_ref(), SortOrder::Increasing).unwrap();
/// assert!((decomposition.eigenvalues[0] - 1.0).abs() < 1e-14);
/// assert!((decomposition.eigenvalues[1] - 3.0).abs() < 1e-14);
/// ```
pub fn eigh(matrix: MatRef<'_, f64>, sort: SortOrder) -> Result<Eigendecomposition, EigenError> {
    let budget = DEFAULT_MAX_ITERATIONS_PER_ORDER.saturating_mul(matrix.nrows() as u32);
    eigh_with_max_iterations(matrix, sort, budget)
}

/// Computes the eigendecomposition with an explicit QR iteration budget.
///
/// Returns an error when the matrix is not square, has fewer than two rows, or
/// the iteration budget is exhausted before convergence. Non-convergence also
/// emits a warning through the [`log`] facade, since it usually indicates a
/// badly undersized budget rather than a property of the input.
pub fn eigh_with_max_iterations(
    matrix: MatRef<'_, f64>,
    sort: SortOrder,
    max_iterations: u32,
) -> Result<Eigendecomposition, EigenError> {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return Err(EigenErrorKind::NotSquare {
            nrows: n,
            ncols: matrix.ncols(),
        }
        .into());
    }
    if n < 2 {
        return Err(EigenErrorKind::TooSmall { size: n }.into());
    }

    // Flatten into the row-major layout the core solver operates on.
    let mut input = vec![0.0; n * n];
    for r in 0..n {
        for c in 0..n {
            input[r * n + c] = matrix[(r, c)];
        }
    }

    let mut solver = SymmetricEigensolver::new(n, max_iterations);
    let iterations = match solver.solve(&input, sort) {
        SolveStatus::Converged { iterations } => iterations,
        // `Inert` can only arise here from a zero iteration budget, which is
        // just the degenerate case of running out of iterations.
        SolveStatus::NoConvergence | SolveStatus::Inert => {
            log::warn!(
                "symmetric QR iteration on a {n}x{n} matrix did not converge \
                 within {max_iterations} iterations"
            );
            return Err(EigenErrorKind::NoConvergence { max_iterations }.into());
        }
    };

    let mut eigenvalues = vec![0.0; n];
    solver.eigenvalues(&mut eigenvalues);

    let mut q_flat = vec![0.0; n * n];
    solver.eigenvectors(&mut q_flat);
    let eigenvectors = Mat::from_fn(n, n, |i, j| q_flat[i * n + j]);

    Ok(Eigendecomposition {
        eigenvalues,
        eigenvectors,
        iterations,
        matrix_type: solver.eigenvector_matrix_type(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn test_eigh_rejects_non_square_input() {
        let a = Mat::<f64>::zeros(3, 2);
        let err = eigh(a.as_ref(), SortOrder::Unsorted).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Matrix is not square: 3 rows by 2 columns."
        );
    }

    #[test]
    fn test_eigh_rejects_trivial_order() {
        let a = mat![[5.0]];
        let err = eigh(a.as_ref(), SortOrder::Unsorted).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Matrix order 1 is too small: the solver requires at least a 2x2 matrix."
        );
    }

    #[test]
    fn test_eigh_reports_exhausted_budget() {
        // The 1D Laplacian stencil needs several sweeps; a budget of one outer
        // iteration cannot suffice for order 8.
        let n = 8;
        let a = Mat::from_fn(n, n, |i, j| {
            if i == j {
                2.0
            } else if i.abs_diff(j) == 1 {
                -1.0
            } else {
                0.0
            }
        });
        let err = eigh_with_max_iterations(a.as_ref(), SortOrder::Unsorted, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "QR iteration did not converge within 1 iterations."
        );
    }

    #[test]
    fn test_eigh_known_3x3_spectrum() {
        // Eigenvalues of the order-3 Laplacian stencil: 2 - sqrt(2), 2,
        // 2 + sqrt(2).
        let a = mat![[2.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0]];
        let decomposition = eigh(a.as_ref(), SortOrder::Increasing).unwrap();

        let sqrt2 = 2.0_f64.sqrt();
        let expected = [2.0 - sqrt2, 2.0, 2.0 + sqrt2];
        for (computed, reference) in decomposition.eigenvalues.iter().zip(expected.iter()) {
            assert!(
                (computed - reference).abs() < 1e-13,
                "eigenvalue {computed} vs {reference}"
            );
        }
    }

    #[test]
    fn test_eigh_decreasing_order() {
        let a = mat![[1.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 2.0]];
        let decomposition = eigh(a.as_ref(), SortOrder::Decreasing).unwrap();
        assert_eq!(decomposition.eigenvalues, vec![3.0, 2.0, 1.0]);
        assert_eq!(decomposition.iterations, 0);
    }
}

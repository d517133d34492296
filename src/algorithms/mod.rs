//! Numerical kernels for the symmetric eigenvalue solver.
//!
//! ** NOTE: We recommend using the high-level [`crate::solvers::eigh`] API or the
//! stateful [`crate::solver::SymmetricEigensolver`] instead. The functions in these
//! submodules operate on raw buffers and are intended for use cases where
//! fine-grained control over the individual pipeline stages is required.
//!
//! The decomposition runs as a pipeline of three stages, each implemented in its
//! own submodule:
//!
//! - **`tridiagonal`**: Reduces the symmetric input matrix to tridiagonal form via
//!   a sequence of Householder reflections. The reflection vectors are packed into
//!   the otherwise-unused lower triangle of the working buffer.
//! - **`qr`**: Iteratively drives the tridiagonal matrix toward diagonal form with
//!   implicit-shift QR sub-steps (Wilkinson shift, Givens rotations), recording
//!   every rotation for later eigenvector reconstruction.
//! - **`accumulate`**: Composes the recorded reflections and rotations into the
//!   orthogonal eigenvector matrix, either in bulk or one column at a time, and
//!   applies the optional eigenvalue-sort permutation with minimal copying.
//!
//! This module also defines the small plain-data types shared by the stages.

pub mod accumulate;
pub mod qr;
pub mod tridiagonal;

/// A single Givens rotation acting on the coordinate pair `(index, index + 1)`.
///
/// As a matrix, the rotation is the identity with the entries
/// `R(index, index) = cs`, `R(index, index + 1) = sn`,
/// `R(index + 1, index) = -sn` and `R(index + 1, index + 1) = cs`.
///
/// The QR iteration appends one of these per sub-step, in the exact order the
/// rotations are applied to the tridiagonal matrix. Replaying the log forward
/// reproduces the full composition; replaying it in reverse with the transposed
/// rotation inverts it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GivensRotation {
    /// The first of the two adjacent coordinates the rotation acts on.
    pub index: usize,
    /// Cosine of the rotation angle.
    pub cs: f64,
    /// Sine of the rotation angle.
    pub sn: f64,
}

impl GivensRotation {
    pub fn new(index: usize, cs: f64, sn: f64) -> Self {
        Self { index, cs, sn }
    }
}

/// Requested ordering of the eigenvalues (and, consistently, the eigenvectors).
///
/// With [`SortOrder::Unsorted`], eigenvalues are reported in the order in which
/// the QR iteration leaves them on the diagonal. The sorted variants use a
/// stable ordering: eigenvalues that compare equal retain their relative
/// diagonal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Largest eigenvalue first.
    Decreasing,
    /// Diagonal order, no permutation.
    #[default]
    Unsorted,
    /// Smallest eigenvalue first.
    Increasing,
}

/// Outcome of a [`crate::solver::SymmetricEigensolver::solve`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The tridiagonal matrix fully deflated after the given number of outer
    /// iterations. Zero iterations means the input was already diagonal after
    /// tridiagonalization.
    Converged {
        /// Number of outer QR iterations consumed.
        iterations: u32,
    },
    /// The iteration budget was exhausted before full deflation. The solver
    /// retains the partially reduced state, which remains queryable but is not
    /// a valid diagonalization.
    NoConvergence,
    /// The solver was constructed with an invalid size or a zero iteration
    /// budget and performs no work.
    Inert,
}

impl SolveStatus {
    /// Returns `true` for [`SolveStatus::Converged`].
    pub fn is_converged(&self) -> bool {
        matches!(self, SolveStatus::Converged { .. })
    }
}

/// Classification of the orthogonal eigenvector matrix Q.
///
/// The product of H Householder reflections is a rotation when H is even and a
/// reflection when H is odd; the solver applies exactly N−2 reflections, and the
/// Givens rotations never change the determinant. When eigenvector columns are
/// permuted for sorting, every transposition within a permutation cycle flips
/// the classification once more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum EigenvectorMatrixType {
    /// The solver is inert, or eigenvectors have not been computed since the
    /// last solve.
    Invalid = -1,
    /// det(Q) = -1.
    Reflection = 0,
    /// det(Q) = +1.
    Rotation = 1,
}

impl EigenvectorMatrixType {
    /// The classification implied by the reflection count alone: N−2
    /// reflections, so Q starts out as a rotation exactly when N is even.
    pub(crate) fn from_reflection_parity(size: usize) -> Self {
        if size % 2 == 0 {
            EigenvectorMatrixType::Rotation
        } else {
            EigenvectorMatrixType::Reflection
        }
    }

    /// Toggles rotation <-> reflection. [`EigenvectorMatrixType::Invalid`] is
    /// absorbing.
    pub(crate) fn flipped(self) -> Self {
        match self {
            EigenvectorMatrixType::Rotation => EigenvectorMatrixType::Reflection,
            EigenvectorMatrixType::Reflection => EigenvectorMatrixType::Rotation,
            EigenvectorMatrixType::Invalid => EigenvectorMatrixType::Invalid,
        }
    }

    /// The conventional integer encoding: -1 invalid, 0 reflection, +1 rotation.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_type_parity_from_size() {
        assert_eq!(
            EigenvectorMatrixType::from_reflection_parity(4),
            EigenvectorMatrixType::Rotation
        );
        assert_eq!(
            EigenvectorMatrixType::from_reflection_parity(5),
            EigenvectorMatrixType::Reflection
        );
    }

    #[test]
    fn test_matrix_type_flip_is_involutive() {
        let t = EigenvectorMatrixType::Rotation;
        assert_eq!(t.flipped().flipped(), t);
        assert_eq!(
            EigenvectorMatrixType::Invalid.flipped(),
            EigenvectorMatrixType::Invalid
        );
    }

    #[test]
    fn test_matrix_type_integer_encoding() {
        assert_eq!(EigenvectorMatrixType::Invalid.as_i32(), -1);
        assert_eq!(EigenvectorMatrixType::Reflection.as_i32(), 0);
        assert_eq!(EigenvectorMatrixType::Rotation.as_i32(), 1);
    }
}

//! This module defines the custom error types for the library.
//!
//! Only the high-level API in [`crate::solvers`] reports failures through
//! these types. The hot numerical core ([`crate::solver::SymmetricEigensolver`])
//! deliberately avoids error objects and encodes abnormal conditions as
//! sentinel returns and no-ops; the wrapper translates those sentinels into
//! proper errors at the API boundary.
//!
//! Using the [`thiserror`] crate allows us to create idiomatic error types
//! with minimal boilerplate.
use thiserror::Error;

/// Represents all possible errors that can occur in the high-level
/// eigendecomposition API.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct EigenError(#[from] EigenErrorKind);

/// Private enum containing the distinct kinds of errors.
/// This separation allows for a clean `Display` implementation via
/// [`thiserror`] while keeping the variant set free to evolve.
#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum EigenErrorKind {
    /// The input matrix is not square.
    #[error("Matrix is not square: {nrows} rows by {ncols} columns.")]
    NotSquare { nrows: usize, ncols: usize },

    /// The input matrix is too small for the solver, which requires N > 1.
    #[error("Matrix order {size} is too small: the solver requires at least a 2x2 matrix.")]
    TooSmall { size: usize },

    /// The QR iteration exhausted its budget before the tridiagonal matrix
    /// fully deflated.
    #[error("QR iteration did not converge within {max_iterations} iterations.")]
    NoConvergence { max_iterations: u32 },
}

// Manually implement PartialEq for the public error type.
// We compare the inner `EigenErrorKind`.
impl PartialEq for EigenError {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

// Unit tests to ensure error messages are formatted correctly.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_square_error_message() {
        let error = EigenError(EigenErrorKind::NotSquare { nrows: 4, ncols: 3 });
        assert_eq!(
            error.to_string(),
            "Matrix is not square: 4 rows by 3 columns."
        );
    }

    #[test]
    fn test_too_small_error_message() {
        let error = EigenError(EigenErrorKind::TooSmall { size: 1 });
        assert_eq!(
            error.to_string(),
            "Matrix order 1 is too small: the solver requires at least a 2x2 matrix."
        );
    }

    #[test]
    fn test_no_convergence_error_message() {
        let error = EigenError(EigenErrorKind::NoConvergence { max_iterations: 42 });
        assert_eq!(
            error.to_string(),
            "QR iteration did not converge within 42 iterations."
        );
    }
}

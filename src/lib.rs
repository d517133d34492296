//! Symmetric eigenvalue solver based on Householder tridiagonalization and
//! implicit-shift QR iteration.
//!
//! Given an N×N real symmetric matrix A (N > 1), this crate computes an
//! orthogonal matrix Q and a diagonal matrix D such that Qᵗ·A·Q = D, within a
//! bounded number of iterations. The implementation follows the classical
//! symmetric QR algorithm: the input is first reduced to tridiagonal form by a
//! sequence of Householder reflections, and the tridiagonal matrix is then
//! driven to diagonal form by implicit-shift QR steps with the Wilkinson shift.
//! Numerically, the residual E = Qᵗ·A·Q − D satisfies ‖E‖ ≈ u·‖A‖ in the
//! Frobenius norm, where u is the unit roundoff of `f64`.
//!
//! ## Two API levels
//!
//! **High-level** ([`eigh`], [`eigh_with_max_iterations`]): accepts a
//! [`faer`] matrix view, validates it, and returns an [`Eigendecomposition`]
//! or an [`error::EigenError`]. This is the interface most callers want.
//!
//! **Core** ([`SymmetricEigensolver`]): a stateful solver constructed once for
//! a fixed matrix order. All buffers are pre-sized at construction; repeated
//! solves on the same instance never allocate. Abnormal conditions are encoded
//! as sentinel returns and silent no-ops rather than errors, which keeps the
//! hot paths free of control-flow branching. This level also provides
//! single-eigenvector extraction ([`SymmetricEigensolver::eigenvector`]),
//! which reconstructs one column of Q in O(N²) work — useful when only a few
//! eigenvectors are needed, since building the full Q costs O(N³).
//!
//! ## Eigenvalue ordering
//!
//! Both levels accept a [`SortOrder`]. Sorting permutes eigenvalues and
//! eigenvector columns consistently, using a stable ordering (equal
//! eigenvalues keep their diagonal order) and a minimal-copy cyclic column
//! permutation. The solver also classifies Q as a rotation or a reflection
//! ([`EigenvectorMatrixType`]), accounting for the parity of both the
//! Householder reflections and the sort permutation.
//!
//! ## Example Usage
//!
//! ```rust
//! use symmetric_qr::{SortOrder, SymmetricEigensolver};
//!
//! // The order-3 second-difference stencil, row-major.
//! let a = [
//!     2.0, -1.0, 0.0,
//!     -1.0, 2.0, -1.0,
//!     0.0, -1.0, 2.0,
//! ];
//!
//! let mut solver = SymmetricEigensolver::new(3, 64);
//! let status = solver.solve(&a, SortOrder::Increasing);
//! assert!(status.is_converged());
//!
//! // Eigenvalues are 2 - sqrt(2), 2, 2 + sqrt(2).
//! let mut eigenvalues = [0.0; 3];
//! solver.eigenvalues(&mut eigenvalues);
//! assert!((eigenvalues[0] - (2.0 - 2.0_f64.sqrt())).abs() < 1e-13);
//! assert!((eigenvalues[1] - 2.0).abs() < 1e-13);
//! assert!((eigenvalues[2] - (2.0 + 2.0_f64.sqrt())).abs() < 1e-13);
//!
//! // A single eigenvector, without forming the full Q.
//! let mut v = [0.0; 3];
//! solver.eigenvector(0, &mut v);
//! // Check A*v = lambda*v for the smallest eigenvalue.
//! for r in 0..3 {
//!     let av: f64 = (0..3).map(|c| a[r * 3 + c] * v[c]).sum();
//!     assert!((av - eigenvalues[0] * v[r]).abs() < 1e-12);
//! }
//! ```
//!
//! ## Concurrency
//!
//! A solver instance owns all of its working state, including scratch buffers
//! reused by the eigenvector queries. Instances are not internally
//! synchronized: use one instance per thread, or external locking.

// Declare the modules that form the crate's API structure.
pub mod algorithms;
pub mod error;
pub mod solver;
pub mod solvers;

// Re-export the main API for convenient access.
pub use algorithms::{EigenvectorMatrixType, GivensRotation, SolveStatus, SortOrder};
pub use error::EigenError;
pub use solver::SymmetricEigensolver;
pub use solvers::{eigh, eigh_with_max_iterations, Eigendecomposition};

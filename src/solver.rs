//! The stateful symmetric eigensolver.
//!
//! [`SymmetricEigensolver`] owns every buffer the decomposition needs and is
//! constructed once for a fixed matrix order and iteration budget. A single
//! instance can solve any number of matrices of that order; each
//! [`SymmetricEigensolver::solve`] call copies the input, resets the rotation
//! log and permutation state, and runs the tridiagonalization followed by the
//! QR iteration. The query methods then read eigenvalues and reconstruct
//! eigenvectors from the retained factors.
//!
//! The design favors predictable, allocation-free numeric code over
//! error-object plumbing: invalid constructor arguments produce an inert solver
//! whose operations degrade to harmless no-ops and sentinel returns, and
//! out-of-range or wrong-length query arguments are ignored rather than
//! reported. Callers who prefer `Result`-based reporting should use
//! [`crate::solvers::eigh`], which wraps this type.
//!
//! # Thread safety
//!
//! One instance must not be shared between threads without external locking.
//! [`SymmetricEigensolver::eigenvectors`] and
//! [`SymmetricEigensolver::eigenvector`] take `&mut self` because they reuse
//! the internal scratch vectors; they are queries mathematically, but they are
//! not reentrant.

use crate::algorithms::{
    accumulate, qr, tridiagonal, EigenvectorMatrixType, GivensRotation, SolveStatus, SortOrder,
};

/// Iterative eigensolver for N×N real symmetric matrices, N > 1.
///
/// Computes an orthogonal Q and diagonal D with QᵗAQ = D by Householder
/// tridiagonalization followed by implicit-shift QR. See the
/// [crate docs](crate) for a usage example.
pub struct SymmetricEigensolver {
    /// Matrix order N, or 0 for an inert solver.
    size: usize,
    /// Outer-iteration budget for the QR phase.
    max_iterations: u32,

    /// N×N row-major working buffer. After a solve, the upper triangle holds
    /// the tridiagonal entries and the lower triangle holds the packed
    /// Householder reflections (see [`crate::algorithms::tridiagonal`]).
    matrix: Vec<f64>,
    /// Live tridiagonal entries, mutated in place by every QR sub-step.
    diagonal: Vec<f64>,
    superdiagonal: Vec<f64>,

    /// Chronological log of the Givens rotations applied by the QR phase.
    /// Capacity is reserved up front for the worst case of
    /// `max_iterations * (N - 1)` rotations.
    givens: Vec<GivensRotation>,

    /// Maps sorted position to original diagonal index. Only meaningful while
    /// `sort_active` is set.
    permutation: Vec<usize>,
    sort_active: bool,

    matrix_type: EigenvectorMatrixType,

    // Reusable scratch; no per-call allocation.
    visited: Vec<bool>,
    p: Vec<f64>,
    v: Vec<f64>,
    w: Vec<f64>,
}

impl SymmetricEigensolver {
    /// Creates a solver for matrices of order `size` with the given QR
    /// iteration budget.
    ///
    /// All internal buffers are allocated here; no later operation allocates.
    /// A `size` of 0 or 1, or a zero `max_iterations`, yields an inert solver:
    /// [`SymmetricEigensolver::solve`] returns [`SolveStatus::Inert`] and every
    /// query degrades to a no-op or sentinel.
    pub fn new(size: usize, max_iterations: u32) -> Self {
        if size > 1 && max_iterations > 0 {
            Self {
                size,
                max_iterations,
                matrix: vec![0.0; size * size],
                diagonal: vec![0.0; size],
                superdiagonal: vec![0.0; size - 1],
                givens: Vec::with_capacity(max_iterations as usize * (size - 1)),
                permutation: vec![0; size],
                sort_active: false,
                matrix_type: EigenvectorMatrixType::Invalid,
                visited: vec![false; size],
                p: vec![0.0; size],
                v: vec![0.0; size],
                w: vec![0.0; size],
            }
        } else {
            Self {
                size: 0,
                max_iterations: 0,
                matrix: Vec::new(),
                diagonal: Vec::new(),
                superdiagonal: Vec::new(),
                givens: Vec::new(),
                permutation: Vec::new(),
                sort_active: false,
                matrix_type: EigenvectorMatrixType::Invalid,
                visited: Vec::new(),
                p: Vec::new(),
                v: Vec::new(),
                w: Vec::new(),
            }
        }
    }

    /// The matrix order N the solver was constructed for, or 0 when inert.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Decomposes `input`, an N×N symmetric matrix in row-major order.
    ///
    /// Only the upper triangle of `input` (including the diagonal) is read; the
    /// strict lower triangle is assumed to mirror it. The eigenvalue ordering
    /// later reported by the query methods is controlled by `sort`.
    ///
    /// Returns [`SolveStatus::Converged`] with the number of outer iterations
    /// consumed, [`SolveStatus::NoConvergence`] when the budget runs out first
    /// (the partially reduced state remains queryable but is not a valid
    /// diagonalization), or [`SolveStatus::Inert`] for an inert solver.
    ///
    /// # Panics
    ///
    /// Panics if `input.len() != size * size` on a non-inert solver.
    pub fn solve(&mut self, input: &[f64], sort: SortOrder) -> SolveStatus {
        self.matrix_type = EigenvectorMatrixType::Invalid;
        self.sort_active = false;

        if self.size == 0 {
            return SolveStatus::Inert;
        }

        let n = self.size;
        assert_eq!(
            input.len(),
            n * n,
            "input must be a {n}x{n} row-major matrix"
        );

        self.matrix.copy_from_slice(input);
        tridiagonal::householder_tridiagonalize(
            &mut self.matrix,
            n,
            &mut self.diagonal,
            &mut self.superdiagonal,
            &mut self.p,
            &mut self.v,
            &mut self.w,
        );

        self.givens.clear();
        for iteration in 0..self.max_iterations {
            match qr::find_unreduced_block(&self.diagonal, &self.superdiagonal) {
                None => {
                    // Fully deflated: the diagonal now holds the eigenvalues.
                    self.compute_permutation(sort);
                    return SolveStatus::Converged {
                        iterations: iteration,
                    };
                }
                Some((imin, imax)) => {
                    qr::implicit_shift_step(
                        &mut self.diagonal,
                        &mut self.superdiagonal,
                        imin,
                        imax,
                        &mut self.givens,
                    );
                }
            }
        }

        SolveStatus::NoConvergence
    }

    /// Writes the eigenvalues of the last solved matrix into `out`, in the
    /// order requested by the last solve's sort argument.
    ///
    /// No-op when the solver is inert or `out` does not have length N.
    pub fn eigenvalues(&self, out: &mut [f64]) {
        if self.size == 0 || out.len() != self.size {
            return;
        }
        if self.sort_active {
            for (slot, &p) in out.iter_mut().zip(self.permutation.iter()) {
                *slot = self.diagonal[p];
            }
        } else {
            out.copy_from_slice(&self.diagonal);
        }
    }

    /// Returns the eigenvalue at position `c` (permutation-aware), or
    /// `f64::MAX` when the solver is inert or `c` is out of range.
    pub fn eigenvalue(&self, c: usize) -> f64 {
        if c >= self.size {
            return f64::MAX;
        }
        if self.sort_active {
            self.diagonal[self.permutation[c]]
        } else {
            self.diagonal[c]
        }
    }

    /// Fills `out` with the orthogonal matrix Q, row-major, whose columns are
    /// the eigenvectors in the same order as [`SymmetricEigensolver::eigenvalues`],
    /// and updates the matrix-type classification.
    ///
    /// The reflections are accumulated backward onto the identity, the rotation
    /// log is replayed in chronological order, and, when sorting is active, the
    /// columns are reordered by cyclic permutation with one saved column per
    /// cycle.
    ///
    /// No-op when the solver is inert or `out` does not have length N·N (the
    /// type classification is reset to invalid in that case).
    pub fn eigenvectors(&mut self, out: &mut [f64]) {
        self.matrix_type = EigenvectorMatrixType::Invalid;

        let n = self.size;
        if n == 0 || out.len() != n * n {
            return;
        }

        accumulate::fill_identity(out, n);
        accumulate::accumulate_householder(out, n, &self.matrix, &mut self.v, &mut self.w);
        accumulate::apply_givens_to_columns(out, n, &self.givens);

        self.matrix_type = EigenvectorMatrixType::from_reflection_parity(n);

        if self.sort_active {
            let transpositions =
                accumulate::permute_columns(out, n, &self.permutation, &mut self.visited, &mut self.p);
            if transpositions % 2 == 1 {
                self.matrix_type = self.matrix_type.flipped();
            }
        }
    }

    /// Computes the single eigenvector at column position `c`
    /// (permutation-aware) into `out`, without materializing Q.
    ///
    /// The rotation log is unwound in reverse with transposed rotations, then
    /// the reflections are replayed with descending index. The result matches
    /// column `c` of [`SymmetricEigensolver::eigenvectors`] to rounding.
    ///
    /// No-op when the solver is inert, `c` is out of range, or `out` does not
    /// have length N.
    pub fn eigenvector(&mut self, c: usize, out: &mut [f64]) {
        let n = self.size;
        if c >= n || out.len() != n {
            return;
        }

        let start = if self.sort_active {
            self.permutation[c]
        } else {
            c
        };
        accumulate::extract_column(&self.matrix, n, &self.givens, start, out, &mut self.p);
    }

    /// The classification of the eigenvector matrix produced by the most
    /// recent [`SymmetricEigensolver::eigenvectors`] call (or implied by the
    /// most recent converged solve): rotation, reflection, or invalid when the
    /// solver is inert or no decomposition is available.
    pub fn eigenvector_matrix_type(&self) -> EigenvectorMatrixType {
        self.matrix_type
    }

    /// Establishes the eigenvalue ordering after convergence and the baseline
    /// matrix-type classification.
    ///
    /// The permutation maps sorted position to original diagonal index. The
    /// sort is stable with the identity ordering as input, so eigenvalues that
    /// compare equal keep their diagonal order.
    fn compute_permutation(&mut self, sort: SortOrder) {
        self.matrix_type = EigenvectorMatrixType::from_reflection_parity(self.size);

        match sort {
            SortOrder::Unsorted => {
                self.sort_active = false;
            }
            SortOrder::Increasing => {
                self.reset_permutation();
                let diagonal = &self.diagonal;
                self.permutation
                    .sort_by(|&a, &b| diagonal[a].total_cmp(&diagonal[b]));
                self.sort_active = true;
            }
            SortOrder::Decreasing => {
                self.reset_permutation();
                let diagonal = &self.diagonal;
                self.permutation
                    .sort_by(|&a, &b| diagonal[b].total_cmp(&diagonal[a]));
                self.sort_active = true;
            }
        }
    }

    fn reset_permutation(&mut self) {
        for (i, slot) in self.permutation.iter_mut().enumerate() {
            *slot = i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inert_solver_is_harmless() {
        for mut solver in [
            SymmetricEigensolver::new(0, 100),
            SymmetricEigensolver::new(1, 100),
            SymmetricEigensolver::new(5, 0),
        ] {
            assert_eq!(solver.size(), 0);
            assert_eq!(solver.solve(&[], SortOrder::Increasing), SolveStatus::Inert);
            assert_eq!(solver.eigenvalue(0), f64::MAX);
            assert_eq!(
                solver.eigenvector_matrix_type(),
                EigenvectorMatrixType::Invalid
            );

            // Query buffers must be left untouched.
            let mut values = [7.0; 3];
            solver.eigenvalues(&mut values);
            assert_eq!(values, [7.0; 3]);
            let mut vectors = [7.0; 9];
            solver.eigenvectors(&mut vectors);
            assert_eq!(vectors, [7.0; 9]);
            let mut column = [7.0; 3];
            solver.eigenvector(0, &mut column);
            assert_eq!(column, [7.0; 3]);
        }
    }

    #[test]
    fn test_2x2_analytic_eigenvalues() {
        // [[2, 1], [1, 2]] has eigenvalues 1 and 3.
        let mut solver = SymmetricEigensolver::new(2, 16);
        let status = solver.solve(&[2.0, 1.0, 1.0, 2.0], SortOrder::Increasing);
        assert!(status.is_converged());

        let mut values = [0.0; 2];
        solver.eigenvalues(&mut values);
        assert!((values[0] - 1.0).abs() < 1e-14);
        assert!((values[1] - 3.0).abs() < 1e-14);
        assert!((solver.eigenvalue(0) - 1.0).abs() < 1e-14);
        assert!((solver.eigenvalue(1) - 3.0).abs() < 1e-14);
    }

    #[test]
    fn test_diagonal_input_converges_in_zero_iterations() {
        let n = 4;
        let mut input = vec![0.0; n * n];
        for d in 0..n {
            input[d * n + d] = (d + 1) as f64;
        }
        let mut solver = SymmetricEigensolver::new(n, 32);
        assert_eq!(
            solver.solve(&input, SortOrder::Unsorted),
            SolveStatus::Converged { iterations: 0 }
        );

        let mut values = vec![0.0; n];
        solver.eigenvalues(&mut values);
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_out_of_range_column_is_ignored() {
        let mut solver = SymmetricEigensolver::new(2, 16);
        solver.solve(&[2.0, 1.0, 1.0, 2.0], SortOrder::Unsorted);

        assert_eq!(solver.eigenvalue(2), f64::MAX);
        let mut column = [5.0; 2];
        solver.eigenvector(2, &mut column);
        assert_eq!(column, [5.0; 2]);
    }

    #[test]
    fn test_wrong_length_output_is_ignored() {
        let mut solver = SymmetricEigensolver::new(2, 16);
        solver.solve(&[2.0, 1.0, 1.0, 2.0], SortOrder::Unsorted);

        let mut short = [5.0; 1];
        solver.eigenvalues(&mut short);
        assert_eq!(short, [5.0; 1]);
        let mut wrong = [5.0; 3];
        solver.eigenvectors(&mut wrong);
        assert_eq!(wrong, [5.0; 3]);
    }

    #[test]
    fn test_solver_instance_is_reusable() {
        // The second solve must fully reset the rotation log and permutation
        // state left by the first.
        let mut solver = SymmetricEigensolver::new(2, 16);
        assert!(solver
            .solve(&[5.0, 2.0, 2.0, 1.0], SortOrder::Decreasing)
            .is_converged());

        assert!(solver
            .solve(&[4.0, 0.0, 0.0, 9.0], SortOrder::Unsorted)
            .is_converged());
        let mut values = [0.0; 2];
        solver.eigenvalues(&mut values);
        // Unsorted: diagonal order of the (already diagonal) second matrix.
        assert_eq!(values, [4.0, 9.0]);
    }

    #[test]
    fn test_stable_sort_keeps_tied_eigenvalues_in_diagonal_order() {
        // The identity matrix has a single eigenvalue of multiplicity N; the
        // sorted eigenvector order must then match the unsorted one exactly.
        let n = 4;
        let mut input = vec![0.0; n * n];
        for d in 0..n {
            input[d * n + d] = 1.0;
        }

        let mut solver = SymmetricEigensolver::new(n, 8);
        solver.solve(&input, SortOrder::Increasing);
        let mut sorted_q = vec![0.0; n * n];
        solver.eigenvectors(&mut sorted_q);

        solver.solve(&input, SortOrder::Unsorted);
        let mut unsorted_q = vec![0.0; n * n];
        solver.eigenvectors(&mut unsorted_q);

        assert_eq!(sorted_q, unsorted_q);
    }
}

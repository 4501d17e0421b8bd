use nalgebra::DMatrix;

use super::utils;

/// Closed shell density matrix P_ij = 2 sum_k C_ik C_jk over the `n_occupied` lowest
/// orbitals. Columns of `coefficients` must be sorted by ascending orbital energy.
pub fn compute_updated_density(coefficients: &DMatrix<f64>, n_occupied: usize) -> DMatrix<f64> {
    utils::symmetric_matrix(coefficients.nrows(), |i, j| {
        let mut sum = 0.0;
        for k in 0..n_occupied {
            sum += coefficients[(i, k)] * coefficients[(j, k)]
        }
        2.0 * sum
    })
}

use nalgebra::DMatrix;

use crate::{
    error::{Result, ScfError},
    integrals::{ElectronTensor, IntegralProvider},
};

/// The two-electron part G of the closed shell fock matrix:
///
///   G_ij = sum_kl P_kl [ (ij|lk) - 1/2 (ik|lj) ]
///
/// i.e. one full coulomb contraction and one half-weighted exchange contraction.
pub fn compute_electronic_hamiltonian<P: IntegralProvider>(
    density: &DMatrix<f64>,
    electron: &mut ElectronTensor<P>,
) -> Result<DMatrix<f64>> {
    let n_basis = electron.n_basis();
    if density.shape() != (n_basis, n_basis) {
        return Err(ScfError::DimensionMismatch {
            expected: n_basis,
            found: density.shape(),
        });
    }

    let mut hamiltonian = DMatrix::zeros(n_basis, n_basis);
    for (i, j) in itertools::iproduct!(0..n_basis, 0..n_basis) {
        let mut sum = 0.0;
        for (k, l) in itertools::iproduct!(0..n_basis, 0..n_basis) {
            let coulomb = electron.get(i, j, l, k)?;
            let exchange = electron.get(i, k, l, j)?;
            sum += density[(k, l)] * (coulomb - 0.5 * exchange);
        }
        hamiltonian[(i, j)] = sum;
    }

    Ok(hamiltonian)
}

/// F = T + V + G
pub fn compute_fock_matrix<P: IntegralProvider>(
    density: &DMatrix<f64>,
    kinetic: &DMatrix<f64>,
    nuclear: &DMatrix<f64>,
    electron: &mut ElectronTensor<P>,
) -> Result<DMatrix<f64>> {
    let electronic_hamiltonian = compute_electronic_hamiltonian(density, electron)?;

    for matrix in [kinetic, nuclear] {
        if matrix.shape() != electronic_hamiltonian.shape() {
            return Err(ScfError::DimensionMismatch {
                expected: electron.n_basis(),
                found: matrix.shape(),
            });
        }
    }

    Ok(kinetic + nuclear + electronic_hamiltonian)
}

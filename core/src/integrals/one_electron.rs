use nalgebra::DMatrix;

use crate::{
    error::{Result, ScfError},
    hf::utils,
    nucleus::Nucleus,
};

use super::IntegralProvider;

/// The overlap, kinetic and nuclear attraction matrices of a basis. Computed once per
/// calculation and never changed afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct OneElectronMatrices {
    overlap: DMatrix<f64>,
    kinetic: DMatrix<f64>,
    nuclear: DMatrix<f64>,
}

impl OneElectronMatrices {
    /// Wraps precomputed matrices. All three must be square and of the same size.
    pub fn new(
        overlap: DMatrix<f64>,
        kinetic: DMatrix<f64>,
        nuclear: DMatrix<f64>,
    ) -> Result<Self> {
        let n_basis = overlap.nrows();
        for matrix in [&overlap, &kinetic, &nuclear] {
            if matrix.shape() != (n_basis, n_basis) {
                return Err(ScfError::DimensionMismatch {
                    expected: n_basis,
                    found: matrix.shape(),
                });
            }
        }

        Ok(Self {
            overlap,
            kinetic,
            nuclear,
        })
    }

    /// Evaluates all one-electron integrals. The nuclear attraction matrix is the sum over
    /// the contributions of every nucleus.
    pub fn compute(provider: &impl IntegralProvider, nuclei: &[Nucleus]) -> Result<Self> {
        let overlap = compute_overlap_matrix(provider)?;
        log::debug!("overlap matrix: {overlap:0.4}");
        let kinetic = compute_kinetic_matrix(provider)?;
        log::debug!("kinetic matrix: {kinetic:0.4}");
        let nuclear = compute_nuclear_matrix(provider, nuclei)?;
        log::debug!("nuclear matrix: {nuclear:0.4}");

        Ok(Self {
            overlap,
            kinetic,
            nuclear,
        })
    }

    pub fn n_basis(&self) -> usize {
        self.overlap.nrows()
    }

    pub fn overlap(&self) -> &DMatrix<f64> {
        &self.overlap
    }

    pub fn kinetic(&self) -> &DMatrix<f64> {
        &self.kinetic
    }

    pub fn nuclear(&self) -> &DMatrix<f64> {
        &self.nuclear
    }

    /// T + V
    pub fn core_hamiltonian(&self) -> DMatrix<f64> {
        &self.kinetic + &self.nuclear
    }
}

pub fn compute_overlap_matrix(provider: &impl IntegralProvider) -> Result<DMatrix<f64>> {
    utils::try_symmetric_matrix(provider.n_basis(), |i, j| {
        let overlap_ij = provider.overlap(i, j)?;
        log::trace!("overlap ({i}{j}) = {overlap_ij}");
        Ok(overlap_ij)
    })
}

pub fn compute_kinetic_matrix(provider: &impl IntegralProvider) -> Result<DMatrix<f64>> {
    utils::try_symmetric_matrix(provider.n_basis(), |i, j| {
        let kinetic_ij = provider.kinetic(i, j)?;
        log::trace!("kinetic ({i}{j}) = {kinetic_ij}");
        Ok(kinetic_ij)
    })
}

pub fn compute_nuclear_matrix(
    provider: &impl IntegralProvider,
    nuclei: &[Nucleus],
) -> Result<DMatrix<f64>> {
    utils::try_symmetric_matrix(provider.n_basis(), |i, j| {
        let mut nuclear_ij = 0.0;
        for nucleus in nuclei {
            nuclear_ij += provider.nuclear(i, j, nucleus.position(), nucleus.charge())?;
        }
        log::trace!("nuclear ({i}{j}) = {nuclear_ij}");
        Ok(nuclear_ij)
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, Vector3};

    use crate::{
        error::ScfError,
        integrals::GaussianIntegrals,
        nucleus::Nucleus,
        test_utils::hydrogen_sto3g,
    };

    use super::OneElectronMatrices;

    #[test]
    fn hydrogen_molecule() {
        let first = hydrogen_sto3g(Vector3::zeros());
        let second = first.centered_at(Vector3::new(0.0, 0.0, 1.4));
        let basis = [first, second];
        let nuclei = [
            Nucleus::new(Vector3::zeros(), 1.0),
            Nucleus::new(Vector3::new(0.0, 0.0, 1.4), 1.0),
        ];

        let matrices = OneElectronMatrices::compute(&GaussianIntegrals::new(&basis), &nuclei).unwrap();

        assert_eq!(matrices.n_basis(), 2);
        assert_eq!(matrices.overlap(), &matrices.overlap().transpose());
        assert_eq!(matrices.nuclear(), &matrices.nuclear().transpose());

        // Szabo & Ostlund, eq. 3.229
        let core = matrices.core_hamiltonian();
        assert_relative_eq!(core[(0, 0)], -1.1204, epsilon = 5e-4);
        assert_relative_eq!(core[(0, 1)], -0.9584, epsilon = 5e-4);
        assert_relative_eq!(core[(1, 1)], -1.1204, epsilon = 5e-4);
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let result = OneElectronMatrices::new(
            DMatrix::identity(2, 2),
            DMatrix::zeros(2, 2),
            DMatrix::zeros(3, 3),
        );

        assert_eq!(
            result,
            Err(ScfError::DimensionMismatch {
                expected: 2,
                found: (3, 3)
            })
        );
    }
}

use nalgebra::Vector3;

use crate::error::IntegralError;

pub mod electron_tensor;
pub mod gaussian;
pub mod index;
pub mod one_electron;

pub use electron_tensor::ElectronTensor;
pub use gaussian::GaussianIntegrals;
pub use index::IntegralIndex;
pub use one_electron::OneElectronMatrices;

/// Source of the integrals over a fixed basis. Functions are referred to by their index
/// in the basis, so the solver never sees the basis functions themselves.
///
/// All functions must be pure: asking twice for the same integral yields the same value.
pub trait IntegralProvider {
    /// The number of basis functions this provider integrates over.
    fn n_basis(&self) -> usize;

    /// Calculate the overlap integral between two basis functions.
    fn overlap(&self, a: usize, b: usize) -> Result<f64, IntegralError>;

    /// Calculate the kinetic energy integral between two basis functions.
    fn kinetic(&self, a: usize, b: usize) -> Result<f64, IntegralError>;

    /// Calculate the attraction between two basis functions and a single nucleus.
    fn nuclear(
        &self,
        a: usize,
        b: usize,
        center: &Vector3<f64>,
        charge: f64,
    ) -> Result<f64, IntegralError>;

    /// Calculate the electron-electron repulsion integral (ab|cd).
    fn repulsion(&self, a: usize, b: usize, c: usize, d: usize) -> Result<f64, IntegralError>;
}

impl<T: IntegralProvider + ?Sized> IntegralProvider for &T {
    fn n_basis(&self) -> usize {
        (**self).n_basis()
    }

    fn overlap(&self, a: usize, b: usize) -> Result<f64, IntegralError> {
        (**self).overlap(a, b)
    }

    fn kinetic(&self, a: usize, b: usize) -> Result<f64, IntegralError> {
        (**self).kinetic(a, b)
    }

    fn nuclear(
        &self,
        a: usize,
        b: usize,
        center: &Vector3<f64>,
        charge: f64,
    ) -> Result<f64, IntegralError> {
        (**self).nuclear(a, b, center, charge)
    }

    fn repulsion(&self, a: usize, b: usize, c: usize, d: usize) -> Result<f64, IntegralError> {
        (**self).repulsion(a, b, c, d)
    }
}

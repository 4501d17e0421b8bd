use serde::{Deserialize, Serialize};

use crate::{
    basis::BasisFunction,
    config::ScfConfig,
    error::Result,
    hf::{ScfOutput, ScfSolver},
    integrals::{ElectronTensor, GaussianIntegrals, OneElectronMatrices},
    nucleus::Nucleus,
};

/// A neutral molecule: its nuclei and the basis functions describing its electrons.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MolecularSystem {
    basis: Vec<BasisFunction>,
    nuclei: Vec<Nucleus>,
}

impl MolecularSystem {
    pub fn new(basis: Vec<BasisFunction>, nuclei: Vec<Nucleus>) -> Self {
        Self { basis, nuclei }
    }

    pub fn basis(&self) -> &[BasisFunction] {
        &self.basis
    }

    pub fn nuclei(&self) -> &[Nucleus] {
        &self.nuclei
    }

    pub fn n_basis(&self) -> usize {
        self.basis.len()
    }

    /// Returns the number of total electrons in the system, one per unit of nuclear charge
    pub fn n_electrons(&self) -> usize {
        self.nuclei
            .iter()
            .map(|nucleus| nucleus.charge())
            .sum::<f64>()
            .round()
            .max(0.0) as usize
    }

    /// The integral provider for this system's basis
    pub fn integrals(&self) -> GaussianIntegrals<'_> {
        GaussianIntegrals::new(&self.basis)
    }
}

/// Computes all integrals of `system` and runs a closed shell SCF calculation on it.
pub fn restricted_hartree_fock(system: &MolecularSystem, config: &ScfConfig) -> Result<ScfOutput> {
    let integrals = system.integrals();
    let matrices = OneElectronMatrices::compute(&integrals, system.nuclei())?;
    let mut electron = ElectronTensor::new(integrals);

    ScfSolver::new(*config).run(&matrices, &mut electron, system.nuclei(), system.n_electrons())
}

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A fixed point charge in a molecule.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Nucleus {
    pub(crate) position: Vector3<f64>,
    pub(crate) charge: f64,
}

impl Nucleus {
    pub fn new(position: Vector3<f64>, charge: f64) -> Self {
        Self { position, charge }
    }

    /// Returns the charge of this nucleus
    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }
}

/// Coulomb repulsion between every unique pair of nuclei.
pub fn nuclear_repulsion(nuclei: &[Nucleus]) -> f64 {
    let n_nuclei = nuclei.len();

    let mut potential = 0.0;
    for a in 0..n_nuclei {
        for b in a + 1..n_nuclei {
            potential += nuclei[a].charge * nuclei[b].charge
                / (nuclei[b].position - nuclei[a].position).norm()
        }
    }
    potential
}

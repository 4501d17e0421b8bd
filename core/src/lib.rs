//! Closed shell (restricted) hartree fock over a fixed basis.
//!
//! The integrals are supplied by an [`IntegralProvider`](integrals::IntegralProvider);
//! two-electron integrals are cached once per permutation class in an
//! [`ElectronTensor`](integrals::ElectronTensor) and the SCF loop lives in
//! [`ScfSolver`](hf::ScfSolver).
pub mod basis;
pub mod config;
pub mod error;
pub mod hf;
pub mod integrals;
pub mod nucleus;
pub mod system;

pub use error::{IntegralError, ScfError};
pub use system::{restricted_hartree_fock, MolecularSystem};

pub mod testing {
    use std::{error::Error, fs::File, path::Path};

    use nalgebra::Vector3;
    use serde::{Deserialize, Serialize};

    use crate::{
        basis::{BasisFunction, ContractedGaussian},
        nucleus::Nucleus,
        system::MolecularSystem,
    };

    /// STO-3G hydrogen 1s
    pub fn hydrogen_sto3g(position: Vector3<f64>) -> BasisFunction {
        BasisFunction::new(
            ContractedGaussian::s_type(&[
                (0.154329, 3.425251),
                (0.535328, 0.623914),
                (0.444635, 0.168855),
            ]),
            position,
        )
    }

    #[derive(Serialize, Deserialize)]
    pub struct TestInstance {
        pub name: String,
        system: MolecularSystem,
    }

    impl TestInstance {
        pub fn new(name: String, system: MolecularSystem) -> Self {
            Self { name, system }
        }

        /// Linear chain of `n_atoms` hydrogen atoms, 1.4 bohr apart
        pub fn hydrogen_chain(n_atoms: usize) -> Self {
            let positions = (0..n_atoms)
                .map(|i| Vector3::new(0.0, 0.0, 1.4 * i as f64))
                .collect::<Vec<_>>();

            let system = MolecularSystem::new(
                positions.iter().copied().map(hydrogen_sto3g).collect(),
                positions
                    .iter()
                    .map(|&position| Nucleus::new(position, 1.0))
                    .collect(),
            );

            Self::new(format!("H{n_atoms}"), system)
        }

        pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
            Ok(serde_json::to_writer(
                File::options()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(path)?,
                self,
            )?)
        }

        pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
            Ok(serde_json::from_reader(File::open(path)?)?)
        }

        pub fn system(&self) -> &MolecularSystem {
            &self.system
        }
    }

}

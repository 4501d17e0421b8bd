use std::{error::Error, fmt, fs::File, path::Path};

use nalgebra::Vector3;
use serde::Deserialize;

use crate::{
    basis::{BasisFunction, ContractedGaussian, Gaussian},
    nucleus::Nucleus,
    system::MolecularSystem,
};

/// Represents a full system in a config file: the nuclei and the basis functions placed
/// around them.
#[derive(Deserialize)]
pub struct ConfigSystem {
    nuclei: Vec<ConfigNucleus>,
    basis: Vec<ConfigBasisFunction>,
}

#[derive(Deserialize)]
struct ConfigNucleus {
    position: Vec<f64>,
    charge: f64,
}

#[derive(Deserialize)]
struct ConfigBasisFunction {
    center: Vec<f64>,
    primitives: Vec<ConfigPrimitive>,
}

#[derive(Deserialize)]
struct ConfigPrimitive {
    coefficient: f64,
    exponent: f64,
    #[serde(default)]
    angular: (i32, i32, i32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A position didn't have exactly three coordinates.
    InvalidPosition(Vec<f64>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPosition(coordinates) => {
                write!(f, "expected x, y, z coordinates, found {coordinates:?}")
            }
        }
    }
}

impl Error for ConfigError {}

impl ConfigSystem {
    /// Reads a system from a json file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        Ok(serde_json::from_reader(File::open(path)?)?)
    }
}

fn position(coordinates: Vec<f64>) -> Result<Vector3<f64>, ConfigError> {
    if let &[x, y, z] = coordinates.as_slice() {
        return Ok(Vector3::new(x, y, z));
    }
    Err(ConfigError::InvalidPosition(coordinates))
}

impl TryFrom<ConfigSystem> for MolecularSystem {
    type Error = ConfigError;

    fn try_from(value: ConfigSystem) -> Result<Self, Self::Error> {
        let ConfigSystem { nuclei, basis } = value;

        let nuclei = nuclei
            .into_iter()
            .map(|nucleus| Ok(Nucleus::new(position(nucleus.position)?, nucleus.charge)))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let basis = basis
            .into_iter()
            .map(|function| {
                let contraction = function
                    .primitives
                    .iter()
                    .map(|primitive| Gaussian {
                        exponent: primitive.exponent,
                        coefficient: primitive.coefficient,
                        angular: primitive.angular,
                    })
                    .collect();

                Ok(BasisFunction::new(
                    ContractedGaussian(contraction),
                    position(function.center)?,
                ))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(MolecularSystem::new(basis, nuclei))
    }
}

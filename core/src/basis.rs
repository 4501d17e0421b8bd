mod functions;

pub use functions::{BasisFunction, ContractedGaussian, Gaussian};

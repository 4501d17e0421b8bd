pub mod density;
pub mod fock;
pub mod orthogonalize;
pub mod rhf;
pub(crate) mod utils;

pub use rhf::{ScfOutput, ScfSolver, ScfStatus};

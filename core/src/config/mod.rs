mod molecule;
mod scf;

pub use molecule::{ConfigError, ConfigSystem};
pub use scf::ScfConfig;

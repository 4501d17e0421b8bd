use serde::{Deserialize, Serialize};

/// Settings of the SCF loop.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScfConfig {
    /// the maximum number of iterations to try before giving up. At least one iteration
    /// is always performed.
    pub max_iterations: usize,
    /// if the total energy changes by less than this between two iterations, the system
    /// is considered converged
    pub convergence_threshold: f64,
    /// overlap eigenvalues at or below this mark the basis as linearly dependent
    pub degeneracy_threshold: f64,
}

impl ScfConfig {
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;
    pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 1e-5;
    pub const DEFAULT_DEGENERACY_THRESHOLD: f64 = 1e-8;
}

impl Default for ScfConfig {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            convergence_threshold: Self::DEFAULT_CONVERGENCE_THRESHOLD,
            degeneracy_threshold: Self::DEFAULT_DEGENERACY_THRESHOLD,
        }
    }
}

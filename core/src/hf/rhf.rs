use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::{
    config::ScfConfig,
    error::{Result, ScfError},
    integrals::{ElectronTensor, IntegralProvider, OneElectronMatrices},
    nucleus::{self, Nucleus},
};

use super::{density, fock, orthogonalize, utils};

/// Where the SCF loop currently is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ScfStatus {
    Initializing,
    Iterating,
    /// The total energy changed by less than the threshold between two iterations.
    Converged,
    /// The iteration cap was reached before the energy settled. The result is still
    /// the last one computed, it is up to the caller whether to use it.
    Exhausted,
}

impl ScfStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Converged | Self::Exhausted)
    }
}

/// Progress of one SCF run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ScfState {
    iteration: usize,
    energies: Vec<f64>,
    status: ScfStatus,
}

impl ScfState {
    fn new() -> Self {
        Self {
            iteration: 0,
            energies: Vec::new(),
            status: ScfStatus::Initializing,
        }
    }

    fn iteration(&self) -> usize {
        self.iteration
    }

    fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// Records the total energy of the current iteration and moves to the next state.
    ///
    /// The first two iterations never converge: there is no meaningful energy
    /// difference to a zero initial density yet.
    fn record(&mut self, energy: f64, config: &ScfConfig) {
        let converged = self.iteration > 1
            && self
                .energies
                .last()
                .is_some_and(|previous| (energy - previous).abs() < config.convergence_threshold);

        self.energies.push(energy);
        self.iteration += 1;

        self.status = if converged {
            ScfStatus::Converged
        } else if self.iteration >= config.max_iterations {
            ScfStatus::Exhausted
        } else {
            ScfStatus::Iterating
        };
    }
}

/// The output of a restricted hartree fock calculation
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ScfOutput {
    /// how the loop ended, either converged or exhausted
    pub status: ScfStatus,
    /// the orbital energies of the last iteration, sorted in ascending order
    pub orbital_energies: Vec<f64>,
    /// orbital coefficients; column k belongs to `orbital_energies[k]`
    pub coefficients: DMatrix<f64>,
    /// the density built from the last set of orbitals
    pub density: DMatrix<f64>,
    /// The electronic energy of the system
    pub electronic_energy: f64,
    /// The nuclear repulsion energy
    pub nuclear_repulsion: f64,
    /// The number of doubly occupied orbitals
    pub n_occupied: usize,
    /// How many iterations were run
    pub iterations: usize,
    /// the total energy of every iteration, in order
    pub energy_history: Vec<f64>,
}

impl ScfOutput {
    pub fn total_energy(&self) -> f64 {
        self.electronic_energy + self.nuclear_repulsion
    }

    pub fn is_converged(&self) -> bool {
        self.status == ScfStatus::Converged
    }

    /// Energy of the highest occupied orbital
    pub fn homo(&self) -> Option<f64> {
        self.n_occupied
            .checked_sub(1)
            .and_then(|index| self.orbital_energies.get(index).copied())
    }

    /// Energy of the lowest unoccupied orbital
    pub fn lumo(&self) -> Option<f64> {
        self.orbital_energies.get(self.n_occupied).copied()
    }
}

/// Electronic energy E = 1/2 sum_ij P_ji (H_ij + F_ij) of a density and the fock matrix
/// built from it.
pub fn compute_electronic_energy(
    density: &DMatrix<f64>,
    core_hamiltonian: &DMatrix<f64>,
    fock: &DMatrix<f64>,
) -> f64 {
    0.5 * (density * (core_hamiltonian + fock)).trace()
}

/// Closed shell SCF solver. Starts from a zero density and iterates
/// fock matrix -> orbitals -> density until the total energy settles.
#[derive(Clone, Debug, Default)]
pub struct ScfSolver {
    config: ScfConfig,
}

impl ScfSolver {
    pub fn new(config: ScfConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScfConfig {
        &self.config
    }

    /// Runs the SCF loop.
    ///
    /// Setup errors (degenerate overlap, odd electron count, mismatched sizes, integral
    /// failures) are returned as `Err`. Not converging is not an error: the output is
    /// tagged [`ScfStatus::Exhausted`] instead.
    pub fn run<P: IntegralProvider>(
        &self,
        matrices: &OneElectronMatrices,
        electron: &mut ElectronTensor<P>,
        nuclei: &[Nucleus],
        n_electrons: usize,
    ) -> Result<ScfOutput> {
        let n_basis = matrices.n_basis();
        if electron.n_basis() != n_basis {
            return Err(ScfError::DimensionMismatch {
                expected: n_basis,
                found: (electron.n_basis(), electron.n_basis()),
            });
        }
        if n_electrons % 2 != 0 {
            return Err(ScfError::OddElectronCount(n_electrons));
        }
        let n_occupied = n_electrons / 2;
        if n_occupied > n_basis {
            return Err(ScfError::TooManyElectrons {
                n_electrons,
                n_basis,
            });
        }

        let config = ScfConfig {
            max_iterations: self.config.max_iterations.max(1),
            ..self.config
        };

        let transform =
            orthogonalize::canonical_orthogonalization(matrices.overlap(), config.degeneracy_threshold)?;

        let nuclear_repulsion = nucleus::nuclear_repulsion(nuclei);
        log::debug!("nuclear repulsion energy: {nuclear_repulsion}");

        // no integral evaluations inside of the loop
        electron.fill()?;

        let core_hamiltonian = matrices.core_hamiltonian();

        let mut state = ScfState::new();
        let mut density = DMatrix::zeros(n_basis, n_basis);
        let mut coefficients = DMatrix::zeros(n_basis, n_basis);
        let mut orbital_energies = DVector::zeros(n_basis);
        let mut electronic_energy = 0.0;

        state.status = ScfStatus::Iterating;
        while !state.status.is_terminal() {
            let fock = fock::compute_fock_matrix(
                &density,
                matrices.kinetic(),
                matrices.nuclear(),
                electron,
            )?;

            let transformed_fock = transform.transpose() * (&fock * &transform);
            let (transformed_coefficients, energies) = utils::sorted_eigs(transformed_fock);
            coefficients = &transform * transformed_coefficients;
            orbital_energies = energies;

            // with the density the fock matrix was built from
            electronic_energy = compute_electronic_energy(&density, &core_hamiltonian, &fock);
            let total_energy = electronic_energy + nuclear_repulsion;

            density = density::compute_updated_density(&coefficients, n_occupied);

            let change = state
                .energies()
                .last()
                .map_or(f64::NAN, |previous| total_energy - previous);
            log::info!(
                "iteration {:<4} - total energy {total_energy:1.8}. energy change {change:1.4e}",
                state.iteration()
            );

            state.record(total_energy, &config);
        }

        match state.status {
            ScfStatus::Converged => {
                log::info!("scf converged after {} iterations", state.iteration)
            }
            _ => log::warn!(
                "scf did not converge within {} iterations",
                config.max_iterations
            ),
        }

        let ScfState {
            iteration,
            energies,
            status,
        } = state;

        Ok(ScfOutput {
            status,
            orbital_energies: orbital_energies.as_slice().to_vec(),
            coefficients,
            density,
            electronic_energy,
            nuclear_repulsion,
            n_occupied,
            iterations: iteration,
            energy_history: energies,
        })
    }
}

use std::{error::Error, fmt};

pub type Result<T> = std::result::Result<T, ScfError>;

/// Errors raised by an [`IntegralProvider`](crate::integrals::IntegralProvider) while
/// evaluating a single integral.
#[derive(Clone, Debug, PartialEq)]
pub enum IntegralError {
    /// The basis function at this index has a primitive with non-zero angular momentum,
    /// which the provider cannot integrate.
    UnsupportedAngularMomentum {
        function: usize,
        angular: (i32, i32, i32),
    },
    /// A primitive exponent was zero, negative or not finite.
    InvalidExponent { function: usize, exponent: f64 },
    /// The basis function has no primitives at all.
    EmptyContraction { function: usize },
    /// The provider was asked about a function it doesn't know.
    UnknownFunction { function: usize, n_basis: usize },
}

impl fmt::Display for IntegralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedAngularMomentum { function, angular } => write!(
                f,
                "basis function {function} has unsupported angular momentum {angular:?}"
            ),
            Self::InvalidExponent { function, exponent } => write!(
                f,
                "basis function {function} has an invalid exponent {exponent}"
            ),
            Self::EmptyContraction { function } => {
                write!(f, "basis function {function} has no primitives")
            }
            Self::UnknownFunction { function, n_basis } => write!(
                f,
                "basis function {function} does not exist in a basis of {n_basis} functions"
            ),
        }
    }
}

impl Error for IntegralError {}

/// Everything that can go wrong while setting up or running a restricted
/// hartree fock calculation.
///
/// Running out of iterations is deliberately missing here: an exhausted solver still
/// returns its best result, tagged with [`ScfStatus::Exhausted`](crate::hf::ScfStatus).
#[derive(Clone, Debug, PartialEq)]
pub enum ScfError {
    /// An integral or matrix index was outside of `[0, n_basis)`.
    IndexOutOfRange {
        index: (usize, usize, usize, usize),
        n_basis: usize,
    },
    /// The overlap matrix has an eigenvalue at or below the threshold, i.e. the basis
    /// is (nearly) linearly dependent.
    NumericalDegeneracy { eigenvalue: f64, threshold: f64 },
    /// The integral provider failed. Passed on unchanged.
    IntegralProvider(IntegralError),
    /// A matrix didn't have the `n_basis x n_basis` shape the calculation expects.
    DimensionMismatch {
        expected: usize,
        found: (usize, usize),
    },
    /// Closed shell calculations need an even number of electrons.
    OddElectronCount(usize),
    /// There are more doubly occupied orbitals than basis functions.
    TooManyElectrons { n_electrons: usize, n_basis: usize },
}

impl fmt::Display for ScfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange {
                index: (i, j, k, l),
                n_basis,
            } => write!(
                f,
                "index ({i} {j}|{k} {l}) is out of range for {n_basis} basis functions"
            ),
            Self::NumericalDegeneracy {
                eigenvalue,
                threshold,
            } => write!(
                f,
                "overlap matrix is nearly singular: eigenvalue {eigenvalue:e} <= {threshold:e}"
            ),
            Self::IntegralProvider(err) => write!(f, "integral evaluation failed: {err}"),
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "expected a {expected}x{expected} matrix, found {}x{}",
                found.0, found.1
            ),
            Self::OddElectronCount(n) => {
                write!(f, "closed shell calculation requires an even electron count, got {n}")
            }
            Self::TooManyElectrons {
                n_electrons,
                n_basis,
            } => write!(
                f,
                "{n_electrons} electrons do not fit into {n_basis} doubly occupied orbitals"
            ),
        }
    }
}

impl Error for ScfError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IntegralProvider(err) => Some(err),
            _ => None,
        }
    }
}

impl From<IntegralError> for ScfError {
    fn from(value: IntegralError) -> Self {
        Self::IntegralProvider(value)
    }
}

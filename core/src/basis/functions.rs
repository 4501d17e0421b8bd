use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Function of the form K*x^i*y^j*z^k*exp(-alpha*r^2)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    pub exponent: f64,
    /// The contraction coefficient of this gaussian, without normalization
    pub coefficient: f64,
    /// (i, j, k) exponents of polynomial terms
    pub angular: (i32, i32, i32),
}

impl Gaussian {
    /// A spherical (s-type) primitive.
    pub fn s(coefficient: f64, exponent: f64) -> Self {
        Self {
            exponent,
            coefficient,
            angular: (0, 0, 0),
        }
    }

    /// Normalization constant of a primitive cartesian gaussian.
    pub fn norm(exponent: f64, angular: (i32, i32, i32)) -> f64 {
        let (i, j, k) = angular;

        (std::f64::consts::FRAC_2_PI * exponent)
            .powi(3)
            .sqrt()
            .sqrt()
            * f64::sqrt(
                (8.0 * exponent).powi(i + j + k)
                    / ((i + 1..=2 * i).product::<i32>()
                        * (j + 1..=2 * j).product::<i32>()
                        * (k + 1..=2 * k).product::<i32>()) as f64,
            )
    }

    /// The contraction coefficient multiplied by the normalization constant.
    pub fn scaled_coefficient(&self) -> f64 {
        self.coefficient * Self::norm(self.exponent, self.angular)
    }
}

/// Linear combination of many [`Gaussian`]s
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractedGaussian(pub SmallVec<[Gaussian; 6]>);

impl ContractedGaussian {
    /// Contract s-type primitives given as `(coefficient, exponent)` pairs.
    pub fn s_type(primitives: &[(f64, f64)]) -> Self {
        Self(
            primitives
                .iter()
                .map(|&(coefficient, exponent)| Gaussian::s(coefficient, exponent))
                .collect(),
        )
    }

    pub fn primitives(&self) -> &[Gaussian] {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasisFunction {
    /// The contraction this basis function is made of
    pub contracted_gaussian: ContractedGaussian,
    /// The position of this basis function, in natural units
    pub position: Vector3<f64>,
}

impl BasisFunction {
    pub fn new(contracted_gaussian: ContractedGaussian, position: Vector3<f64>) -> Self {
        Self {
            contracted_gaussian,
            position,
        }
    }

    /// Returns a copy of this basis function moved to another center.
    pub fn centered_at(&self, position: Vector3<f64>) -> Self {
        Self {
            contracted_gaussian: self.contracted_gaussian.clone(),
            position,
        }
    }
}

//! Closed-form integrals over contracted s-type gaussians.
//!
//! Reference:
//!
//! [1] Szabo, A.; Ostlund, N. S. Modern Quantum Chemistry, Appendix A.
use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::{
    basis::{BasisFunction, Gaussian},
    error::IntegralError,
};

use super::IntegralProvider;

/// Integrates over a basis of contracted s-type gaussians. Primitives are normalized
/// before their contraction coefficient is applied.
#[derive(Clone, Copy, Debug)]
pub struct GaussianIntegrals<'a> {
    basis: &'a [BasisFunction],
}

impl<'a> GaussianIntegrals<'a> {
    pub fn new(basis: &'a [BasisFunction]) -> Self {
        Self { basis }
    }

    pub fn basis(&self) -> &'a [BasisFunction] {
        self.basis
    }

    /// Looks up a basis function and checks that it can be integrated.
    fn function(&self, index: usize) -> Result<&'a BasisFunction, IntegralError> {
        let function = self
            .basis
            .get(index)
            .ok_or(IntegralError::UnknownFunction {
                function: index,
                n_basis: self.basis.len(),
            })?;

        let primitives = function.contracted_gaussian.primitives();
        if primitives.is_empty() {
            return Err(IntegralError::EmptyContraction { function: index });
        }

        for primitive in primitives {
            if primitive.angular != (0, 0, 0) {
                return Err(IntegralError::UnsupportedAngularMomentum {
                    function: index,
                    angular: primitive.angular,
                });
            }
            if !(primitive.exponent.is_finite() && primitive.exponent > 0.0) {
                return Err(IntegralError::InvalidExponent {
                    function: index,
                    exponent: primitive.exponent,
                });
            }
        }

        Ok(function)
    }
}

impl IntegralProvider for GaussianIntegrals<'_> {
    fn n_basis(&self) -> usize {
        self.basis.len()
    }

    fn overlap(&self, a: usize, b: usize) -> Result<f64, IntegralError> {
        let (basis_a, basis_b) = (self.function(a)?, self.function(b)?);
        let diff = basis_b.position - basis_a.position;

        let mut output = 0.0;
        for (primitive_a, primitive_b) in itertools::iproduct!(
            basis_a.contracted_gaussian.primitives(),
            basis_b.contracted_gaussian.primitives()
        ) {
            output += primitive_a.scaled_coefficient()
                * primitive_b.scaled_coefficient()
                * primitive_overlap(primitive_a, primitive_b, diff);
        }
        Ok(output)
    }

    fn kinetic(&self, a: usize, b: usize) -> Result<f64, IntegralError> {
        let (basis_a, basis_b) = (self.function(a)?, self.function(b)?);
        let diff = basis_b.position - basis_a.position;

        let mut output = 0.0;
        for (primitive_a, primitive_b) in itertools::iproduct!(
            basis_a.contracted_gaussian.primitives(),
            basis_b.contracted_gaussian.primitives()
        ) {
            output += primitive_a.scaled_coefficient()
                * primitive_b.scaled_coefficient()
                * primitive_kinetic(primitive_a, primitive_b, diff);
        }
        Ok(output)
    }

    fn nuclear(
        &self,
        a: usize,
        b: usize,
        center: &Vector3<f64>,
        charge: f64,
    ) -> Result<f64, IntegralError> {
        let (basis_a, basis_b) = (self.function(a)?, self.function(b)?);
        let diff = basis_b.position - basis_a.position;

        let mut output = 0.0;
        for (primitive_a, primitive_b) in itertools::iproduct!(
            basis_a.contracted_gaussian.primitives(),
            basis_b.contracted_gaussian.primitives()
        ) {
            let product_center = product_center(
                basis_a.position,
                primitive_a.exponent,
                basis_b.position,
                primitive_b.exponent,
            );

            output += primitive_a.scaled_coefficient()
                * primitive_b.scaled_coefficient()
                * primitive_nuclear(
                    primitive_a,
                    primitive_b,
                    diff,
                    center - product_center,
                    charge,
                );
        }
        Ok(output)
    }

    fn repulsion(&self, a: usize, b: usize, c: usize, d: usize) -> Result<f64, IntegralError> {
        let (basis_a, basis_b) = (self.function(a)?, self.function(b)?);
        let (basis_c, basis_d) = (self.function(c)?, self.function(d)?);
        let diff_ab = basis_b.position - basis_a.position;
        let diff_cd = basis_d.position - basis_c.position;

        let mut output = 0.0;
        for (primitive_a, primitive_b) in itertools::iproduct!(
            basis_a.contracted_gaussian.primitives(),
            basis_b.contracted_gaussian.primitives()
        ) {
            let product_center_ab = product_center(
                basis_a.position,
                primitive_a.exponent,
                basis_b.position,
                primitive_b.exponent,
            );
            let coefficient_ab = primitive_a.scaled_coefficient() * primitive_b.scaled_coefficient();

            for (primitive_c, primitive_d) in itertools::iproduct!(
                basis_c.contracted_gaussian.primitives(),
                basis_d.contracted_gaussian.primitives()
            ) {
                let product_center_cd = product_center(
                    basis_c.position,
                    primitive_c.exponent,
                    basis_d.position,
                    primitive_d.exponent,
                );

                output += coefficient_ab
                    * primitive_c.scaled_coefficient()
                    * primitive_d.scaled_coefficient()
                    * primitive_electron(
                        (primitive_a, primitive_b, primitive_c, primitive_d),
                        diff_ab,
                        diff_cd,
                        product_center_cd - product_center_ab,
                    );
            }
        }
        Ok(output)
    }
}

fn primitive_overlap(primitive_a: &Gaussian, primitive_b: &Gaussian, diff: Vector3<f64>) -> f64 {
    let (a, b) = (primitive_a.exponent, primitive_b.exponent);
    let p = a + b;

    (PI / p).powi(3).sqrt() * (-a * b / p * diff.norm_squared()).exp()
}

fn primitive_kinetic(primitive_a: &Gaussian, primitive_b: &Gaussian, diff: Vector3<f64>) -> f64 {
    let (a, b) = (primitive_a.exponent, primitive_b.exponent);
    let reduced = a * b / (a + b);

    reduced
        * (3.0 - 2.0 * reduced * diff.norm_squared())
        * primitive_overlap(primitive_a, primitive_b, diff)
}

fn primitive_nuclear(
    primitive_a: &Gaussian,
    primitive_b: &Gaussian,
    // difference of the positions of the two basis functions: b - a
    diff: Vector3<f64>,
    // nucleus position relative to the product center
    diff_nucleus: Vector3<f64>,
    charge: f64,
) -> f64 {
    let (a, b) = (primitive_a.exponent, primitive_b.exponent);
    let p = a + b;

    -charge * std::f64::consts::TAU / p
        * (-a * b / p * diff.norm_squared()).exp()
        * boys_zero(p * diff_nucleus.norm_squared())
}

fn primitive_electron(
    (primitive_a, primitive_b, primitive_c, primitive_d): (&Gaussian, &Gaussian, &Gaussian, &Gaussian),
    diff_ab: Vector3<f64>,
    diff_cd: Vector3<f64>,
    diff_product: Vector3<f64>,
) -> f64 {
    let (a, b) = (primitive_a.exponent, primitive_b.exponent);
    let (c, d) = (primitive_c.exponent, primitive_d.exponent);

    let p = a + b;
    let q = c + d;
    let alpha = p * q / (p + q);

    2.0 * PI.powi(5).sqrt() * (p * q * (p + q).sqrt()).recip()
        * (-a * b / p * diff_ab.norm_squared() - c * d / q * diff_cd.norm_squared()).exp()
        * boys_zero(alpha * diff_product.norm_squared())
}

/// Zeroth order boys function, F0(t) = integral_0^1 exp(-t x^2) dx.
pub(crate) fn boys_zero(t: f64) -> f64 {
    // F0(0) = 1, the incomplete gamma form divides by sqrt(t)
    if t == 0.0 {
        1.0
    } else {
        boys::exact::boys(0, t)
    }
}

#[inline(always)]
fn product_center(
    a_pos: Vector3<f64>,
    a_exp: f64,
    b_pos: Vector3<f64>,
    b_exp: f64,
) -> Vector3<f64> {
    (a_exp * a_pos + b_exp * b_pos) / (a_exp + b_exp)
}

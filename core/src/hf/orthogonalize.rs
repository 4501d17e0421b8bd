use nalgebra::DMatrix;

use crate::error::{Result, ScfError};

use super::utils;

/// Canonical orthogonalization: diagonalizes S = U s U^T and returns X = U s^(-1/2), which
/// satisfies X^T S X = 1.
///
/// Fails with [`ScfError::NumericalDegeneracy`] if an eigenvalue of S is at or below
/// `threshold`, because the basis is then (nearly) linearly dependent.
pub fn canonical_orthogonalization(overlap: &DMatrix<f64>, threshold: f64) -> Result<DMatrix<f64>> {
    let n_basis = overlap.nrows();
    if overlap.ncols() != n_basis {
        return Err(ScfError::DimensionMismatch {
            expected: n_basis,
            found: overlap.shape(),
        });
    }

    let (u, s) = utils::sorted_eigs(overlap.clone());

    // ascending, so the first eigenvalue is the smallest
    if let Some(&smallest) = s.iter().next() {
        log::debug!("smallest overlap eigenvalue: {smallest:1.4e}");
        if !(smallest > threshold) {
            return Err(ScfError::NumericalDegeneracy {
                eigenvalue: smallest,
                threshold,
            });
        }
    }

    let s_inv_sqrt = s.map(|eigenvalue| eigenvalue.sqrt().recip());
    Ok(u * DMatrix::from_diagonal(&s_inv_sqrt))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;
    use rand::{Rng, SeedableRng};

    use crate::error::ScfError;

    use super::canonical_orthogonalization;

    fn random_spd(n: usize, rng: &mut impl Rng) -> DMatrix<f64> {
        let a = DMatrix::from_fn(n, n, |_, _| rng.gen_range(-1.0..1.0));
        &a * a.transpose() + DMatrix::identity(n, n) * 0.1
    }

    #[test]
    fn transform_orthonormalizes_the_overlap() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        for n in 1..8 {
            let overlap = random_spd(n, &mut rng);
            let x = canonical_orthogonalization(&overlap, 1e-10).unwrap();

            assert_relative_eq!(
                x.transpose() * &overlap * &x,
                DMatrix::identity(n, n),
                epsilon = 1e-8
            );
        }
    }

    #[test]
    fn identity_is_left_alone() {
        let x = canonical_orthogonalization(&DMatrix::identity(3, 3), 1e-8).unwrap();
        assert_relative_eq!(x.transpose() * &x, DMatrix::identity(3, 3), epsilon = 1e-12);
    }

    #[test]
    fn linearly_dependent_basis_is_rejected() {
        // two identical basis functions
        let overlap = DMatrix::from_element(2, 2, 1.0);

        match canonical_orthogonalization(&overlap, 1e-8) {
            Err(ScfError::NumericalDegeneracy { eigenvalue, threshold }) => {
                assert!(eigenvalue.abs() < 1e-12);
                assert_eq!(threshold, 1e-8);
            }
            other => panic!("expected a degeneracy error, got {other:?}"),
        }
    }

    #[test]
    fn threshold_is_configurable() {
        let overlap = DMatrix::from_row_slice(2, 2, &[1.0, 0.99, 0.99, 1.0]);

        assert!(canonical_orthogonalization(&overlap, 1e-3).is_ok());
        assert!(matches!(
            canonical_orthogonalization(&overlap, 0.05),
            Err(ScfError::NumericalDegeneracy { .. })
        ));
    }

    #[test]
    fn empty_basis_has_an_empty_transform() {
        let x = canonical_orthogonalization(&DMatrix::zeros(0, 0), 1e-8).unwrap();
        assert_eq!(x.shape(), (0, 0));
    }
}

use nalgebra::{DMatrix, DVector, SymmetricEigen};

#[inline(always)]
/// Create a symmetric, square matrix. Function is only run for upper triangle of the matrix
pub(crate) fn symmetric_matrix(
    n: usize,
    mut func: impl FnMut(usize, usize) -> f64,
) -> DMatrix<f64> {
    let m = DMatrix::from_fn(n, n, |i, j| if i <= j { func(i, j) } else { 0.0 });
    DMatrix::from_fn(n, n, |i, j| if i <= j { m[(i, j)] } else { m[(j, i)] })
}

/// Same as [`symmetric_matrix`], but stops at the first error.
pub(crate) fn try_symmetric_matrix<E>(
    n: usize,
    mut func: impl FnMut(usize, usize) -> Result<f64, E>,
) -> Result<DMatrix<f64>, E> {
    let mut m = DMatrix::zeros(n, n);
    for j in 0..n {
        for i in 0..=j {
            let value = func(i, j)?;
            m[(i, j)] = value;
            m[(j, i)] = value;
        }
    }
    Ok(m)
}

/// Eigendecomposition of a symmetric matrix, with the eigenpairs sorted by ascending
/// eigenvalue. Occupation of orbitals relies on this order.
pub(crate) fn sorted_eigs(matrix: DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
    // nalgebra can't decompose an empty matrix
    if matrix.is_empty() {
        return (DMatrix::zeros(0, 0), DVector::zeros(0));
    }

    let eigs = SymmetricEigen::new(matrix);

    let mut val_vec_pairs = eigs
        .eigenvalues
        .iter()
        .copied()
        .zip(eigs.eigenvectors.column_iter())
        .collect::<Vec<_>>();

    val_vec_pairs.sort_unstable_by(|(a, _), (b, _)| a.total_cmp(b));

    let (values, vectors): (Vec<_>, Vec<_>) = val_vec_pairs.into_iter().unzip();

    (
        DMatrix::from_columns(&vectors),
        DVector::from_column_slice(&values),
    )
}

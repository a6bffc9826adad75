//! Thin wrappers over `ndarray-linalg` for the dense linear algebra HOOI
//! needs: forming Gram matrices, taking leading eigenvectors of a symmetric
//! matrix, and QR-factoring a random Gaussian matrix for factor
//! initialization.
//!
//! This is the "BLAS/LAPACK assumed available" dependency named in the
//! external-interfaces section: the teacher's own `ndarray` dependency
//! already carries the `blas`/`matrixmultiply-threading` features for dense
//! matmul, and `ndarray-linalg` layers eigendecomposition/SVD/QR on top of
//! it the same way, so it is the one new dependency this crate adds.

use crate::error::{CoreError, CoreResult};
use ndarray::{Array2, ArrayView2};
use ndarray_linalg::{Eigh, Lapack, QR, UPLO};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;

/// `a^T * a`, the smaller of the two Gram matrices a TTMc result admits
/// (useful when `a` has far more rows than columns).
pub fn gram<VT>(a: ArrayView2<VT>) -> Array2<VT>
where
    VT: Lapack,
{
    a.t().dot(&a)
}

/// `a * a^T`, the Gram matrix HOOI's per-mode update needs: its leading
/// eigenvectors span the same `rank`-dimensional column space a truncated
/// SVD of `a` would give, but without forming the SVD (HOSVD's classic
/// shortcut). `a` here is one mode's TTMc unfolding, with that mode's
/// *original* dimension as rows, so this Gram matrix is square in that
/// dimension rather than in the contracted rank.
pub fn outer_gram<VT>(a: ArrayView2<VT>) -> Array2<VT>
where
    VT: Lapack,
{
    a.dot(&a.t())
}

/// The `rank` eigenvectors of symmetric `a` with largest eigenvalues, as
/// columns of the returned matrix, ordered by decreasing eigenvalue.
///
/// `ndarray-linalg`'s `Eigh` returns eigenvalues ascending; this just
/// reverses the column order rather than re-deriving the decomposition.
pub fn leading_eigenvectors<VT>(a: ArrayView2<VT>, rank: usize) -> CoreResult<Array2<VT>>
where
    VT: Lapack,
{
    let (nrows, ncols) = a.dim();
    if nrows != ncols {
        return Err(CoreError::BadInput(
            "leading_eigenvectors requires a square matrix".into(),
        ));
    }
    if rank > nrows {
        return Err(CoreError::BadInput(format!(
            "requested rank {} exceeds matrix dimension {}",
            rank, nrows
        )));
    }
    let (_eigenvalues, eigenvectors) = a
        .to_owned()
        .eigh(UPLO::Upper)
        .map_err(|e| CoreError::NumericalFailure(format!("eigh failed: {}", e)))?;
    let ncols_total = eigenvectors.ncols();
    let top = eigenvectors.slice(ndarray::s![.., (ncols_total - rank)..ncols_total]);
    let mut out = top.to_owned();
    // reverse columns so the largest eigenvalue's vector comes first
    for i in 0..(rank / 2) {
        let (mut a, mut b) = out.multi_slice_mut((
            ndarray::s![.., i],
            ndarray::s![.., rank - 1 - i],
        ));
        ndarray::Zip::from(&mut a).and(&mut b).for_each(std::mem::swap);
    }
    Ok(out)
}

/// Thin QR factorization: `a = q * r` with `q` having orthonormal columns.
pub fn qr_thin<VT>(a: ArrayView2<VT>) -> CoreResult<(Array2<VT>, Array2<VT>)>
where
    VT: Lapack,
{
    a.to_owned()
        .qr()
        .map_err(|e| CoreError::NumericalFailure(format!("QR failed: {}", e)))
}

/// Draws an `nrows x ncols` matrix of standard-normal entries (from `rng`,
/// so a seeded [`TuckerConfig`](crate::config::TuckerConfig) reproduces the
/// same factors) and returns the orthonormal factor of its QR decomposition
/// — a randomized-range-find initializer for one mode's factor matrix.
pub fn random_orthonormal<VT, R>(nrows: usize, ncols: usize, rng: &mut R) -> CoreResult<Array2<VT>>
where
    VT: Lapack,
    R: Rng + ?Sized,
    StandardNormal: ndarray_rand::rand_distr::Distribution<VT>,
{
    if ncols > nrows {
        return Err(CoreError::BadInput(format!(
            "cannot orthonormalize {} columns into {} rows",
            ncols, nrows
        )));
    }
    let gaussian = Array2::<VT>::random_using((nrows, ncols), StandardNormal, rng);
    let (q, _r) = qr_thin(gaussian.view())?;
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn gram_is_symmetric() {
        let a = array![[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let g = gram(a.view());
        assert_eq!(g.shape(), &[2, 2]);
        assert!((g[[0, 1]] - g[[1, 0]]).abs() < 1e-9);
    }

    #[test]
    fn leading_eigenvectors_rejects_non_square() {
        let a = array![[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert!(leading_eigenvectors(a.view(), 1).is_err());
    }
}

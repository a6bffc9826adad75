use crate::structs::axis::{Axes, Axis};
use crate::traits::{IdxType, RawParts, Tensor, ValType};
use ndarray::Array1;

/// A sparse matrix in coordinate format: parallel row/column index arrays
/// plus a value array. This is what [`crate::structs::tensor::COOTensor::unfold`]
/// produces — an unfolded sparse tensor is still sparse, just reshaped to
/// two modes, so there is no reason to materialize it densely.
#[derive(Clone, Debug)]
pub struct SparseMatrix<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    inner: SparseMatrixInner<IT, VT>,
}

#[derive(Clone, Debug)]
pub struct SparseMatrixInner<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    pub shape: Axes<IT>,
    pub rows: Array1<IT>,
    pub cols: Array1<IT>,
    pub values: Array1<VT>,
}

impl<IT, VT> SparseMatrix<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    pub fn new(nrows: Axis<IT>, ncols: Axis<IT>, rows: Array1<IT>, cols: Array1<IT>, values: Array1<VT>) -> Self {
        let mut shape = Axes::new();
        shape.push(nrows);
        shape.push(ncols);
        Self {
            inner: SparseMatrixInner {
                shape,
                rows,
                cols,
                values,
            },
        }
    }

    #[inline]
    pub fn rows(&self) -> &Array1<IT> {
        &self.inner.rows
    }

    #[inline]
    pub fn cols(&self) -> &Array1<IT> {
        &self.inner.cols
    }

    #[inline]
    pub fn values(&self) -> &Array1<VT> {
        &self.inner.values
    }
}

impl<IT, VT> Tensor<IT, VT> for SparseMatrix<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    fn name(&self) -> Option<&str> {
        None
    }

    fn num_non_zeros(&self) -> usize {
        self.inner.values.len()
    }

    fn shape(&self) -> &[Axis<IT>] {
        &self.inner.shape
    }
}

impl<IT, VT> RawParts for SparseMatrix<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    type Inner = SparseMatrixInner<IT, VT>;

    unsafe fn from_raw_parts(raw_parts: Self::Inner) -> Self {
        Self { inner: raw_parts }
    }

    fn into_raw_parts(self) -> Self::Inner {
        self.inner
    }

    fn raw_parts(&self) -> &Self::Inner {
        &self.inner
    }

    unsafe fn raw_parts_mut(&mut self) -> &mut Self::Inner {
        &mut self.inner
    }
}

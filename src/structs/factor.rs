use crate::structs::axis::{Axes, Axis};
use crate::traits::{IdxType, Tensor, ValType};
use num::ToPrimitive;
use ndarray::Array2;
use std::ops::{Deref, DerefMut};

/// A dense factor matrix, or Tucker's core tensor unfolded along one mode:
/// `Array2<VT>` with `nrows` tied to a tensor mode's extent and `ncols` tied
/// to its Tucker rank.
///
/// `Deref`s to `Array2<VT>` so the full `ndarray` API (slicing, `.dot`,
/// iteration) is available without re-exporting it method by method.
#[derive(Clone, Debug)]
pub struct DenseFactor<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    shape: Axes<IT>,
    data: Array2<VT>,
}

impl<IT, VT> DenseFactor<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    pub fn zeros(row_axis: Axis<IT>, col_axis: Axis<IT>) -> Self {
        let nrows = row_axis.len().to_usize().expect("axis fits in usize");
        let ncols = col_axis.len().to_usize().expect("axis fits in usize");
        let mut shape = Axes::new();
        shape.push(row_axis);
        shape.push(col_axis);
        Self {
            shape,
            data: Array2::zeros((nrows, ncols)),
        }
    }

    pub fn from_array(row_axis: Axis<IT>, col_axis: Axis<IT>, data: Array2<VT>) -> Self {
        let mut shape = Axes::new();
        shape.push(row_axis);
        shape.push(col_axis);
        Self { shape, data }
    }

    pub fn rank(&self) -> usize {
        self.data.ncols()
    }
}

impl<IT, VT> Tensor<IT, VT> for DenseFactor<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    fn name(&self) -> Option<&str> {
        None
    }

    fn num_non_zeros(&self) -> usize {
        self.data.len()
    }

    fn shape(&self) -> &[Axis<IT>] {
        &self.shape
    }
}

impl<IT, VT> Deref for DenseFactor<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    type Target = Array2<VT>;
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<IT, VT> DerefMut for DenseFactor<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

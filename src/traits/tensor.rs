use super::{IdxType, ValType};
use crate::structs::axis::Axis;

/// Common behavior of a tensor, sparse or dense.
///
/// `IT` is the type of indices used to address the tensor's modes.
/// `VT` is the type of the values stored inside it.
///
/// This trait does not prescribe a storage layout; see [`crate::structs`] for
/// the concrete tensor and matrix types (COO, CSF, dense).
pub trait Tensor<IT, VT>: Clone + Send + Sync
where
    IT: IdxType,
    VT: ValType,
{
    /// The name of the tensor, if one was given.
    fn name(&self) -> Option<&str>;

    /// The number of modes (axes) of the tensor.
    ///
    /// 1 means a vector, 2 a matrix, and so on.
    fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// The number of elements physically stored.
    ///
    /// For a sparse tensor this is the number of nonzeros; for a dense one it
    /// is the product of the dimensions.
    fn num_non_zeros(&self) -> usize;

    /// The extent of each mode.
    fn shape(&self) -> &[Axis<IT>];
}

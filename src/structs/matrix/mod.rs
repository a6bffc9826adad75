//! Matrix storage used alongside sparse tensors: the sparse unfoldings of a
//! [`crate::structs::tensor::COOTensor`], and (in [`crate::structs::factor`])
//! the dense factor/core matrices produced by Tucker decomposition.

mod sparse;

pub use sparse::{SparseMatrix, SparseMatrixInner};

//! Sparse tensor storage.

mod coo;
mod coo_iter;
mod coo_iter_mut;

pub use coo::{COOTensor, COOTensorInner};
pub use coo_iter::COOIter;
pub use coo_iter_mut::COOIterMut;

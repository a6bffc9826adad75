//! Algorithms for sparse tensor analytics: CSF allocation planning,
//! fused tensor-times-matrix-chain, the HOOI Tucker driver built on top of
//! it, dense linear algebra helpers, the completion/prediction formula, and
//! random tensor construction.

pub mod dense;
pub mod hooi;
pub mod planner;
pub mod predictor;
pub mod tensor;
pub mod ttmc;
pub mod vector;

//! `stensor` is a core library for sparse higher-order tensor analytics:
//! COO/CSF storage, a fused tensor-times-matrix-chain (TTMc) kernel, and a
//! Higher-Order Orthogonal Iteration (HOOI) driver for Tucker decomposition.
//!
//! It consists of the following modules:
//! * `algos`: algorithms (allocation planning, TTMc, HOOI, dense linear
//!   algebra glue, the completion predictor).
//! * `structs`: data structures (COO tensors, CSF forests, factor matrices,
//!   the thread workspace).
//! * `traits`: Rust traits for scalars, tensors, iterators, etc.
//! * `config`: run configuration threaded by reference (no global state).
//! * `error`: the crate's error taxonomy.
//! * `utils`: logging and lightweight tracing, used by the algorithms above.
//! * `macros`: ad-hoc timing macros used during development.
//!
//! This library does not read or write tensor files, parse command-line
//! options, or report run statistics — it operates on in-memory tensors and
//! returns a [`structs::tucker_result::TuckerResult`]; those concerns belong
//! to a caller.

pub mod algos;
pub mod config;
pub mod error;
#[macro_use]
pub mod macros;
pub mod structs;
pub mod traits;
pub mod utils;

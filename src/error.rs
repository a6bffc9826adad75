//! Crate-wide error taxonomy.
//!
//! Call sites that only need to propagate failures with `?` can still reach
//! for `anyhow::Result` around these; `CoreError` itself stays a plain,
//! matchable enum so a caller can tell a bad shape apart from a numerical
//! breakdown without string-matching a message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A caller-supplied argument was malformed: wrong rank, index out of an
    /// axis's range, mismatched shapes between operands.
    #[error("bad input: {0}")]
    BadInput(String),

    /// An allocation or a dimension product overflowed available capacity.
    #[error("out of memory")]
    OutOfMemory,

    /// A numerical routine (SVD, eigendecomposition, QR) failed to converge
    /// or encountered a value it cannot represent (index overflow, NaN).
    #[error("numerical failure: {0}")]
    NumericalFailure(String),

    /// The requested combination of options is recognized but not
    /// implemented.
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

//! Algorithms related to sparse tensors.
//!
//! Sorting, deduplication, and mode unfolding live as methods directly on
//! [`crate::structs::tensor::COOTensor`]; this module holds free functions
//! that build tensors rather than operate on existing ones.

mod create_random_coo;

pub use create_random_coo::create_random_coo;

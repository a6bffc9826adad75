pub use smallvec::smallvec;

/// The number of modes we keep inline before [`SmallVec`] spills to the heap.
///
/// Sparse tensors in practice rarely exceed a handful of modes; this bound
/// keeps per-mode metadata (shapes, permutations, fiber pointers) off the
/// heap for the common case while still supporting higher-order tensors.
pub const MAX_MODES: usize = 8;

/// Re-export [`smallvec::SmallVec`] with a fixed inline capacity of [`MAX_MODES`].
pub type SmallVec<T> = smallvec::SmallVec<[T; MAX_MODES]>;

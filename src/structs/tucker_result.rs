use crate::structs::factor::DenseFactor;
use crate::structs::vec::SmallVec;
use crate::traits::{IdxType, ValType};

/// The output of a Tucker decomposition: a (typically dense, always much
/// smaller) core tensor and one factor matrix per mode.
///
/// The core is stored as its mode-0 unfolding, since `algos::hooi::Hooi`
/// only ever needs it in that form (for computing the fit) or can reshape
/// it lazily; keeping one unfolding avoids carrying a full `ArrayD` type
/// parameter through the decomposition loop.
#[derive(Clone, Debug)]
pub struct TuckerResult<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    /// The core's mode-0 unfolding: `rank[0]` rows, and columns in
    /// row-major multi-index order over the remaining modes in ascending
    /// mode order (mode 1 most significant, the last mode least
    /// significant) — independent of whichever mode order the allocation
    /// planner's CSF tree happened to traverse internally.
    pub core_unfold0: DenseFactor<IT, VT>,
    pub factors: SmallVec<DenseFactor<IT, VT>>,
    pub ranks: SmallVec<usize>,
    /// Frobenius norm of the core, `||core||`, tracked across iterations as
    /// the convergence signal (not a normalized goodness-of-fit ratio).
    pub fit: f64,
    pub iterations: usize,
}

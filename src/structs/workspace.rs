use crate::traits::ValType;

/// Per-thread scratch space reused across TTMc/HOOI iterations instead of
/// allocating fresh buffers on every call.
///
/// Sized and named after `completion.c`'s `tc_ws_alloc` (`SPLATT_TC_ALS`
/// case): a prediction buffer of length `rank`, a contraction accumulator of
/// length `rank^2` (one partial TTMc result per thread before reduction),
/// and a normal-equations buffer of length `rank^2` (the Gram-matrix-style
/// accumulation HOOI's per-mode solve needs).
#[derive(Clone, Debug)]
pub struct ThreadScratch<VT>
where
    VT: ValType,
{
    pub predict_buf: Vec<VT>,
    pub contract_buf: Vec<VT>,
    pub normal_eq_buf: Vec<VT>,
}

impl<VT> ThreadScratch<VT>
where
    VT: ValType,
{
    pub fn alloc(rank: usize) -> Self {
        Self {
            predict_buf: vec![VT::zero(); rank],
            contract_buf: vec![VT::zero(); rank * rank],
            normal_eq_buf: vec![VT::zero(); rank * rank],
        }
    }

    pub fn reset(&mut self) {
        self.predict_buf.iter_mut().for_each(|v| *v = VT::zero());
        self.contract_buf.iter_mut().for_each(|v| *v = VT::zero());
        self.normal_eq_buf.iter_mut().for_each(|v| *v = VT::zero());
    }
}

/// One [`ThreadScratch`] per worker thread, sized for the largest rank used
/// by the current decomposition.
#[derive(Clone, Debug)]
pub struct Workspace<VT>
where
    VT: ValType,
{
    threads: Vec<ThreadScratch<VT>>,
}

impl<VT> Workspace<VT>
where
    VT: ValType,
{
    pub fn alloc(nthreads: usize, max_rank: usize) -> Self {
        Self {
            threads: (0..nthreads.max(1))
                .map(|_| ThreadScratch::alloc(max_rank))
                .collect(),
        }
    }

    pub fn nthreads(&self) -> usize {
        self.threads.len()
    }

    pub fn scratch(&mut self, thread_idx: usize) -> &mut ThreadScratch<VT> {
        &mut self.threads[thread_idx]
    }

    /// All per-thread slots at once, for callers that want to parallelize
    /// over threads directly (e.g. `rayon`'s `par_iter_mut`) instead of
    /// indexing one slot at a time.
    pub fn threads_mut(&mut self) -> &mut [ThreadScratch<VT>] {
        &mut self.threads
    }

    pub fn reset_all(&mut self) {
        self.threads.iter_mut().for_each(ThreadScratch::reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_sizes_match_tc_ws_alloc_convention() {
        let ws = Workspace::<f64>::alloc(4, 10);
        assert_eq!(ws.nthreads(), 4);
    }

    #[test]
    fn scratch_buffers_sized_by_rank() {
        let mut ws = Workspace::<f64>::alloc(1, 5);
        let s = ws.scratch(0);
        assert_eq!(s.predict_buf.len(), 5);
        assert_eq!(s.contract_buf.len(), 25);
        assert_eq!(s.normal_eq_buf.len(), 25);
    }
}

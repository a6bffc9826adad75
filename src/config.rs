//! Run configuration for a Tucker decomposition, threaded by reference
//! instead of the process-global policy switches the original CLI tool used
//! (`cmd_tucker.c`'s `static` option state).

use crate::structs::vec::SmallVec;

/// Target Tucker rank, either the same for every mode or given per mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RankSpec {
    Uniform(usize),
    PerMode(SmallVec<usize>),
}

impl RankSpec {
    /// Resolves this spec into one rank per mode of an `nmodes`-mode tensor.
    pub fn resolve(&self, nmodes: usize) -> SmallVec<usize> {
        match self {
            RankSpec::Uniform(r) => std::iter::repeat(*r).take(nmodes).collect(),
            RankSpec::PerMode(ranks) => ranks.clone(),
        }
    }
}

/// How the allocation planner (`algos::planner`) picks a CSF forest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocPolicy {
    /// Up to two trees: tree 0 rooted at the natural (longest-dimension-
    /// first) mode order, tree 1 (when `max_csf >= 2`) rooted at the
    /// next-longest mode. Every mode maps to tree 0 except tree 1's root
    /// mode.
    Simple,
    /// Builds up to `max_csf` trees, picking the cheapest root/target
    /// combination by the FLOP cost model in `algos::planner`.
    Greedy,
    /// Round-robins the modes across up to `max_csf` candidate trees (one
    /// per root mode, in mode order), used primarily for reproducibility
    /// benchmarks rather than for minimizing contraction cost.
    Iter,
}

/// Logging verbosity, mapped onto `log`'s levels rather than a bespoke
/// progress-printing mechanism.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Warn,
            Verbosity::Normal => log::LevelFilter::Info,
            Verbosity::Verbose => log::LevelFilter::Debug,
            Verbosity::Debug => log::LevelFilter::Trace,
        }
    }
}

/// Everything a [`crate::algos::hooi::Hooi`] run needs, gathered into one
/// record instead of read from global state.
///
/// `write` (serializing `core.mat`/`mode<k>.mat`) is intentionally absent:
/// producing a [`crate::structs::tucker_result::TuckerResult`] and letting
/// the caller serialize it is out of scope here.
#[derive(Clone, Debug)]
pub struct TuckerConfig {
    /// Maximum number of outer HOOI iterations.
    pub iters: usize,
    /// Convergence tolerance on the relative change of the fit.
    pub tol: f64,
    /// Target Tucker rank.
    pub rank: RankSpec,
    /// Worker threads for the `rayon` pool; `None` defers to `rayon`'s default.
    pub threads: Option<usize>,
    /// PRNG seed for factor initialization; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Upper bound on the number of CSF trees the planner may build.
    pub max_csf: usize,
    pub alloc_policy: AllocPolicy,
    /// Whether CSF trees should be tiled for cache locality.
    pub tile: bool,
    pub verbosity: Verbosity,
}

impl Default for TuckerConfig {
    fn default() -> Self {
        Self {
            iters: 50,
            tol: 1e-5,
            rank: RankSpec::Uniform(10),
            threads: None,
            seed: None,
            max_csf: 2,
            alloc_policy: AllocPolicy::Simple,
            tile: false,
            verbosity: Verbosity::Normal,
        }
    }
}

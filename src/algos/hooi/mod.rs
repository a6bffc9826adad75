//! Higher-order orthogonal iteration: the alternating-least-squares-style
//! driver that refines a Tucker core and per-mode factor matrices.
//!
//! No direct upstream source — SPLATT's completion code does ALS for CP,
//! not Tucker/HOOI — so the loop structure below follows the teacher's own
//! iterative-driver shape (a config struct, a `Tracer` threaded through
//! each phase, a fit value tracked for a convergence check) rather than a
//! specific file, while the per-mode update itself is the textbook HOOI
//! step: contract every mode but one with its factor matrix, then take the
//! leading eigenvectors of the resulting Gram matrix as the refreshed
//! factor.
use crate::algos::dense::{leading_eigenvectors, outer_gram, random_orthonormal};
use crate::algos::planner::AllocationPlanner;
use crate::algos::ttmc::{other_mode_order, ttmc};
use crate::config::TuckerConfig;
use crate::error::{CoreError, CoreResult};
use crate::structs::factor::DenseFactor;
use crate::structs::tensor::COOTensor;
use crate::structs::tucker_result::TuckerResult;
use crate::structs::vec::SmallVec;
use crate::structs::workspace::Workspace;
use crate::traits::{IdxType, Tensor, ValType};
use crate::utils::tracer::Tracer;
use crate::{print_debug_timer, start_debug_timer};
use ndarray::Array2;
use ndarray_linalg::Lapack;
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::StandardNormal;
use num::{ToPrimitive, Zero};

fn axis_len_usize<IT: IdxType>(axis: &crate::structs::axis::Axis<IT>) -> usize {
    axis.len().to_usize().expect("axis fits in usize")
}

/// Re-indexes `core`'s columns from `traversal_order` (the mode order the
/// CSF tree visited them in, root-to-leaf) to ascending mode order, so the
/// returned [`TuckerResult`] always matches its documented row-major,
/// ascending-mode-index column layout regardless of which permutation the
/// allocation planner happened to pick for mode 0's tree.
fn permute_core_columns_to_ascending_mode_order<VT: ValType>(
    core: &Array2<VT>,
    traversal_order: &[usize],
    ranks: &[usize],
) -> Array2<VT> {
    let nmodes = traversal_order.len();
    if nmodes == 0 {
        return core.clone();
    }
    let mut ascending_order: Vec<usize> = traversal_order.to_vec();
    ascending_order.sort_unstable();
    if ascending_order == traversal_order {
        return core.clone();
    }

    let traversal_radix: Vec<usize> = traversal_order.iter().map(|&m| ranks[m]).collect();
    let ascending_radix: Vec<usize> = ascending_order.iter().map(|&m| ranks[m]).collect();

    let mut ascending_strides = vec![1usize; nmodes];
    for i in (0..nmodes - 1).rev() {
        ascending_strides[i] = ascending_strides[i + 1] * ascending_radix[i + 1];
    }
    let mode_to_ascending_pos: std::collections::HashMap<usize, usize> = ascending_order
        .iter()
        .enumerate()
        .map(|(pos, &m)| (m, pos))
        .collect();

    let total: usize = traversal_radix.iter().product();
    let mut new_core = Array2::<VT>::zeros((core.nrows(), total));
    for old_col in 0..total {
        let mut remainder = old_col;
        let mut coords = vec![0usize; nmodes];
        for i in (0..nmodes).rev() {
            coords[i] = remainder % traversal_radix[i];
            remainder /= traversal_radix[i];
        }
        let mut new_col = 0usize;
        for (i, &mode) in traversal_order.iter().enumerate() {
            let pos = mode_to_ascending_pos[&mode];
            new_col += coords[i] * ascending_strides[pos];
        }
        new_core.column_mut(new_col).assign(&core.column(old_col));
    }
    new_core
}

/// Drives HOOI to convergence (or `config.iters` iterations, whichever
/// comes first) over `tensor`, returning the Tucker core and factors.
pub struct Hooi {
    pub config: TuckerConfig,
    pub tracer: Tracer,
}

impl Hooi {
    pub fn new(config: TuckerConfig) -> Self {
        Self {
            config,
            tracer: Tracer::new_dummy(),
        }
    }

    #[must_use]
    pub fn trace(mut self, tracer: &Tracer) -> Self {
        self.tracer.clone_from(tracer);
        self
    }

    pub fn decompose<IT, VT>(&self, tensor: &COOTensor<IT, VT>) -> CoreResult<TuckerResult<IT, VT>>
    where
        IT: IdxType,
        VT: ValType + Lapack + ToPrimitive,
        StandardNormal: ndarray_rand::rand_distr::Distribution<VT>,
    {
        let event = self.tracer.start();
        scopeguard::defer! {
            event.finish("Hooi::decompose");
        }
        let nmodes = tensor.ndim();
        let ranks = self.config.rank.resolve(nmodes);
        if ranks.len() != nmodes {
            return Err(CoreError::BadInput(format!(
                "rank spec produced {} entries for a {}-mode tensor",
                ranks.len(),
                nmodes
            )));
        }
        for (m, &r) in ranks.iter().enumerate() {
            let dim = axis_len_usize(&tensor.shape()[m]);
            if r > dim {
                return Err(CoreError::BadInput(format!(
                    "requested rank {} for mode {} exceeds its dimension {}",
                    r, m, dim
                )));
            }
        }

        let debug = matches!(self.config.verbosity, crate::config::Verbosity::Debug);
        let plan_timer = start_debug_timer!(debug);
        let forest = AllocationPlanner::plan(
            tensor,
            &ranks,
            self.config.max_csf,
            self.config.alloc_policy,
            self.config.tile,
        )?;
        print_debug_timer!(plan_timer, "hooi allocation planning");

        let threads = self.config.threads.unwrap_or_else(rayon::current_num_threads);
        let max_rank = ranks.iter().copied().max().unwrap_or(1);
        let mut workspace = Workspace::<VT>::alloc(threads, max_rank);

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut factors: SmallVec<Array2<VT>> = (0..nmodes)
            .map(|m| {
                random_orthonormal::<VT, _>(axis_len_usize(&tensor.shape()[m]), ranks[m], &mut rng)
            })
            .collect::<CoreResult<_>>()?;

        let mut fit = 0.0_f64;
        let mut iterations = 0usize;

        for iter in 0..self.config.iters {
            iterations = iter + 1;
            let iter_timer = start_debug_timer!(debug);
            let mut last_unfolded = None;
            for n in 0..nmodes {
                let views: Vec<_> = factors.iter().map(|f| f.view()).collect();
                let unfolded = ttmc(
                    &forest,
                    n,
                    axis_len_usize(&tensor.shape()[n]),
                    &views,
                    &mut workspace,
                    &self.tracer,
                )?;
                let g = outer_gram(unfolded.view());
                factors[n] = leading_eigenvectors(g.view(), ranks[n])?;
                if n == nmodes - 1 {
                    last_unfolded = Some(unfolded);
                }
            }
            print_debug_timer!(iter_timer, "hooi sweep");

            // fit = ||core|| inferred from the last mode processed, without
            // materializing the full core: project that mode's TTMc result
            // down into its rank subspace via the factor just computed for it.
            let last = nmodes - 1;
            let projected = factors[last].t().dot(&last_unfolded.expect("nmodes > 0"));
            let new_fit = projected
                .iter()
                .cloned()
                .fold(VT::zero(), |a, b| a + b.clone() * b)
                .to_f64()
                .unwrap_or(0.0)
                .max(0.0)
                .sqrt();
            let converged = (new_fit - fit).abs() < self.config.tol * fit.abs().max(1e-12);
            fit = new_fit;
            if converged {
                break;
            }
        }

        let core_views: Vec<_> = factors.iter().map(|f| f.view()).collect();
        let core_unfold0_wide = ttmc(
            &forest,
            0,
            axis_len_usize(&tensor.shape()[0]),
            &core_views,
            &mut workspace,
            &self.tracer,
        )?;
        let core_unfold0_wide_projected = factors[0].t().dot(&core_unfold0_wide);
        // `ttmc`'s columns follow tree 0's traversal order (root-to-leaf,
        // skipping mode 0), not ascending mode order; left-multiplying by
        // `factors[0].t()` only touches rows, so permuting columns here is
        // equivalent to permuting before the projection.
        let traversal_order = other_mode_order(&forest, 0);
        let core_unfold0 = permute_core_columns_to_ascending_mode_order(
            &core_unfold0_wide_projected,
            &traversal_order,
            &ranks,
        );

        Ok(TuckerResult {
            core_unfold0: DenseFactor::from_array(
                crate::structs::axis::AxisBuilder::new().range(IT::zero()..num::NumCast::from(ranks[0]).unwrap()).build(),
                crate::structs::axis::AxisBuilder::new().range(IT::zero()..num::NumCast::from(core_unfold0.ncols()).unwrap()).build(),
                core_unfold0,
            ),
            factors: factors
                .into_iter()
                .enumerate()
                .map(|(m, f)| {
                    DenseFactor::from_array(
                        tensor.shape()[m].clone(),
                        crate::structs::axis::AxisBuilder::new()
                            .range(IT::zero()..num::NumCast::from(ranks[m]).unwrap())
                            .build(),
                        f,
                    )
                })
                .collect(),
            ranks: ranks.clone(),
            fit,
            iterations,
        })
    }
}

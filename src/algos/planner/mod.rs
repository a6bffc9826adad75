//! Decides which CSF tree(s) to materialize for a tensor before running
//! TTMc against it, trading extra memory (more trees) for faster per-mode
//! contractions (shorter mixed-mode fibers to walk).
//!
//! There's no literal upstream source for this: SPLATT picks its CSF count
//! from a command-line flag rather than a cost model. This module's job is
//! new design grounded in the teacher's general style of small, swappable
//! policy enums (like `TuckerConfig::alloc_policy` itself) rather than on
//! any specific file.

use crate::config::AllocPolicy;
use crate::error::CoreResult;
use crate::structs::csf::{choose_natural_permutation, CsfForest, CsfTree};
use crate::structs::tensor::COOTensor;
use crate::structs::vec::SmallVec;
use crate::traits::{IdxType, Tensor, ValType};

/// Builds a [`CsfForest`] for `tensor` under the given allocation policy.
///
/// `ranks` gives the Tucker rank used for each mode; the greedy policy
/// needs these to weigh how expensive contracting each mode is.
pub struct AllocationPlanner;

impl AllocationPlanner {
    pub fn plan<IT, VT>(
        tensor: &COOTensor<IT, VT>,
        ranks: &[usize],
        max_csf: usize,
        policy: AllocPolicy,
        tile: bool,
    ) -> CoreResult<CsfForest<IT, VT>>
    where
        IT: IdxType,
        VT: ValType,
    {
        let nmodes = tensor.nmodes();
        match policy {
            AllocPolicy::Simple => {
                let natural = choose_natural_permutation(tensor);
                let tree0 = CsfTree::build(tensor, &natural, tile)?;
                let mut trees = vec![tree0];
                let mut mode_to_tree = SmallVec::from_elem(0usize, nmodes);
                if max_csf >= 2 && nmodes >= 2 {
                    // `natural[1]` is the next-longest-dimension mode: `natural[0]`
                    // is already the root of tree 0.
                    let second_root = natural[1];
                    let perm1 = permutation_rooted_at(tensor, second_root);
                    trees.push(CsfTree::build(tensor, &perm1, tile)?);
                    mode_to_tree[second_root] = 1;
                }
                Ok(CsfForest { trees, mode_to_tree })
            }
            AllocPolicy::Iter => Self::plan_iter(tensor, max_csf, tile),
            AllocPolicy::Greedy => Self::plan_greedy(tensor, ranks, max_csf, tile),
        }
    }

    /// Round-robins the `nmodes` modes across up to `max_csf` candidate
    /// trees (one per root mode, in mode order): target mode `m` is served
    /// by `trees[m % k]`, where `k` is the number of trees actually built.
    fn plan_iter<IT, VT>(
        tensor: &COOTensor<IT, VT>,
        max_csf: usize,
        tile: bool,
    ) -> CoreResult<CsfForest<IT, VT>>
    where
        IT: IdxType,
        VT: ValType,
    {
        let nmodes = tensor.nmodes();
        let k = max_csf.clamp(1, nmodes);
        let mut trees = Vec::with_capacity(k);
        for root in 0..k {
            let perm = permutation_rooted_at(tensor, root);
            trees.push(CsfTree::build(tensor, &perm, tile)?);
        }
        let mut mode_to_tree = SmallVec::from_elem(0usize, nmodes);
        for target in 0..nmodes {
            mode_to_tree[target] = target % k;
        }
        Ok(CsfForest { trees, mode_to_tree })
    }

    fn plan_greedy<IT, VT>(
        tensor: &COOTensor<IT, VT>,
        ranks: &[usize],
        max_csf: usize,
        tile: bool,
    ) -> CoreResult<CsfForest<IT, VT>>
    where
        IT: IdxType,
        VT: ValType,
    {
        let nmodes = tensor.nmodes();
        let budget = max_csf.clamp(1, nmodes);

        let mut candidates = Vec::with_capacity(nmodes);
        for root in 0..nmodes {
            let perm = permutation_rooted_at(tensor, root);
            candidates.push(CsfTree::build(tensor, &perm, tile)?);
        }

        // costs[target][candidate] = FLOP estimate of contracting `target`
        // using `candidates[candidate]`.
        let costs: Vec<Vec<usize>> = (0..nmodes)
            .map(|target| {
                candidates
                    .iter()
                    .map(|tree| estimate_cost(tree, ranks, target))
                    .collect()
            })
            .collect();

        let mut selected: Vec<usize> = Vec::with_capacity(budget);
        let mut best_for_target = vec![usize::MAX; nmodes];

        while selected.len() < budget {
            let mut best_candidate = None;
            let mut best_total = usize::MAX;
            for c in 0..nmodes {
                if selected.contains(&c) {
                    continue;
                }
                let total: usize = (0..nmodes)
                    .map(|t| best_for_target[t].min(costs[t][c]))
                    .sum();
                // tie-break lexicographic on (target, root): lower candidate
                // index (root mode) wins ties, and we scan targets/candidates
                // in ascending order already, so `<` (not `<=`) keeps the
                // first-seen (smallest-index) candidate on a tie.
                if total < best_total {
                    best_total = total;
                    best_candidate = Some(c);
                }
            }
            let c = match best_candidate {
                Some(c) => c,
                None => break,
            };
            for t in 0..nmodes {
                best_for_target[t] = best_for_target[t].min(costs[t][c]);
            }
            selected.push(c);
        }
        selected.sort_unstable();

        let mut mode_to_tree = SmallVec::from_elem(0usize, nmodes);
        for target in 0..nmodes {
            let (best_idx_in_selected, _) = selected
                .iter()
                .enumerate()
                .map(|(i, &c)| (i, costs[target][c]))
                .min_by_key(|&(i, cost)| (cost, selected[i]))
                .expect("selected is non-empty");
            mode_to_tree[target] = best_idx_in_selected;
        }

        let trees = selected.into_iter().map(|c| candidates[c].clone()).collect();
        Ok(CsfForest { trees, mode_to_tree })
    }
}

fn permutation_rooted_at<IT, VT>(tensor: &COOTensor<IT, VT>, root: usize) -> Vec<usize>
where
    IT: IdxType,
    VT: ValType,
{
    let mut rest: Vec<usize> = (0..tensor.nmodes()).filter(|&m| m != root).collect();
    rest.sort_by(|&a, &b| {
        tensor.shape()[b]
            .len()
            .partial_cmp(&tensor.shape()[a].len())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut perm = vec![root];
    perm.extend(rest);
    perm
}

/// FLOP estimate for contracting every mode but `target` out of `tree`:
/// at each non-root level, the number of child fibers times the product of
/// ranks accumulated from the root down to that level (the target mode's
/// rank is excluded since TTMc doesn't contract that mode away).
fn estimate_cost<IT, VT>(tree: &CsfTree<IT, VT>, ranks: &[usize], target: usize) -> usize
where
    IT: IdxType,
    VT: ValType,
{
    let mut running_product = 1usize;
    let mut cost = 0usize;
    for level in 0..tree.nmodes() {
        let mode = tree.modes[level];
        if level > 0 {
            cost += tree.fids[level].len() * running_product;
        }
        if mode != target {
            running_product *= ranks.get(mode).copied().unwrap_or(1);
        }
    }
    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::axis::AxisBuilder;

    fn axes(dims: &[usize]) -> Vec<crate::structs::axis::Axis<usize>> {
        dims.iter()
            .map(|&d| AxisBuilder::new().range(0..d).build())
            .collect()
    }

    fn sample_tensor() -> COOTensor<usize, f64> {
        let mut t = COOTensor::alloc(&axes(&[4, 3, 2]));
        t.push(&[0, 0, 0], 1.0).unwrap();
        t.push(&[1, 0, 0], 2.0).unwrap();
        t.push(&[2, 1, 1], 3.0).unwrap();
        t.push(&[3, 2, 1], 4.0).unwrap();
        t
    }

    #[test]
    fn simple_policy_with_max_csf_one_builds_one_shared_tree() {
        let t = sample_tensor();
        let forest =
            AllocationPlanner::plan(&t, &[2, 2, 2], 1, AllocPolicy::Simple, false).unwrap();
        assert_eq!(forest.ntrees(), 1);
        assert!(forest.mode_to_tree.iter().all(|&idx| idx == 0));
    }

    #[test]
    fn simple_policy_with_max_csf_two_builds_a_second_tree() {
        let t = sample_tensor();
        let forest =
            AllocationPlanner::plan(&t, &[2, 2, 2], 2, AllocPolicy::Simple, false).unwrap();
        assert_eq!(forest.ntrees(), 2);
        // exactly one mode (the second tree's root) should have been
        // rerouted away from tree 0
        let rerouted = forest.mode_to_tree.iter().filter(|&&idx| idx == 1).count();
        assert_eq!(rerouted, 1);
    }

    #[test]
    fn iter_policy_round_robins_across_candidate_trees() {
        let t = sample_tensor();
        let forest =
            AllocationPlanner::plan(&t, &[2, 2, 2], 3, AllocPolicy::Iter, false).unwrap();
        assert_eq!(forest.ntrees(), 3);
        for m in 0..3 {
            assert_eq!(forest.mode_to_tree[m], m % 3);
        }
    }

    #[test]
    fn iter_policy_respects_max_csf_budget() {
        let t = sample_tensor();
        let forest =
            AllocationPlanner::plan(&t, &[2, 2, 2], 2, AllocPolicy::Iter, false).unwrap();
        assert_eq!(forest.ntrees(), 2);
        assert_eq!(forest.mode_to_tree.to_vec(), vec![0, 1, 0]);
    }

    #[test]
    fn greedy_respects_max_csf_budget() {
        let t = sample_tensor();
        let forest =
            AllocationPlanner::plan(&t, &[2, 2, 2], 2, AllocPolicy::Greedy, false).unwrap();
        assert!(forest.ntrees() <= 2);
        for m in 0..3 {
            let _ = forest.tree_for_mode(m);
        }
    }
}

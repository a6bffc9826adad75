//! Tensor-times-matrix-chain: contract every mode but one against a dense
//! factor matrix, walking a [`CsfTree`] instead of the flat coordinate list
//! so shared coordinate prefixes between nonzeros aren't recomputed.
//!
//! There's no literal `ttm_csf` source in `original_source/` to lift this
//! from (SPLATT's `ttm.c` operates on a single matrix, not a chain), so the
//! traversal here is original design grounded in the teacher's general
//! "walk the unsafe fast accessors, parallelize at the root level" approach
//! seen in `scoo_mul_dense.rs`.

use crate::error::{CoreError, CoreResult};
use crate::structs::csf::{CsfForest, CsfTree};
use crate::structs::vec::SmallVec;
use crate::structs::workspace::Workspace;
use crate::traits::{IdxType, ValType};
use crate::utils::ndarray_unsafe::uncheck_arr_mut;
use crate::utils::tracer::Tracer;
use ndarray::{Array1, Array2, ArrayView2};
use num::ToPrimitive;
use rayon::prelude::*;
use scopeguard::defer;

/// Computes `Y_(target) = X_(target) * (bigotimes of every other mode's
/// factor matrix)`, the dense matrix TTMc produces for one mode of a
/// Tucker iteration.
///
/// `factors[m]` must have `tree.dim(m)` rows; its column count is that
/// mode's rank. The output has `tree`'s `target` dimension as rows and the
/// product of every other mode's rank as columns, laid out in the same
/// mode order the forest's tree for `target` visits them (root to leaf,
/// skipping `target` itself) — callers that need to know the column layout
/// can ask `other_mode_order`.
pub fn ttmc<IT, VT>(
    forest: &CsfForest<IT, VT>,
    target: usize,
    target_dim: usize,
    factors: &[ArrayView2<VT>],
    workspace: &mut Workspace<VT>,
    tracer: &Tracer,
) -> CoreResult<Array2<VT>>
where
    IT: IdxType,
    VT: ValType,
{
    let event = tracer.start();
    defer! {
        event.finish("ttmc");
    }

    let tree = forest.tree_for_mode(target);
    if factors.len() != tree.nmodes() {
        return Err(CoreError::BadInput(format!(
            "expected {} factor matrices, got {}",
            tree.nmodes(),
            factors.len()
        )));
    }
    let target_level = tree
        .modes
        .iter()
        .position(|&m| m == target)
        .ok_or_else(|| CoreError::BadInput(format!("mode {} is not in this tree", target)))?;
    // `factors[target]`'s contents are never read (the walk skips
    // multiplying at `target_level`); only every other mode's factor matters.
    let other_rank_product: usize = (0..tree.nmodes())
        .filter(|&l| l != target_level)
        .map(|l| factors[tree.modes[l]].ncols())
        .product();

    // When the target mode is the tree's root, every nonzero's path shares
    // no prefix above the root to reuse, so the scatter happens once per
    // leaf on the way down (top-down); otherwise the target is interior or
    // a leaf and sibling leaves share ancestor prefixes worth contracting
    // once on the way up (bottom-up).
    let contributions = if target_level == 0 {
        ttmc_top_down(tree, target_level, factors, other_rank_product, workspace)
    } else {
        ttmc_bottom_up(tree, target_level, factors)
    };

    let mut output = Array2::<VT>::zeros((target_dim, other_rank_product));
    debug_assert!(output.is_standard_layout());
    for (row, values) in contributions {
        debug_assert!(row < target_dim);
        // SAFETY: `row` came from a coordinate stored under this tree's
        // target mode, which `ttmc`'s caller guarantees is `< target_dim`;
        // `output` is freshly allocated in standard (row-major) layout.
        let out_row = unsafe { uncheck_arr_mut(&mut output).row(row) };
        for (slot, v) in values.into_iter().enumerate() {
            out_row[slot] = out_row[slot].clone() + v;
        }
    }
    Ok(output)
}

/// Mode order the TTMc output's columns are laid out in: every mode but
/// `target`, visited root-to-leaf as `forest`'s tree for `target` stores
/// them.
pub fn other_mode_order<IT, VT>(forest: &CsfForest<IT, VT>, target: usize) -> SmallVec<usize>
where
    IT: IdxType,
    VT: ValType,
{
    forest
        .tree_for_mode(target)
        .modes
        .iter()
        .copied()
        .filter(|&m| m != target)
        .collect()
}

fn kron<VT: ValType>(partial: &Array1<VT>, row: ndarray::ArrayView1<VT>) -> Array1<VT> {
    let mut out = Array1::<VT>::zeros(partial.len() * row.len());
    for (i, p) in partial.iter().enumerate() {
        for (j, r) in row.iter().enumerate() {
            out[i * row.len() + j] = p.clone() * r.clone();
        }
    }
    out
}

fn ttmc_bottom_up<IT, VT>(
    tree: &CsfTree<IT, VT>,
    target_level: usize,
    factors: &[ArrayView2<VT>],
) -> Vec<(usize, Array1<VT>)>
where
    IT: IdxType,
    VT: ValType,
{
    (0..tree.nroots())
        .into_par_iter()
        .fold(Vec::new, |mut acc, root| {
            let one = Array1::from_elem(1, VT::one());
            walk(tree, 0, root, target_level, factors, &one, None, &mut acc);
            acc
        })
        .reduce(Vec::new, |mut a, mut b| {
            a.append(&mut b);
            a
        })
}

#[allow(clippy::too_many_arguments)]
fn walk<IT, VT>(
    tree: &CsfTree<IT, VT>,
    level: usize,
    node: usize,
    target_level: usize,
    factors: &[ArrayView2<VT>],
    partial: &Array1<VT>,
    target_row: Option<usize>,
    out: &mut Vec<(usize, Array1<VT>)>,
) where
    IT: IdxType,
    VT: ValType,
{
    let mode = tree.modes[level];
    let coord = tree.fids[level][node].to_usize().expect("index fits usize");
    let (next_partial, next_target_row) = if level == target_level {
        (partial.clone(), Some(coord))
    } else {
        (kron(partial, factors[mode].row(coord)), target_row)
    };

    if level + 1 == tree.nmodes() {
        // `node` at the leaf level is the nonzero's own position.
        let value = tree.vals[node].clone();
        let scaled = next_partial.mapv(|x| x * value.clone());
        out.push((
            next_target_row.expect("target mode precedes every leaf"),
            scaled,
        ));
        return;
    }

    for child in tree.children(level, node) {
        walk(
            tree,
            level + 1,
            child,
            target_level,
            factors,
            &next_partial,
            next_target_row,
            out,
        );
    }
}

/// Expands `buf[..old_len]` in place by the Kronecker product with `row`,
/// leaving the result in `buf[..old_len * row.len()]`. Indices are visited
/// from `old_len - 1` down to `0`: the expanded block for index `i` lands at
/// offsets `[i*row.len(), i*row.len()+row.len())`, which never overlaps
/// `buf[i']` for a not-yet-processed `i' < i`, since `i*row.len() >= i > i'`
/// whenever `row.len() >= 1`.
fn kron_into<VT: ValType>(buf: &mut [VT], old_len: usize, row: ndarray::ArrayView1<VT>) {
    let rm = row.len();
    for i in (0..old_len).rev() {
        let old_val = buf[i].clone();
        let base = i * rm;
        for (j, r) in row.iter().enumerate() {
            buf[base + j] = old_val.clone() * r.clone();
        }
    }
}

/// Parallelizes over leaves in static contiguous chunks, one per workspace
/// thread slot, writing each leaf's Kronecker expansion directly into that
/// thread's `contract_buf` instead of allocating a fresh `Array1` per level.
fn ttmc_top_down<IT, VT>(
    tree: &CsfTree<IT, VT>,
    target_level: usize,
    factors: &[ArrayView2<VT>],
    other_rank_product: usize,
    workspace: &mut Workspace<VT>,
) -> Vec<(usize, Array1<VT>)>
where
    IT: IdxType,
    VT: ValType,
{
    let nnz = tree.nnz();
    let nthreads = workspace.nthreads().max(1);
    let chunk = nnz.div_ceil(nthreads).max(1);
    workspace
        .threads_mut()
        .par_iter_mut()
        .enumerate()
        .flat_map(|(t, scratch)| {
            if scratch.contract_buf.len() < other_rank_product {
                scratch.contract_buf.resize(other_rank_product, VT::zero());
            }
            let start = (t * chunk).min(nnz);
            let end = (start + chunk).min(nnz);
            let mut out = Vec::with_capacity(end - start);
            for leaf in start..end {
                let path = ancestor_path(tree, leaf);
                scratch.contract_buf[0] = VT::one();
                let mut old_len = 1usize;
                let mut target_row = 0usize;
                for (level, &coord) in path.iter().enumerate() {
                    let mode = tree.modes[level];
                    if level == target_level {
                        target_row = coord;
                    } else {
                        let row = factors[mode].row(coord);
                        kron_into(&mut scratch.contract_buf, old_len, row);
                        old_len *= row.len();
                    }
                }
                let value = tree.vals[leaf].clone();
                let result: Array1<VT> = scratch.contract_buf[..old_len]
                    .iter()
                    .map(|x| x.clone() * value.clone())
                    .collect();
                out.push((target_row, result));
            }
            out
        })
        .collect()
}

/// For leaf index `leaf`, the coordinate at every level from root to leaf,
/// found by binary-searching each level's `fptr` for the ancestor owning
/// the previous level's node.
fn ancestor_path<IT, VT>(tree: &CsfTree<IT, VT>, leaf: usize) -> Vec<usize>
where
    IT: IdxType,
    VT: ValType,
{
    let nmodes = tree.nmodes();
    let mut path = vec![0usize; nmodes];
    path[nmodes - 1] = leaf;
    for level in (0..nmodes - 1).rev() {
        let child = path[level + 1];
        let idx = tree.fptr[level].as_slice().unwrap().partition_point(|&p| p <= child) - 1;
        path[level] = idx;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::axis::AxisBuilder;
    use crate::structs::csf::CsfForest;
    use crate::structs::tensor::COOTensor;
    use ndarray::array;

    fn axes(dims: &[usize]) -> Vec<crate::structs::axis::Axis<usize>> {
        dims.iter()
            .map(|&d| AxisBuilder::new().range(0..d).build())
            .collect()
    }

    #[test]
    fn ttmc_matches_dense_reference_for_identity_factors() {
        let mut t = COOTensor::<usize, f64>::alloc(&axes(&[2, 2]));
        t.push(&[0, 0], 1.0).unwrap();
        t.push(&[0, 1], 2.0).unwrap();
        t.push(&[1, 0], 3.0).unwrap();
        t.push(&[1, 1], 4.0).unwrap();
        let tree = CsfTree::build(&t, &[0, 1], false).unwrap();
        let forest = CsfForest::single(tree, 2);

        let id0 = array![[1.0, 0.0], [0.0, 1.0]];
        let id1 = array![[1.0, 0.0], [0.0, 1.0]];
        let factors = [id0.view(), id1.view()];
        let mut ws = Workspace::<f64>::alloc(1, 2);
        let y = ttmc(&forest, 0, 2, &factors, &mut ws, &Tracer::new_dummy()).unwrap();
        assert_eq!(y.shape(), &[2, 2]);
        assert!((y[[0, 0]] - 1.0).abs() < 1e-9);
        assert!((y[[1, 1]] - 4.0).abs() < 1e-9);
    }
}

use crate::error::{CoreError, CoreResult};
use crate::structs::tensor::COOTensor;
use crate::structs::vec::SmallVec;
use crate::traits::{IdxType, Tensor, ValType};
use ndarray::Array1;
use std::cmp::Ordering;
use std::ops::Range;

/// A compressed sparse fiber tree over one mode permutation of a sparse
/// tensor: `modes[0]` is the root mode, `modes[last]` is the leaf mode.
///
/// `fids[l]` holds the coordinate (in the original tensor's indexing) of
/// each node at level `l`, in the order nodes were discovered while walking
/// the tensor's nonzeros sorted by `modes`. `fptr[l][i]..fptr[l][i + 1]`
/// gives the range of that node's children within `fids[l + 1]`. The
/// deepest level, `fids[nmodes - 1]`, has exactly one entry per nonzero
/// (a tensor with duplicate coordinates must be deduplicated before CSF
/// construction), and `vals` is the parallel array of nonzero values in the
/// same sorted order.
#[derive(Clone, Debug)]
pub struct CsfTree<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    pub modes: SmallVec<usize>,
    pub fids: SmallVec<Array1<IT>>,
    pub fptr: SmallVec<Array1<usize>>,
    pub vals: Array1<VT>,
    pub tiles: Option<Vec<Range<usize>>>,
}

impl<IT, VT> CsfTree<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    pub fn nmodes(&self) -> usize {
        self.modes.len()
    }

    pub fn nnz(&self) -> usize {
        self.vals.len()
    }

    /// Number of nodes (fibers) at the root level.
    pub fn nroots(&self) -> usize {
        self.fids[0].len()
    }

    /// Children range of node `idx` at `level` within `fids[level + 1]`.
    pub fn children(&self, level: usize, idx: usize) -> Range<usize> {
        self.fptr[level][idx]..self.fptr[level][idx + 1]
    }

    /// Builds a CSF tree over `tensor`'s nonzeros, rooted at `perm[0]`, with
    /// modes visited in `perm` order down to the leaf `perm[last]`.
    ///
    /// Sorts a working copy of the nonzero order; the input tensor is left
    /// untouched.
    pub fn build(tensor: &COOTensor<IT, VT>, perm: &[usize], tile: bool) -> CoreResult<Self> {
        let nmodes = perm.len();
        if nmodes != tensor.nmodes() {
            return Err(CoreError::BadInput(format!(
                "permutation has {} modes, tensor has {}",
                nmodes,
                tensor.nmodes()
            )));
        }
        let nnz = tensor.num_non_zeros();
        let indices = tensor.indices();

        let mut order: Vec<usize> = (0..nnz).collect();
        order.sort_by(|&a, &b| {
            for &m in perm {
                match indices[m][a].cmp(&indices[m][b]) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            Ordering::Equal
        });

        let mut fids: Vec<Vec<IT>> = vec![Vec::new(); nmodes];
        let mut parent: Vec<Vec<usize>> = vec![Vec::new(); nmodes.saturating_sub(1)];
        let mut current_idx = vec![0usize; nmodes];
        let mut prev: Option<Vec<IT>> = None;

        for &k in &order {
            let cur: Vec<IT> = (0..nmodes).map(|level| indices[perm[level]][k].clone()).collect();
            let diverge_at = match &prev {
                None => 0,
                Some(p) => (0..nmodes).find(|&l| p[l] != cur[l]).unwrap_or(nmodes),
            };
            for level in diverge_at..nmodes {
                fids[level].push(cur[level].clone());
                current_idx[level] = fids[level].len() - 1;
                if level > 0 {
                    parent[level - 1].push(current_idx[level - 1]);
                }
            }
            prev = Some(cur);
        }

        let vals = Array1::from_iter(order.iter().map(|&k| tensor.values()[k].clone()));

        let mut fptr: Vec<Vec<usize>> = Vec::with_capacity(nmodes.saturating_sub(1));
        for level in 0..nmodes.saturating_sub(1) {
            let p = &parent[level];
            let nodes_at_level = fids[level].len();
            let mut starts = vec![0usize; nodes_at_level + 1];
            let mut node = 0usize;
            for (i, &par) in p.iter().enumerate() {
                while node < par {
                    node += 1;
                    starts[node] = i;
                }
            }
            for n in (node + 1)..=nodes_at_level {
                starts[n] = p.len();
            }
            fptr.push(starts);
        }

        let tiles = if tile {
            Some(Self::natural_tiles(fids[0].len()))
        } else {
            None
        };

        Ok(Self {
            modes: perm.iter().copied().collect(),
            fids: fids.into_iter().map(Array1::from_vec).collect(),
            fptr: fptr.into_iter().map(Array1::from_vec).collect(),
            vals,
            tiles,
        })
    }

    /// Splits the root level into contiguous ranges of roughly equal size,
    /// one per `rayon` work item, so TTMc can balance work across threads
    /// without re-partitioning the tree itself.
    fn natural_tiles(nroots: usize) -> Vec<Range<usize>> {
        const TARGET_TILE: usize = 64;
        if nroots == 0 {
            return Vec::new();
        }
        (0..nroots)
            .step_by(TARGET_TILE)
            .map(|start| start..(start + TARGET_TILE).min(nroots))
            .collect()
    }
}

/// Picks the default mode permutation: longest dimension first as the root,
/// descending from there, so the innermost (leaf) mode has the smallest
/// extent.
pub fn choose_natural_permutation<IT, VT>(tensor: &COOTensor<IT, VT>) -> Vec<usize>
where
    IT: IdxType,
    VT: ValType,
{
    let mut modes: Vec<usize> = (0..tensor.nmodes()).collect();
    modes.sort_by(|&a, &b| {
        tensor.shape()[b]
            .len()
            .partial_cmp(&tensor.shape()[a].len())
            .unwrap_or(Ordering::Equal)
    });
    modes
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

    #[test]
    fn build_groups_shared_prefixes_into_one_root() {
        let mut t = COOTensor::<usize, f64>::alloc(&axes(&[2, 2, 2]));
        t.push(&[0, 0, 0], 1.0).unwrap();
        t.push(&[0, 0, 1], 2.0).unwrap();
        t.push(&[1, 1, 1], 3.0).unwrap();
        let tree = CsfTree::build(&t, &[0, 1, 2], false).unwrap();
        assert_eq!(tree.nnz(), 3);
        assert_eq!(tree.nroots(), 2);
        assert_eq!(tree.fids[0].to_vec(), vec![0, 1]);
    }

    #[test]
    fn children_ranges_cover_every_leaf_once() {
        let mut t = COOTensor::<usize, f64>::alloc(&axes(&[2, 2, 2]));
        t.push(&[0, 0, 0], 1.0).unwrap();
        t.push(&[0, 1, 0], 2.0).unwrap();
        t.push(&[1, 0, 0], 3.0).unwrap();
        let tree = CsfTree::build(&t, &[0, 1, 2], false).unwrap();
        let total: usize = (0..tree.nroots())
            .map(|r| tree.children(0, r).len())
            .sum();
        assert_eq!(total, tree.fids[1].len());
    }

    #[test]
    fn natural_permutation_puts_longest_dimension_first() {
        let t = COOTensor::<usize, f64>::alloc(&axes(&[4, 2, 8]));
        let perm = choose_natural_permutation(&t);
        assert_eq!(perm[0], 2);
        assert_eq!(perm[2], 1);
    }
}

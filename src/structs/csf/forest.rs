use super::tree::CsfTree;
use crate::structs::vec::SmallVec;
use crate::traits::{IdxType, ValType};

/// A collection of one or more [`CsfTree`]s over the same tensor, each
/// rooted at a different mode, plus a lookup from "I need to target mode m"
/// to which tree to use.
///
/// Built by `algos::planner::AllocationPlanner`; kept as a plain data holder
/// here since picking *which* trees to build is a cost-model decision that
/// belongs with the planner, not the tree/forest types themselves.
#[derive(Clone, Debug)]
pub struct CsfForest<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    pub trees: Vec<CsfTree<IT, VT>>,
    /// `mode_to_tree[m]` is the index into `trees` whose root mode is `m`
    /// or, if no tree is rooted at `m`, the cheapest available substitute.
    pub mode_to_tree: SmallVec<usize>,
}

impl<IT, VT> CsfForest<IT, VT>
where
    IT: IdxType,
    VT: ValType,
{
    pub fn single(tree: CsfTree<IT, VT>, nmodes: usize) -> Self {
        let mode_to_tree = SmallVec::from_elem(0usize, nmodes);
        Self {
            trees: vec![tree],
            mode_to_tree,
        }
    }

    pub fn tree_for_mode(&self, mode: usize) -> &CsfTree<IT, VT> {
        &self.trees[self.mode_to_tree[mode]]
    }

    pub fn ntrees(&self) -> usize {
        self.trees.len()
    }
}

//! Compressed sparse fiber (CSF) tree storage, the layout TTMc and the
//! allocation planner operate over.

mod forest;
mod tree;

pub use forest::CsfForest;
pub use tree::{choose_natural_permutation, CsfTree};

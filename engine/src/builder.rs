//! Tree builder interface
//!
//! Builders live in the `sprout-tree` crate; the engine only fixes the
//! contract so that the harness and the command line can drive any of them.

use crate::error::Result;
use crate::node::Tree;
use crate::params::{BranchRule, TreeParams};

/// A strategy for constructing a tree from [`TreeParams`].
///
/// For equal parameters and rule, every implementation must return trees
/// that compare equal. A height of 0 yields [`Tree::empty`], a height of 1 a
/// single leaf holding the root value.
pub trait TreeBuilder {
    /// Stable label used in benchmark reports
    fn name(&self) -> &'static str;

    /// Build the full tree described by `params`
    fn build(&self, params: &TreeParams, rule: &dyn BranchRule) -> Result<Tree>;
}

//! Breadth-first construction with an explicit work queue
//!
//! Nodes are expanded level by level, left to right. The queue lives on the
//! heap, so the height is not limited by the call stack.

use std::collections::VecDeque;

use sprout_engine::{BranchRule, FnRule, Node, Number, Result, Tree, TreeBuilder, TreeParams};
use tracing::{instrument, trace};

/// Build a tree breadth-first from raw arguments.
///
/// Fails with `InvalidArgument` for a negative height.
pub fn build<L, R>(height: i64, root: impl Into<Number>, left: L, right: R) -> Result<Tree>
where
    L: Fn(Number) -> Number,
    R: Fn(Number) -> Number,
{
    let params = TreeParams::new(height, root)?;
    Ok(build_with(&params, &FnRule::new(left, right)))
}

/// Build the tree described by `params`
#[instrument(level = "debug", skip(rule), fields(height = params.height()))]
pub fn build_with<B: BranchRule + ?Sized>(params: &TreeParams, rule: &B) -> Tree {
    let height = params.height();
    if height == 0 {
        return Tree::empty();
    }

    let mut root = Node::leaf(params.root());
    {
        // (node, depth), root at depth 1
        let mut queue: VecDeque<(&mut Node, u32)> = VecDeque::new();
        queue.push_back((&mut root, 1));

        while let Some((node, depth)) = queue.pop_front() {
            if depth < height {
                let left = rule.left(node.value);
                let right = rule.right(node.value);
                trace!(depth, %left, %right, "expand");
                node.grow(left, right);
                queue.extend(node.children_mut().map(|child| (child, depth + 1)));
            }
        }
    }

    Tree::from(root)
}

/// [`TreeBuilder`] for breadth-first construction
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl TreeBuilder for BreadthFirst {
    fn name(&self) -> &'static str {
        "iterative"
    }

    fn build(&self, params: &TreeParams, rule: &dyn BranchRule) -> Result<Tree> {
        Ok(build_with(params, rule))
    }
}

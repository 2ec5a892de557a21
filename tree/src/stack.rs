//! Depth-first construction driven by an explicit stack
//!
//! Same visiting order and child-function call order as [`crate::recursive`],
//! but the path from the root to the current node lives in a heap vector
//! instead of call frames, so there is no height limit.

use sprout_engine::{BranchRule, Node, Number, Result, Tree, TreeBuilder, TreeParams};
use tracing::instrument;

/// An inner node on the current path whose subtrees are still being built
struct Frame {
    value: Number,
    height: u32,
    /// Root value of the right subtree, computed together with the left one
    right: Number,
    /// Set once the left subtree is finished
    left: Option<Node>,
}

/// Build the tree described by `params`
#[instrument(level = "debug", skip(rule), fields(height = params.height()))]
pub fn build_with<B: BranchRule + ?Sized>(params: &TreeParams, rule: &B) -> Tree {
    if params.height() == 0 {
        return Tree::empty();
    }

    let mut path: Vec<Frame> = Vec::new();
    let mut value = params.root();
    let mut height = params.height();

    loop {
        // descend along left edges
        while height > 1 {
            let left = rule.left(value);
            let right = rule.right(value);
            path.push(Frame {
                value,
                height,
                right,
                left: None,
            });
            value = left;
            height -= 1;
        }

        // climb until a frame still waits for its right subtree
        let mut finished = Node::leaf(value);
        loop {
            let Some(frame) = path.last_mut() else {
                return Tree::from(finished);
            };
            match frame.left.take() {
                None => {
                    frame.left = Some(finished);
                    value = frame.right;
                    height = frame.height - 1;
                    break;
                }
                Some(left) => {
                    let parent = frame.value;
                    path.pop();
                    finished = Node::fork(parent, left, finished);
                }
            }
        }
    }
}

/// [`TreeBuilder`] for explicit-stack depth-first construction
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitStack;

impl TreeBuilder for ExplicitStack {
    fn name(&self) -> &'static str {
        "explicit-stack"
    }

    fn build(&self, params: &TreeParams, rule: &dyn BranchRule) -> Result<Tree> {
        Ok(build_with(params, rule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recursive;
    use sprout_engine::fixtures::{reference_params, reference_tree};
    use sprout_engine::{FnRule, Preset, Squares};
    use std::cell::RefCell;

    #[test]
    fn test_reference_tree() {
        assert_eq!(build_with(&reference_params(), &Squares), reference_tree());
    }

    #[test]
    fn test_base_cases() {
        assert!(build_with(&TreeParams::new(0, 3).unwrap(), &Squares).is_empty());
        assert_eq!(
            build_with(&TreeParams::new(1, 3).unwrap(), &Squares),
            Tree::from(Node::leaf(Number::Int(3)))
        );
    }

    fn record(params: &TreeParams, explicit_stack: bool) -> (Tree, Vec<Number>) {
        let calls = RefCell::new(Vec::new());
        let tree = {
            let rule = FnRule::new(
                |x: Number| {
                    calls.borrow_mut().push(x);
                    x - Number::Int(1)
                },
                |x: Number| {
                    calls.borrow_mut().push(x);
                    x + Number::Int(1)
                },
            );
            if explicit_stack {
                build_with(params, &rule)
            } else {
                recursive::build_with(params, &rule).unwrap()
            }
        };
        (tree, calls.into_inner())
    }

    #[test]
    fn test_matches_recursive_call_order() {
        let params = TreeParams::new(5, 0).unwrap();
        let (stack_tree, stack_calls) = record(&params, true);
        let (recursive_tree, recursive_calls) = record(&params, false);

        assert_eq!(stack_tree, recursive_tree);
        assert_eq!(stack_calls, recursive_calls);
        assert_eq!(stack_calls.len(), 2 * 15);
    }

    #[test]
    fn test_heap_preset_numbers_nodes_in_level_order() {
        let tree = build_with(&TreeParams::new(12, 1).unwrap(), &Preset::Heap);
        assert!(tree.is_perfect());
        assert_eq!(
            tree.levels().concat(),
            (1..(1 << 12)).map(Number::Int).collect::<Vec<_>>()
        );
    }
}

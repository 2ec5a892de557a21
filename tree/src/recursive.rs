//! Depth-first construction by recursion
//!
//! Recursion depth equals the tree height. Heights above
//! [`MAX_RECURSIVE_HEIGHT`] are rejected up front; use
//! [`crate::stack`] for a heap-driven depth-first build.

use sprout_engine::{BranchRule, Error, FnRule, Node, Number, Result, Tree, TreeBuilder, TreeParams};
use tracing::instrument;

/// Largest height the recursive builder accepts.
///
/// Each level costs one small stack frame, so this stays far below the 2 MiB
/// default of spawned threads. A perfect tree this tall could never be
/// allocated anyway (it would need `2^256 - 1` nodes).
pub const MAX_RECURSIVE_HEIGHT: u32 = 256;

/// Build a tree recursively from raw arguments.
///
/// Fails with `InvalidArgument` for a negative height or one above
/// [`MAX_RECURSIVE_HEIGHT`].
pub fn build<L, R>(height: i64, root: impl Into<Number>, left: L, right: R) -> Result<Tree>
where
    L: Fn(Number) -> Number,
    R: Fn(Number) -> Number,
{
    let params = TreeParams::new(height, root)?;
    build_with(&params, &FnRule::new(left, right))
}

/// Build the tree described by `params`
#[instrument(level = "debug", skip(rule), fields(height = params.height()))]
pub fn build_with<B: BranchRule + ?Sized>(params: &TreeParams, rule: &B) -> Result<Tree> {
    let height = params.height();
    if height > MAX_RECURSIVE_HEIGHT {
        return Err(Error::invalid_argument(
            "height",
            format!(
                "{} exceeds the recursion limit of {}",
                height, MAX_RECURSIVE_HEIGHT
            ),
        ));
    }
    if height == 0 {
        return Ok(Tree::empty());
    }
    Ok(Tree::from(grow(height, params.root(), rule)))
}

/// Subtree of `height >= 1` levels rooted at `value`
fn grow<B: BranchRule + ?Sized>(height: u32, value: Number, rule: &B) -> Node {
    if height == 1 {
        return Node::leaf(value);
    }
    let left_value = rule.left(value);
    let right_value = rule.right(value);
    // left subtree completes before the right one starts
    let left = grow(height - 1, left_value, rule);
    let right = grow(height - 1, right_value, rule);
    Node::fork(value, left, right)
}

/// [`TreeBuilder`] for recursive construction
#[derive(Debug, Clone, Copy, Default)]
pub struct Recursive;

impl TreeBuilder for Recursive {
    fn name(&self) -> &'static str {
        "recursive"
    }

    fn build(&self, params: &TreeParams, rule: &dyn BranchRule) -> Result<Tree> {
        build_with(params, rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_engine::fixtures::{reference_params, reference_tree};
    use sprout_engine::Squares;
    use std::cell::RefCell;

    #[test]
    fn test_reference_tree() {
        let tree = build_with(&reference_params(), &Squares).unwrap();
        assert_eq!(tree, reference_tree());
    }

    #[test]
    fn test_free_function_matches_reference() {
        let tree = build(3, 11, |x| x * x, |y| Number::Int(2) + y * y).unwrap();
        assert_eq!(tree, reference_tree());
    }

    #[test]
    fn test_base_cases() {
        assert!(build_with(&TreeParams::new(0, 7).unwrap(), &Squares).unwrap().is_empty());

        let leaf = build_with(&TreeParams::new(1, 7).unwrap(), &Squares).unwrap();
        assert_eq!(leaf, Tree::from(Node::leaf(Number::Int(7))));
    }

    #[test]
    fn test_height_limit() {
        let params = TreeParams::new(i64::from(MAX_RECURSIVE_HEIGHT) + 1, 1).unwrap();
        let err = build_with(&params, &Squares).unwrap_err();
        assert_eq!(err.argument(), "height");
    }

    #[test]
    fn test_negative_height_rejected() {
        assert!(build(-1, 5, |x| x, |x| x).is_err());
    }

    #[test]
    fn test_left_subtree_finishes_first() {
        let calls = RefCell::new(Vec::new());
        let rule = FnRule::new(
            |x: Number| {
                calls.borrow_mut().push(x);
                Number::Int(2) * x
            },
            |x: Number| {
                calls.borrow_mut().push(x);
                Number::Int(2) * x + Number::Int(1)
            },
        );
        build_with(&TreeParams::new(4, 1).unwrap(), &rule).unwrap();

        // the whole subtree under 2 is expanded before 3
        assert_eq!(
            calls.into_inner(),
            [1, 1, 2, 2, 4, 4, 5, 5, 3, 3, 6, 6, 7, 7]
                .iter()
                .map(|&v| Number::Int(v))
                .collect::<Vec<_>>()
        );
    }
}

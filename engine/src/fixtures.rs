//! Hardcoded reference tree for builder validation
//!
//! The default parameters (height 3, root 11) with the default rule
//! (left `x²`, right `2 + x²`):
//!
//!   level 0:                 11
//!   level 1:        121              123
//!   level 2:   14641   14643    15129   15131
//!
//! Built by hand so that builder tests do not compare a builder against
//! itself.

use crate::node::{Node, Tree};
use crate::number::Number;
use crate::params::TreeParams;

fn leaf(value: i128) -> Node {
    Node::leaf(Number::Int(value))
}

/// Parameters the reference tree is built from
pub fn reference_params() -> TreeParams {
    TreeParams::default()
}

/// The 7-node tree every builder must produce for [`reference_params`]
pub fn reference_tree() -> Tree {
    Tree::from(Node::fork(
        Number::Int(11),
        Node::fork(Number::Int(121), leaf(14641), leaf(14643)),
        Node::fork(Number::Int(123), leaf(15129), leaf(15131)),
    ))
}

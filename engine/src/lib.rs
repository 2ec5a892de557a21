//! sprout Engine - Core tree types and benchmark harness
//!
//! This crate contains the types every tree builder shares (node values,
//! nodes, generation parameters, branch rules, the builder trait and its
//! error type) and the harness that times builders against each other.
//!
//! The builders themselves live in `sprout-tree`.

pub mod builder;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod node;
pub mod number;
pub mod params;
pub mod report;

pub use builder::TreeBuilder;
pub use error::{Error, Result};
pub use node::{Branches, Node, Tree};
pub use number::Number;
pub use params::{BranchRule, FnRule, Preset, Squares, TreeParams};

//! sprout Tree Builder - Tree construction strategies
//!
//! Three builders produce identical trees from the same parameters:
//!
//! - [`iterative`]: breadth-first with a FIFO work queue
//! - [`recursive`]: depth-first by recursion, height-limited
//! - [`stack`]: depth-first with a heap-allocated work stack
//!
//! [`compare`] times a set of strategies with the engine's harness and
//! [`verify`] checks that they agree.

use sprout_engine::harness::Harness;
use sprout_engine::report::Comparison;
use sprout_engine::{BranchRule, Number, Result, Tree, TreeBuilder, TreeParams};
use tracing::{info, instrument};

pub mod iterative;
pub mod recursive;
pub mod stack;

pub use iterative::BreadthFirst;
pub use recursive::{Recursive, MAX_RECURSIVE_HEIGHT};
pub use stack::ExplicitStack;

/// Available construction strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Iterative,
    Recursive,
    ExplicitStack,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Iterative, Strategy::Recursive, Strategy::ExplicitStack];

    pub fn builder(self) -> &'static dyn TreeBuilder {
        match self {
            Strategy::Iterative => &BreadthFirst,
            Strategy::Recursive => &Recursive,
            Strategy::ExplicitStack => &ExplicitStack,
        }
    }

    pub fn name(self) -> &'static str {
        self.builder().name()
    }
}

/// Time every strategy over `sizes`, one series per strategy in the given
/// order. Every build uses `root` and `rule`; only the height varies.
#[instrument(level = "debug", skip(rule, harness), fields(strategies = strategies.len()))]
pub fn compare(
    strategies: &[Strategy],
    root: Number,
    rule: &dyn BranchRule,
    sizes: &[u32],
    harness: &Harness,
) -> Result<Comparison> {
    let base = TreeParams::new(0, root)?;
    let mut comparison = Comparison::new();

    for &strategy in strategies {
        let builder = strategy.builder();
        info!(builder = builder.name(), "benchmarking");
        let series = harness.series(
            builder.name(),
            |height| builder.build(&base.with_height(height), rule),
            sizes,
        )?;
        comparison.push(series);
    }

    Ok(comparison)
}

/// Outcome of building the same parameters with several strategies
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    /// Tree built by the first strategy
    pub reference: Tree,
    /// Strategies whose tree differs from the reference
    pub mismatches: Vec<Strategy>,
}

impl Verification {
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Build `params` with every strategy and compare the results against the
/// first one. An empty strategy list verifies against the empty tree.
pub fn verify(params: &TreeParams, rule: &dyn BranchRule, strategies: &[Strategy]) -> Result<Verification> {
    let mut built = Vec::with_capacity(strategies.len());
    for &strategy in strategies {
        built.push((strategy, strategy.builder().build(params, rule)?));
    }

    let mut built = built.into_iter();
    let reference = built.next().map(|(_, tree)| tree).unwrap_or_default();
    let mismatches = built
        .filter(|(_, tree)| *tree != reference)
        .map(|(strategy, _)| strategy)
        .collect();

    Ok(Verification {
        reference,
        mismatches,
    })
}

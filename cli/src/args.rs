//! CLI argument definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use sprout_engine::harness::DEFAULT_REPEATS;
use sprout_engine::Preset;
use sprout_tree::Strategy;

/// Build binary trees breadth-first or depth-first and compare their speed
#[derive(Parser, Debug)]
#[command(name = "sprout")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build one tree and print it
    Build {
        /// Number of levels (0 builds the empty tree)
        #[arg(long, default_value = "3", allow_hyphen_values = true)]
        height: String,

        /// Value of the root node
        #[arg(long, default_value = "11", allow_hyphen_values = true)]
        root: String,

        #[arg(long, value_enum, default_value_t = RuleArg::Squares)]
        rule: RuleArg,

        #[arg(long, value_enum, default_value_t = StrategyArg::Iterative)]
        strategy: StrategyArg,

        #[arg(long, value_enum, default_value_t = TreeFormat::Nested)]
        format: TreeFormat,
    },

    /// Time the strategies over a range of heights
    Bench {
        /// First height
        #[arg(long, default_value_t = 2)]
        from: u32,

        /// Stop before this height
        #[arg(long, default_value_t = 20)]
        to: u32,

        #[arg(long, default_value_t = 2)]
        step: u32,

        /// Explicit heights, overriding --from/--to/--step
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<u32>>,

        /// Timed trials per height; the fastest is reported
        #[arg(long, env = "SPROUT_REPEATS", default_value_t = DEFAULT_REPEATS)]
        repeats: u32,

        /// Untimed calls before the trials of each height
        #[arg(long, env = "SPROUT_WARMUP", default_value_t = 0)]
        warmup: u32,

        #[arg(long, default_value = "11", allow_hyphen_values = true)]
        root: String,

        #[arg(long, value_enum, default_value_t = RuleArg::Squares)]
        rule: RuleArg,

        /// Strategies to compare (default: iterative and recursive)
        #[arg(long = "strategy", value_enum, value_delimiter = ',')]
        strategies: Vec<StrategyArg>,

        #[arg(long, value_enum, env = "SPROUT_FORMAT", default_value_t = ReportFormat::Table)]
        format: ReportFormat,
    },

    /// Build one tree with every strategy and check they agree
    Verify {
        #[arg(long, default_value = "3", allow_hyphen_values = true)]
        height: String,

        #[arg(long, default_value = "11", allow_hyphen_values = true)]
        root: String,

        #[arg(long, value_enum, default_value_t = RuleArg::Squares)]
        rule: RuleArg,
    },
}

/// Branch rule presets
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleArg {
    /// left x², right 2 + x²
    Squares,
    /// left 2x, right 2x + 1
    Heap,
    /// left x - 1, right x + 1
    Offset,
}

impl From<RuleArg> for Preset {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::Squares => Preset::Squares,
            RuleArg::Heap => Preset::Heap,
            RuleArg::Offset => Preset::Offset,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    /// Breadth-first with a work queue
    Iterative,
    /// Depth-first recursion
    Recursive,
    /// Depth-first with an explicit stack
    ExplicitStack,
}

impl From<StrategyArg> for Strategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Iterative => Strategy::Iterative,
            StrategyArg::Recursive => Strategy::Recursive,
            StrategyArg::ExplicitStack => Strategy::ExplicitStack,
        }
    }
}

/// How `build` prints a tree
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    /// Compact `{"value": [left, right]}` mapping
    Nested,
    /// Indented JSON
    Json,
    /// ASCII tree
    Text,
}

/// How `bench` prints its results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Csv,
    Json,
}

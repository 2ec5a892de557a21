//! Subcommand implementations

use std::io::{self, Write};

use sprout_engine::harness::{progression, Harness};
use sprout_engine::{Preset, TreeParams};
use sprout_tree::{compare, verify, Strategy};
use tracing::{debug, info, instrument};

use crate::args::{Commands, StrategyArg};
use crate::error::{CliError, CliResult};
use crate::output::{reporter, write_tree};

/// Strategies benchmarked when none are named: the two the comparison is about
const DEFAULT_BENCH_STRATEGIES: [Strategy; 2] = [Strategy::Recursive, Strategy::Iterative];

pub fn execute_command<W: Write>(command: &Commands, out: &mut W) -> CliResult<()> {
    match command {
        Commands::Build {
            height,
            root,
            rule,
            strategy,
            format,
        } => {
            let params = TreeParams::parse(height, root)?;
            let strategy = Strategy::from(*strategy);
            info!(height = params.height(), root = %params.root(), builder = strategy.name(), "building");
            let tree = strategy.builder().build(&params, &Preset::from(*rule))?;
            debug!(nodes = tree.node_count(), "built");
            write_tree(out, &tree, *format)
        }

        Commands::Bench {
            from,
            to,
            step,
            sizes,
            repeats,
            warmup,
            root,
            rule,
            strategies,
            format,
        } => {
            let sizes = match sizes {
                Some(sizes) => sizes.clone(),
                None => progression(*from, *to, *step)?,
            };
            let harness = Harness::new(*repeats)?.with_warmup(*warmup);
            // validates the root; height is replaced per size
            let base = TreeParams::parse("0", root)?;
            let strategies = selected_strategies(strategies);
            let comparison = run_bench(&strategies, base, Preset::from(*rule), &sizes, &harness)?;
            reporter(*format, out).report(&comparison)?;
            Ok(())
        }

        Commands::Verify { height, root, rule } => {
            let params = TreeParams::parse(height, root)?;
            let outcome = verify(&params, &Preset::from(*rule), &Strategy::ALL)?;
            if !outcome.is_consistent() {
                let mismatches: Vec<&str> = outcome.mismatches.iter().map(|s| s.name()).collect();
                return Err(CliError::Inconsistent {
                    reference: Strategy::ALL[0].name(),
                    mismatches: mismatches.join(", "),
                });
            }
            writeln!(
                out,
                "ok: {} strategies agree on {} nodes (height {})",
                Strategy::ALL.len(),
                outcome.reference.node_count(),
                params.height()
            )?;
            Ok(())
        }
    }
}

fn selected_strategies(args: &[StrategyArg]) -> Vec<Strategy> {
    if args.is_empty() {
        DEFAULT_BENCH_STRATEGIES.to_vec()
    } else {
        args.iter().copied().map(Strategy::from).collect()
    }
}

#[instrument(
    level = "debug",
    skip(harness),
    fields(repeats = harness.repeats(), warmup = harness.warmup())
)]
fn run_bench(
    strategies: &[Strategy],
    base: TreeParams,
    rule: Preset,
    sizes: &[u32],
    harness: &Harness,
) -> CliResult<sprout_engine::report::Comparison> {
    let comparison = compare(strategies, base.root(), &rule, sizes, harness)?;
    info!(series = comparison.series.len(), "benchmark finished");
    Ok(comparison)
}

/// Run against stdout
pub fn execute(command: &Commands) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command(command, &mut out)
}

//! sprout CLI - Command-line interface for the tree builders
//!
//! Builds single trees for inspection, checks that the strategies agree, and
//! benchmarks them against each other.

mod args;
mod commands;
mod error;
mod output;

use clap::Parser;
use colored::Colorize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::args::Cli;
use crate::commands::execute;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute(&cli.command) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over the `-d` count when set.
fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter);

    if let Err(e) = tracing_subscriber::registry().with(fmt_layer).try_init() {
        eprintln!("Error: Failed to set up logging: {}", e);
    }
}

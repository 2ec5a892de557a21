//! Rendering of trees and benchmark comparisons

use std::io::Write;
use std::time::Duration;

use sprout_engine::report::{Comparison, Reporter};
use sprout_engine::Tree;

use crate::args::{ReportFormat, TreeFormat};
use crate::error::CliResult;

pub fn write_tree<W: Write>(out: &mut W, tree: &Tree, format: TreeFormat) -> CliResult<()> {
    match format {
        TreeFormat::Nested => writeln!(out, "{}", serde_json::to_string(tree)?)?,
        TreeFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(tree)?)?,
        TreeFormat::Text => write!(out, "{}", tree)?,
    }
    Ok(())
}

/// Reporter for the requested format
pub fn reporter<'a, W: Write + 'a>(format: ReportFormat, out: W) -> Box<dyn Reporter + 'a> {
    match format {
        ReportFormat::Table => Box::new(TableReporter { out }),
        ReportFormat::Csv => Box::new(CsvReporter { out }),
        ReportFormat::Json => Box::new(JsonReporter { out }),
    }
}

fn seconds(d: Option<Duration>) -> String {
    d.map(|d| format!("{:.9}", d.as_secs_f64())).unwrap_or_default()
}

/// Aligned columns: height, one column per builder, fastest builder
pub struct TableReporter<W> {
    out: W,
}

impl<W: Write> Reporter for TableReporter<W> {
    fn report(&mut self, comparison: &Comparison) -> std::io::Result<()> {
        let builders = comparison.builders();
        let width = builders.iter().map(|b| b.len()).max().unwrap_or(0).max(12);

        write!(self.out, "{:>6}", "height")?;
        for builder in &builders {
            write!(self.out, "  {:>width$}", builder, width = width)?;
        }
        writeln!(self.out, "  fastest")?;

        for (size, times) in comparison.rows() {
            write!(self.out, "{:>6}", size)?;
            for time in times {
                write!(self.out, "  {:>width$}", seconds(time), width = width)?;
            }
            writeln!(self.out, "  {}", comparison.fastest_at(size).unwrap_or("-"))?;
        }
        writeln!(self.out, "times in seconds, minimum over all trials")
    }
}

/// `height,<builder>,...` rows, seconds
pub struct CsvReporter<W> {
    out: W,
}

impl<W: Write> Reporter for CsvReporter<W> {
    fn report(&mut self, comparison: &Comparison) -> std::io::Result<()> {
        let mut header = vec!["height"];
        header.extend(comparison.builders());
        writeln!(self.out, "{}", header.join(","))?;

        for (size, times) in comparison.rows() {
            let mut row = vec![size.to_string()];
            row.extend(times.into_iter().map(seconds));
            writeln!(self.out, "{}", row.join(","))?;
        }
        Ok(())
    }
}

/// The comparison as pretty JSON
pub struct JsonReporter<W> {
    out: W,
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, comparison: &Comparison) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, comparison)?;
        writeln!(self.out)
    }
}

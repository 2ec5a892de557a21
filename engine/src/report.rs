//! Builder comparison handed to reporting backends
//!
//! The engine only guarantees the shape of the data: one [`Series`] per
//! builder, in the order the builders were run, each ordered by size.
//! Rendering (tables, CSV, charts) belongs to a [`Reporter`].

use std::io;
use std::time::Duration;

use serde::Serialize;

use crate::harness::Series;

/// Timings of several builders over the same sizes
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Comparison {
    pub series: Vec<Series>,
}

impl Comparison {
    pub fn new() -> Self {
        Comparison { series: Vec::new() }
    }

    pub fn push(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Builder labels in run order
    pub fn builders(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.builder.as_str()).collect()
    }

    /// Sizes measured by the first series
    pub fn sizes(&self) -> Vec<u32> {
        self.series
            .first()
            .map(|s| s.sizes().collect())
            .unwrap_or_default()
    }

    /// Label of the builder with the smallest time at `size`
    pub fn fastest_at(&self, size: u32) -> Option<&str> {
        self.series
            .iter()
            .filter_map(|s| s.sample(size).map(|sample| (s.builder.as_str(), sample.elapsed)))
            .min_by_key(|&(_, elapsed)| elapsed)
            .map(|(builder, _)| builder)
    }

    /// `(size, [time per builder])` rows, `None` where a builder lacks a size
    pub fn rows(&self) -> Vec<(u32, Vec<Option<Duration>>)> {
        self.sizes()
            .into_iter()
            .map(|size| {
                let times = self
                    .series
                    .iter()
                    .map(|s| s.sample(size).map(|sample| sample.elapsed))
                    .collect();
                (size, times)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Renders a comparison somewhere
pub trait Reporter {
    fn report(&mut self, comparison: &Comparison) -> io::Result<()>;
}

//! Benchmark harness
//!
//! Times a builder over a sequence of input sizes. Each size is measured
//! `repeats` times on the monotonic clock and the fastest trial is kept:
//! scheduling noise only ever adds time, so the minimum is the best estimate
//! of the builder's own cost. Do not replace it with a mean or median.

use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::{debug, instrument, trace};

use crate::error::{Error, Result};

/// Timing of one input size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Builder input size (tree height)
    pub size: u32,
    /// Fastest of all trials
    #[serde(rename = "seconds", serialize_with = "secs")]
    pub elapsed: Duration,
    /// Every timed trial, in the order it ran
    #[serde(serialize_with = "secs_list")]
    pub trials: Vec<Duration>,
}

/// Samples of one builder, ordered like the sizes they were measured for
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub builder: String,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn sizes(&self) -> impl Iterator<Item = u32> + '_ {
        self.samples.iter().map(|s| s.size)
    }

    pub fn sample(&self, size: u32) -> Option<&Sample> {
        self.samples.iter().find(|s| s.size == size)
    }
}

fn secs<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(d.as_secs_f64())
}

fn secs_list<S: Serializer>(ds: &[Duration], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(ds.iter().map(Duration::as_secs_f64))
}

/// Repeat count used when none is given
pub const DEFAULT_REPEATS: u32 = 5;

/// Measurement settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Harness {
    repeats: u32,
    warmup: u32,
}

impl Harness {
    /// Fails with [`Error::InvalidArgument`] when `repeats` is 0
    pub fn new(repeats: u32) -> Result<Self> {
        if repeats == 0 {
            return Err(Error::invalid_argument("repeats", "must be at least 1"));
        }
        Ok(Harness { repeats, warmup: 0 })
    }

    /// Untimed calls made before the trials of every size
    pub fn with_warmup(self, warmup: u32) -> Self {
        Harness { warmup, ..self }
    }

    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    pub fn warmup(&self) -> u32 {
        self.warmup
    }

    /// Time `builder` once per size, in the given order.
    ///
    /// The builder's result is dropped as soon as its trial has been timed.
    /// The first builder error aborts the run and is returned unchanged.
    #[instrument(level = "debug", skip_all, fields(sizes = sizes.len(), repeats = self.repeats))]
    pub fn run<F, T>(&self, mut builder: F, sizes: &[u32]) -> Result<Vec<Sample>>
    where
        F: FnMut(u32) -> Result<T>,
    {
        let mut samples = Vec::with_capacity(sizes.len());

        for &size in sizes {
            for _ in 0..self.warmup {
                drop(black_box(builder(size)?));
            }

            let mut trials = Vec::with_capacity(self.repeats as usize);
            for _ in 0..self.repeats {
                let start = Instant::now();
                let output = black_box(builder(size)?);
                let elapsed = start.elapsed();
                drop(output);
                trace!(size, ?elapsed, "trial");
                trials.push(elapsed);
            }

            // repeats >= 1, so there is always a fastest trial
            let elapsed = trials.iter().copied().min().unwrap_or_default();
            debug!(size, ?elapsed, "measured");
            samples.push(Sample {
                size,
                elapsed,
                trials,
            });
        }

        Ok(samples)
    }

    /// Like [`Harness::run`], labelled with the builder's name
    pub fn series<F, T>(&self, builder_name: impl Into<String>, builder: F, sizes: &[u32]) -> Result<Series>
    where
        F: FnMut(u32) -> Result<T>,
    {
        Ok(Series {
            builder: builder_name.into(),
            samples: self.run(builder, sizes)?,
        })
    }
}

impl Default for Harness {
    fn default() -> Self {
        Harness {
            repeats: DEFAULT_REPEATS,
            warmup: 0,
        }
    }
}

/// Time `builder` over `sizes` with `repeats` trials each, keeping the
/// minimum per size.
pub fn run<F, T>(builder: F, sizes: &[u32], repeats: u32) -> Result<Vec<Sample>>
where
    F: FnMut(u32) -> Result<T>,
{
    Harness::new(repeats)?.run(builder, sizes)
}

/// Sizes `start, start + step, ...` below `end`
pub fn progression(start: u32, end: u32, step: u32) -> Result<Vec<u32>> {
    if step == 0 {
        return Err(Error::invalid_argument("step", "must be at least 1"));
    }
    Ok((start..end).step_by(step as usize).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_zero_repeats_rejected() {
        let err = run(|n| Ok(n), &[2], 0).unwrap_err();
        assert_eq!(err.argument(), "repeats");
        assert!(Harness::new(0).is_err());
    }

    #[test]
    fn test_samples_follow_size_order() {
        let samples = run(|n| Ok(vec![0u8; n as usize]), &[8, 2, 6, 4], 3).unwrap();
        let sizes: Vec<u32> = samples.iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![8, 2, 6, 4]);
        for sample in &samples {
            assert_eq!(sample.trials.len(), 3);
        }
    }

    #[test]
    fn test_elapsed_is_minimum_of_trials() {
        let samples = run(|n| Ok((0..n * 1000).sum::<u32>()), &[1, 5, 9], 5).unwrap();
        for sample in samples {
            let min = sample.trials.iter().min().copied().unwrap();
            assert_eq!(sample.elapsed, min);
            assert!(sample.trials.iter().all(|t| sample.elapsed <= *t));
        }
    }

    #[test]
    fn test_settings() {
        let harness = Harness::new(3).unwrap().with_warmup(2);
        assert_eq!(harness.repeats(), 3);
        assert_eq!(harness.warmup(), 2);
        assert_eq!(Harness::new(DEFAULT_REPEATS).unwrap().warmup(), 0);
    }

    #[test]
    fn test_call_count_includes_warmup() {
        let calls = RefCell::new(Vec::new());
        let harness = Harness::new(2).unwrap().with_warmup(1);
        harness
            .run(
                |n| {
                    calls.borrow_mut().push(n);
                    Ok(())
                },
                &[3, 4],
            )
            .unwrap();
        assert_eq!(calls.into_inner(), vec![3, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn test_builder_error_aborts_run() {
        let mut seen = Vec::new();
        let err = run(
            |n| {
                seen.push(n);
                if n == 4 {
                    Err(Error::invalid_argument("height", "boom"))
                } else {
                    Ok(())
                }
            },
            &[2, 4, 6],
            1,
        )
        .unwrap_err();
        assert_eq!(err, Error::invalid_argument("height", "boom"));
        assert_eq!(seen, vec![2, 4]);
    }

    #[test]
    fn test_empty_sizes() {
        assert!(run(|n| Ok(n), &[], 5).unwrap().is_empty());
    }

    #[test]
    fn test_series_serializes_seconds() {
        let series = Series {
            builder: "iterative".into(),
            samples: vec![Sample {
                size: 2,
                elapsed: Duration::from_millis(250),
                trials: vec![Duration::from_millis(500), Duration::from_millis(250)],
            }],
        };
        let value = serde_json::to_value(&series).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "builder": "iterative",
                "samples": [{"size": 2, "seconds": 0.25, "trials": [0.5, 0.25]}]
            })
        );
    }

    #[test]
    fn test_progression() {
        assert_eq!(progression(2, 20, 2).unwrap(), vec![2, 4, 6, 8, 10, 12, 14, 16, 18]);
        assert!(progression(5, 5, 1).unwrap().is_empty());
        assert!(progression(2, 20, 0).is_err());
    }
}

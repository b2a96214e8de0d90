//! Benchmark runner
//!
//! Times repeated invocations of an algorithm against one shared store.
//! Runs are sequential by default so timings stay comparable; in parallel
//! mode each repetition still owns all of its state.

use crate::config::BenchConfig;
use rayon::prelude::*;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::info;

/// Timings of one benchmark
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub label: String,
    pub parallel: bool,
    /// Elapsed wall-clock time per run, in run order
    pub runs: Vec<Duration>,
}

impl BenchReport {
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn total(&self) -> Duration {
        self.runs.iter().sum()
    }

    pub fn average(&self) -> Duration {
        match u32::try_from(self.runs.len()) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.total() / n,
        }
    }

    pub fn min(&self) -> Duration {
        self.runs.iter().copied().min().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.runs.iter().copied().max().unwrap_or_default()
    }
}

/// Drives timed repetitions
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRunner {
    config: BenchConfig,
}

impl BenchmarkRunner {
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run `f` `config.runs` times and collect the elapsed time of each run.
    pub fn run<T, F>(&self, label: &str, f: F) -> BenchReport
    where
        F: Fn() -> T + Sync,
        T: Send,
    {
        let total = self.config.runs;
        let time_run = |i: usize| {
            let start = Instant::now();
            let output = f();
            let elapsed = start.elapsed();
            std::hint::black_box(output);
            info!("{}: Run {}/{} took {} ms", label, i + 1, total, elapsed.as_millis());
            elapsed
        };

        let runs: Vec<Duration> = if self.config.parallel {
            (0..total).into_par_iter().map(time_run).collect()
        } else {
            (0..total).map(time_run).collect()
        };

        let report = BenchReport {
            label: label.to_string(),
            parallel: self.config.parallel,
            runs,
        };
        info!(
            "{}: average {} ms over {} runs",
            label,
            report.average().as_millis(),
            report.len()
        );
        report
    }
}

//! Warm-up, timed runs and the text report.

use crate::config::{HarnessConfig, Resolution};
use crate::corpus::Source;
use crate::error::Result;
use crate::strategy::Strategy;
use std::hint::black_box;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq)]
pub struct StrategyReport {
    strategy: Strategy,
    samples: Vec<Duration>,
}

impl StrategyReport {
    pub fn new(strategy: Strategy, samples: Vec<Duration>) -> Self {
        Self { strategy, samples }
    }

    #[inline(always)]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// One elapsed time per timed invocation, in run order.
    #[inline(always)]
    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }

    pub fn total(&self) -> Duration {
        self.samples.iter().sum()
    }

    /// Arithmetic mean in seconds; zero when there are no samples.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.total().as_secs_f64() / self.samples.len() as f64
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    strategies: Vec<StrategyReport>,
}

impl Report {
    #[inline(always)]
    pub fn strategies(&self) -> &[StrategyReport] {
        &self.strategies
    }

    /// `mean(first) / mean(other)` for every strategy after the first.
    /// `None` when the other mean is zero.
    pub fn speedups(&self) -> Vec<(Strategy, Option<f64>)> {
        let Some((baseline, rest)) = self.strategies.split_first() else {
            return Vec::new();
        };
        rest.iter()
            .map(|r| {
                let mean = r.mean();
                (r.strategy, (mean > 0.0).then(|| baseline.mean() / mean))
            })
            .collect()
    }
}

#[inline]
fn scaled(resolution: Resolution, secs: f64) -> f64 {
    match resolution {
        Resolution::Micros => secs * 1e6,
        Resolution::Millis => secs * 1e3,
    }
}

#[inline]
fn whole(resolution: Resolution, d: Duration) -> u128 {
    match resolution {
        Resolution::Micros => d.as_micros(),
        Resolution::Millis => d.as_millis(),
    }
}

/// Drops everything below `resolution`, so samples match the printed runs.
#[inline]
fn truncate(resolution: Resolution, d: Duration) -> Duration {
    match resolution {
        Resolution::Micros => Duration::from_micros(d.as_micros() as u64),
        Resolution::Millis => Duration::from_millis(d.as_millis() as u64),
    }
}

pub struct Harness {
    config: HarnessConfig,
    strategies: Vec<Strategy>,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, strategies: Strategy::ALL.to_vec() })
    }

    /// Restricts or reorders the strategies; the first one is the speedup baseline.
    pub fn with_strategies(mut self, strategies: &[Strategy]) -> Self {
        self.strategies = strategies.to_vec();
        self
    }

    /// Runs every strategy once untimed, then `runs` timed invocations each,
    /// writing the report to `out`.
    pub fn run<S, W>(&self, src: &S, out: &mut W) -> Result<Report>
    where
        S: Source,
        W: Write,
    {
        let mut dst = Vec::new();

        writeln!(out, "Cache warming...")?;
        info!("warming caches");
        for &strategy in &self.strategies {
            self.invoke(strategy, src, &mut dst)?;
        }
        writeln!(out, "Cache warming completed.")?;
        writeln!(out)?;

        let mut report = Report::default();
        for (i, &strategy) in self.strategies.iter().enumerate() {
            info!(strategy = strategy.label(), runs = self.config.runs, "timing");
            if self.config.per_run {
                writeln!(out, "Method {}: {}", i + 1, strategy.label())?;
            }

            let mut samples = Vec::with_capacity(self.config.runs);
            for run in 0..self.config.runs {
                let start = Instant::now();
                self.invoke(strategy, src, &mut dst)?;
                let elapsed = truncate(self.config.resolution, start.elapsed());
                debug!(strategy = strategy.label(), run, elapsed_us = elapsed.as_micros() as u64);

                if self.config.per_run {
                    writeln!(
                        out,
                        "Run {}: {} {}",
                        run + 1,
                        whole(self.config.resolution, elapsed),
                        self.config.resolution.suffix()
                    )?;
                }
                samples.push(elapsed);
            }

            let result = StrategyReport::new(strategy, samples);
            self.print_average(out, &result)?;
            report.strategies.push(result);
        }

        self.print_speedups(out, &report)?;
        Ok(report)
    }

    #[inline]
    fn invoke<S: Source>(&self, strategy: Strategy, src: &S, dst: &mut Vec<S::Elem>) -> Result<()> {
        if self.config.reuse_destination {
            strategy.run(src, dst)?;
            black_box(&*dst);
        } else {
            let mut fresh = Vec::new();
            strategy.run(src, &mut fresh)?;
            black_box(&fresh);
        }
        Ok(())
    }

    fn print_average<W: Write>(&self, out: &mut W, result: &StrategyReport) -> Result<()> {
        let resolution = self.config.resolution;
        let mean = scaled(resolution, result.mean());
        if self.config.per_run {
            writeln!(out, "Average: {:.1} {}", mean, resolution.suffix())?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}: {:.1} {} (avg)", result.strategy.label(), mean, resolution.suffix())?;
        }
        Ok(())
    }

    fn print_speedups<W: Write>(&self, out: &mut W, report: &Report) -> Result<()> {
        if report.strategies.len() < 2 {
            return Ok(());
        }
        if !self.config.per_run {
            writeln!(out)?;
        }
        writeln!(out, "Performance comparison:")?;
        let baseline = report.strategies[0].strategy;
        for (i, (strategy, speedup)) in report.speedups().into_iter().enumerate() {
            if self.config.per_run {
                write!(out, "Method {} speedup vs Method 1: ", i + 2)?;
            } else {
                write!(out, "{} speedup vs {}: ", strategy.label(), baseline.label())?;
            }
            match speedup {
                Some(x) => writeln!(out, "{:.3}x", x)?,
                None => writeln!(out, "n/a")?,
            }
        }
        Ok(())
    }
}

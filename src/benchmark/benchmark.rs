//! Step timing for the stepper backends
//!
//! [`benchmark`] times `repeat_count` back-to-back steps on the same container
//! (state keeps evolving between repeats). Building and populating the
//! container happens before the clock starts.
//!
//! [`scaling_sweep`] runs the harness over a grid of body counts and thread
//! counts and derives speedup and efficiency against the 1-thread time.

use std::time::Instant;

use log::{debug, info};

use crate::simulation::error::{check_dt, Result, SimError};
use crate::simulation::scenario::uniform_cloud;
use crate::simulation::serial::SerialStepper;
use crate::simulation::states::BodiesContainer;
use crate::simulation::stepper::{Stepper, StepperKind};

/// Total wall-clock seconds for `repeat_count` steps of `stepper`
pub fn benchmark(
    stepper: &dyn Stepper,
    container: &mut BodiesContainer,
    dt: f64,
    g: f64,
    repeat_count: usize,
) -> Result<f64> {
    if repeat_count == 0 {
        return Err(SimError::InvalidRepeatCount(repeat_count));
    }
    check_dt(dt)?;

    let t0 = Instant::now();
    for _ in 0..repeat_count {
        stepper.step(container, dt, g)?;
    }
    let elapsed = t0.elapsed().as_secs_f64();

    debug!(
        "benchmark {}: n = {}, repeats = {repeat_count}, elapsed = {elapsed:.6} s",
        stepper.name(),
        container.size()
    );
    Ok(elapsed)
}

/// Build the backend named by `kind` and time it
///
/// `threads` defaults to 1 and is ignored by the serial backend. The stepper
/// (including the data-parallel thread team) is built before timing starts.
pub fn benchmark_kind(
    kind: StepperKind,
    container: &mut BodiesContainer,
    dt: f64,
    g: f64,
    repeat_count: usize,
    threads: Option<usize>,
) -> Result<f64> {
    if repeat_count == 0 {
        return Err(SimError::InvalidRepeatCount(repeat_count));
    }
    let stepper = kind.build(threads.unwrap_or(1))?;
    benchmark(stepper.as_ref(), container, dt, g, repeat_count)
}

pub fn benchmark_serial(container: &mut BodiesContainer, dt: f64, g: f64, repeat_count: usize) -> Result<f64> {
    benchmark(&SerialStepper::new(), container, dt, g, repeat_count)
}

pub fn benchmark_threaded(
    container: &mut BodiesContainer,
    dt: f64,
    g: f64,
    threads: usize,
    repeat_count: usize,
) -> Result<f64> {
    benchmark_kind(StepperKind::Threaded, container, dt, g, repeat_count, Some(threads))
}

pub fn benchmark_parallel_for(
    container: &mut BodiesContainer,
    dt: f64,
    g: f64,
    worker_hint: usize,
    repeat_count: usize,
) -> Result<f64> {
    benchmark_kind(StepperKind::ParallelFor, container, dt, g, repeat_count, Some(worker_hint))
}

/// One cell of a scaling sweep
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingRecord {
    pub n: usize,
    pub threads: usize,
    pub elapsed: f64,            // seconds for all repeats
    pub speedup: f64,            // 1-thread time / this time
    pub efficiency: f64,         // speedup / threads
    pub computational_cost: f64, // elapsed / n^2
}

impl ScalingRecord {
    pub const CSV_HEADER: &'static str = "N,threads,time_elapsed,speedup,efficiency,computational_cost";

    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{:.6},{:.4},{:.4},{:.6e}",
            self.n, self.threads, self.elapsed, self.speedup, self.efficiency, self.computational_cost
        )
    }
}

/// Time `kind` for every (n, threads) pair
///
/// Every run starts from the same seeded cloud for its `n`. When `threads`
/// has no 1 entry, an extra 1-thread run provides the speedup baseline.
/// The serial backend has no thread axis and gets a single 1-thread row per
/// `n`. `n = 0` has no work to time and is skipped.
pub fn scaling_sweep(
    kind: StepperKind,
    ns: &[usize],
    threads: &[usize],
    repeat_count: usize,
    dt: f64,
    g: f64,
    seed: u64,
) -> Result<Vec<ScalingRecord>> {
    if repeat_count == 0 {
        return Err(SimError::InvalidRepeatCount(repeat_count));
    }
    if let Some(&bad) = threads.iter().find(|&&t| t == 0) {
        return Err(SimError::InvalidThreadCount(bad));
    }

    let threads: &[usize] = match kind {
        StepperKind::Serial => &[1],
        _ => threads,
    };

    let mut records = Vec::with_capacity(ns.len() * threads.len());
    for &n in ns {
        if n == 0 {
            debug!("sweep {kind}: skipping N = 0");
            continue;
        }
        let initial = uniform_cloud(n, seed)?;

        let time_for = |t: usize| -> Result<f64> {
            let mut container = initial.clone();
            benchmark_kind(kind, &mut container, dt, g, repeat_count, Some(t))
        };

        let mut timings = Vec::with_capacity(threads.len());
        for &t in threads {
            timings.push((t, time_for(t)?));
        }
        let base = match timings.iter().find(|(t, _)| *t == 1) {
            Some(&(_, elapsed)) => elapsed,
            None => time_for(1)?,
        };

        for (t, elapsed) in timings {
            let speedup = base / elapsed;
            records.push(ScalingRecord {
                n,
                threads: t,
                elapsed,
                speedup,
                efficiency: speedup / t as f64,
                computational_cost: elapsed / (n as f64 * n as f64),
            });
        }
        info!("sweep {kind}: N = {n} done");
    }
    Ok(records)
}

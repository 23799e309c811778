//! Data-parallel backend on a rayon thread team
//!
//! The outer body loop is handed to rayon. Each body's row sum is independent,
//! so the accumulation is a plain parallel map; collecting it is the barrier
//! before the parallel integration pass.

use log::{debug, trace};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::error::{check_dt, check_threads, Result};
use super::forces::{NewtonianGravity3, SOFTENING_LENGTH};
use super::integrator::kick_drift_body;
use super::states::{BodiesContainer, NVec3};
use super::stepper::Stepper;

/// Stepper owning its own rayon pool
///
/// The pool is built once, so keep the stepper around when stepping in a
/// loop. `worker_hint` is passed to rayon as the team size.
#[derive(Debug)]
pub struct ParallelForStepper {
    worker_hint: usize,
    softening: f64,
    pool: ThreadPool,
}

impl ParallelForStepper {
    pub fn new(worker_hint: usize) -> Result<Self> {
        Self::with_softening(worker_hint, SOFTENING_LENGTH)
    }

    pub fn with_softening(worker_hint: usize, softening: f64) -> Result<Self> {
        check_threads(worker_hint)?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_hint)
            .thread_name(|i| format!("nbsim-team-{i}"))
            .build()?;
        debug!(
            "parallel_for team: hint = {worker_hint}, actual = {}",
            pool.current_num_threads()
        );
        Ok(Self {
            worker_hint,
            softening,
            pool,
        })
    }

    pub fn worker_hint(&self) -> usize {
        self.worker_hint
    }

    /// Number of threads the scheduler actually runs
    pub fn team_size(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Stepper for ParallelForStepper {
    fn name(&self) -> &'static str {
        "parallel_for"
    }

    fn step(&self, container: &mut BodiesContainer, dt: f64, g: f64) -> Result<()> {
        check_dt(dt)?;
        let n = container.size();
        if n == 0 {
            return Ok(());
        }

        let gravity = NewtonianGravity3::with_softening(g, self.softening);

        self.pool.install(|| {
            let bodies = container.bodies();
            let accels: Vec<NVec3> = (0..n)
                .into_par_iter()
                .map(|i| gravity.accel_on(i, bodies))
                .collect();

            container
                .bodies_mut()
                .par_iter_mut()
                .zip(accels.par_iter())
                .for_each(|(b, a)| kick_drift_body(b, a, dt));
        });

        trace!("parallel_for step: n = {n}, team = {}, dt = {dt}", self.team_size());
        Ok(())
    }
}

/// Advance `container` one step on a rayon team of about `worker_hint` threads
///
/// Builds a fresh team per call; use [`ParallelForStepper`] directly for
/// repeated stepping.
pub fn compute_forces_parallel_for(container: &mut BodiesContainer, dt: f64, g: f64, worker_hint: usize) -> Result<()> {
    ParallelForStepper::new(worker_hint)?.step(container, dt, g)
}

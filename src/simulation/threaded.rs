//! Explicit worker-thread backend
//!
//! A `ThreadedStepper` owns a fixed set of worker threads, spawned once when
//! the stepper is built and joined when it is dropped. Each step cuts the
//! body range into contiguous blocks, one per worker, and runs in two phases:
//! 1. accumulation: every worker sums the full row for each body in its block
//!    into a private buffer, reading a snapshot of the bodies taken before the
//!    step. Nothing shared is written
//! 2. integration: every worker advances a private copy of its own block with
//!    its own buffer
//!
//! The calling thread collects every block before writing any of them back,
//! so no body is updated until all accelerations of the step are known.

use std::ops::Range;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use log::{debug, trace};

use super::error::{check_dt, check_threads, Result, SimError};
use super::forces::{NewtonianGravity3, SOFTENING_LENGTH};
use super::integrator::kick_drift;
use super::states::{Body3, BodiesContainer, NVec3};
use super::stepper::Stepper;

/// Work for one block of one step
struct Job {
    bodies: Arc<[Body3]>, // state at the start of the step
    range: Range<usize>,
    gravity: NewtonianGravity3,
    dt: f64,
}

fn worker_loop(jobs: Receiver<Job>, done: Sender<Vec<Body3>>) {
    // exits once the stepper drops its sender
    while let Ok(job) = jobs.recv() {
        let Job { bodies, range, gravity, dt } = job;

        let mut accels = vec![NVec3::zeros(); range.len()];
        gravity.accumulate_range(&bodies, range.clone(), &mut accels);

        let mut block = bodies[range].to_vec();
        kick_drift(&mut block, &accels, dt);

        if done.send(block).is_err() {
            break;
        }
    }
}

#[derive(Debug)]
struct Worker {
    jobs: Sender<Job>,
    done: Receiver<Vec<Body3>>,
    handle: JoinHandle<()>,
}

impl Worker {
    fn spawn(id: usize) -> Result<Self> {
        let (job_tx, job_rx) = channel();
        let (done_tx, done_rx) = channel();
        let handle = thread::Builder::new()
            .name(format!("nbsim-worker-{id}"))
            .spawn(move || worker_loop(job_rx, done_tx))
            .map_err(|e| SimError::ThreadPool(e.to_string()))?;
        Ok(Self {
            jobs: job_tx,
            done: done_rx,
            handle,
        })
    }
}

/// Fixed pool of force workers
#[derive(Debug)]
pub struct ThreadedStepper {
    threads: usize,
    softening: f64,
    // one step at a time owns the channels
    workers: Mutex<Vec<Worker>>,
}

impl ThreadedStepper {
    /// Stepper with `threads` workers and the default softening length
    pub fn new(threads: usize) -> Result<Self> {
        Self::with_softening(threads, SOFTENING_LENGTH)
    }

    /// Spawn the `threads` workers this stepper keeps for its lifetime
    pub fn with_softening(threads: usize, softening: f64) -> Result<Self> {
        check_threads(threads)?;
        let workers = (0..threads).map(Worker::spawn).collect::<Result<Vec<_>>>()?;
        debug!("threaded stepper: spawned {threads} workers");
        Ok(Self {
            threads,
            softening,
            workers: Mutex::new(workers),
        })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Block length so that at most `threads` blocks cover `n` bodies
    fn block_len(&self, n: usize) -> usize {
        n.div_ceil(self.threads.min(n))
    }
}

impl Drop for ThreadedStepper {
    fn drop(&mut self) {
        let workers = match self.workers.get_mut() {
            Ok(w) => std::mem::take(w),
            Err(poisoned) => std::mem::take(poisoned.into_inner()),
        };
        for Worker { jobs, done, handle } in workers {
            drop(jobs);
            drop(done);
            let _ = handle.join();
        }
    }
}

impl Stepper for ThreadedStepper {
    fn name(&self) -> &'static str {
        "threaded"
    }

    fn step(&self, container: &mut BodiesContainer, dt: f64, g: f64) -> Result<()> {
        check_dt(dt)?;
        let n = container.size();
        if n == 0 {
            return Ok(());
        }
        if self.threads > n {
            debug!("threaded step: {} workers requested for {n} bodies, using {n}", self.threads);
        }

        let gravity = NewtonianGravity3::with_softening(g, self.softening);
        let block = self.block_len(n);
        let snapshot: Arc<[Body3]> = Arc::from(container.bodies());

        let workers = self.workers.lock().map_err(|_| SimError::WorkerPanicked)?;

        // Hand out one block per worker; a closed channel means that worker died
        let mut sent = 0;
        let mut failed = false;
        for (worker, start) in workers.iter().zip((0..n).step_by(block)) {
            let job = Job {
                bodies: Arc::clone(&snapshot),
                range: start..(start + block).min(n),
                gravity,
                dt,
            };
            if worker.jobs.send(job).is_err() {
                failed = true;
                break;
            }
            sent += 1;
        }

        // Wait for every dispatched block before touching the container
        let mut blocks = Vec::with_capacity(sent);
        for worker in &workers[..sent] {
            match worker.done.recv() {
                Ok(b) => blocks.push(b),
                Err(_) => failed = true,
            }
        }
        if failed {
            return Err(SimError::WorkerPanicked);
        }

        for (chunk, advanced) in container.bodies_mut().chunks_mut(block).zip(&blocks) {
            chunk.copy_from_slice(advanced);
        }

        trace!("threaded step: n = {n}, workers = {sent}, dt = {dt}");
        Ok(())
    }
}

/// Advance `container` one step across `threads` worker threads
///
/// Spawns and joins a pool for this call only; loops should keep a
/// [`ThreadedStepper`] instead.
pub fn compute_forces_threaded(container: &mut BodiesContainer, dt: f64, g: f64, threads: usize) -> Result<()> {
    ThreadedStepper::new(threads)?.step(container, dt, g)
}

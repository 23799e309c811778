//! Common interface over the force/integration backends
//!
//! Drivers and the benchmark harness only ever see `dyn Stepper`. The set of
//! backends is closed and named by [`StepperKind`].

use std::fmt;

use serde::Deserialize;

use super::error::Result;
use super::forces::SOFTENING_LENGTH;
use super::parallel_for::ParallelForStepper;
use super::serial::SerialStepper;
use super::states::BodiesContainer;
use super::threaded::ThreadedStepper;

/// One full force evaluation plus integration of a [`BodiesContainer`]
///
/// A step borrows the container only for the duration of the call. All
/// accelerations are known before any body is advanced.
pub trait Stepper {
    /// Short backend name used in logs and benchmark output
    fn name(&self) -> &'static str;

    /// Advance every body by `dt` under gravitational constant `g`
    fn step(&self, container: &mut BodiesContainer, dt: f64, g: f64) -> Result<()>;
}

/// Which backend runs the step
#[derive(Deserialize, clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperKind {
    #[serde(rename = "serial")] // single thread, pairwise symmetric sum, reference result
    #[value(name = "serial")]
    Serial,

    #[serde(rename = "threaded")] // fixed pool of persistent worker threads
    #[value(name = "threaded")]
    Threaded,

    #[serde(rename = "parallel_for")] // rayon data-parallel loop on its own thread team
    #[value(name = "parallel_for")]
    ParallelFor,
}

impl StepperKind {
    /// Build the backend with the default softening length
    ///
    /// `threads` is the worker count for the threaded backend and the team
    /// size hint for the data-parallel one. The serial backend ignores it.
    pub fn build(self, threads: usize) -> Result<Box<dyn Stepper + Send + Sync>> {
        self.build_with_softening(threads, SOFTENING_LENGTH)
    }

    pub fn build_with_softening(self, threads: usize, softening: f64) -> Result<Box<dyn Stepper + Send + Sync>> {
        let stepper: Box<dyn Stepper + Send + Sync> = match self {
            StepperKind::Serial => Box::new(SerialStepper::with_softening(softening)),
            StepperKind::Threaded => Box::new(ThreadedStepper::with_softening(threads, softening)?),
            StepperKind::ParallelFor => Box::new(ParallelForStepper::with_softening(threads, softening)?),
        };
        Ok(stepper)
    }
}

impl fmt::Display for StepperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepperKind::Serial => "serial",
            StepperKind::Threaded => "threaded",
            StepperKind::ParallelFor => "parallel_for",
        };
        f.write_str(name)
    }
}

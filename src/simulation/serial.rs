//! Single-threaded reference backend

use log::trace;

use super::error::{check_dt, Result};
use super::forces::{NewtonianGravity3, SOFTENING_LENGTH};
use super::integrator::kick_drift;
use super::states::{BodiesContainer, NVec3};
use super::stepper::Stepper;

/// Serial direct-summation stepper
///
/// Walks pairs in a fixed order (i ascending, then j > i), so identical input
/// always gives identical output. The parallel backends are checked against
/// this one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SerialStepper {
    softening: f64,
}

impl Default for SerialStepper {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialStepper {
    pub fn new() -> Self {
        Self::with_softening(SOFTENING_LENGTH)
    }

    pub fn with_softening(softening: f64) -> Self {
        Self { softening }
    }
}

impl Stepper for SerialStepper {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn step(&self, container: &mut BodiesContainer, dt: f64, g: f64) -> Result<()> {
        check_dt(dt)?;
        let n = container.size();
        if n == 0 {
            return Ok(());
        }

        let gravity = NewtonianGravity3::with_softening(g, self.softening);

        // a_n for every body, complete before anything moves
        let mut accels = vec![NVec3::zeros(); n];
        gravity.accumulate_pairs(container.bodies(), &mut accels);

        kick_drift(container.bodies_mut(), &accels, dt);

        trace!("serial step: n = {n}, dt = {dt}");
        Ok(())
    }
}

/// Advance `container` one step on the calling thread
pub fn compute_forces_serial(container: &mut BodiesContainer, dt: f64, g: f64) -> Result<()> {
    SerialStepper::new().step(container, dt, g)
}

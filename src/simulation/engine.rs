//! High-level runtime engine settings
//!
//! Selects the stepper backend and its worker count used when building and
//! running a `Scenario`

use crate::simulation::stepper::StepperKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engine {
    pub backend: StepperKind, // serial, threaded or parallel_for
    pub threads: usize,       // workers (threaded) or team size hint (parallel_for)
}

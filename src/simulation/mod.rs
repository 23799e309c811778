pub mod states;
pub mod error;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod stepper;
pub mod serial;
pub mod threaded;
pub mod parallel_for;
pub mod diagnostics;
pub mod scenario;

pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body3, BodiesContainer, NVec3, ROW_WIDTH};
pub use simulation::error::{Result, SimError};
pub use simulation::forces::{NewtonianGravity3, SOFTENING_LENGTH};
pub use simulation::integrator::{kick_drift, kick_drift_body};
pub use simulation::stepper::{Stepper, StepperKind};
pub use simulation::serial::{compute_forces_serial, SerialStepper};
pub use simulation::threaded::{compute_forces_threaded, ThreadedStepper};
pub use simulation::parallel_for::{compute_forces_parallel_for, ParallelForStepper};
pub use simulation::diagnostics::{center_of_mass, kinetic_energy, potential_energy, total_angular_momentum, total_energy, total_momentum};
pub use simulation::scenario::{galaxy_disk, lattice_system, uniform_cloud, Scenario};

pub use configuration::config::{BodyConfig, ConfigError, EngineConfig, GalaxyConfig, ParametersConfig, ScenarioConfig};

pub use benchmark::benchmark::{benchmark, benchmark_kind, benchmark_parallel_for, benchmark_serial, benchmark_threaded, scaling_sweep, ScalingRecord};

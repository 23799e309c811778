//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – backend selection and worker count
//! - [`ParametersConfig`] – step size, step count and physical constants
//! - [`BodyConfig`]       – initial state for each explicit body
//! - [`GalaxyConfig`]     – optional generated disk of bodies
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario matching these types:
//!
//! ```yaml
//! engine:
//!   backend: "threaded"     # "serial", "threaded" or "parallel_for"
//!   threads: 4              # ignored by "serial"
//!
//! parameters:
//!   dt: 0.001               # fixed step size
//!   steps: 1000             # number of steps to run
//!   G: 0.001                # gravitational constant
//!   softening: 1.0e-5       # optional softening length
//!
//! bodies:
//!   - x: [ -1.0, 0.0, 0.0 ]
//!     v: [  0.0, 0.5, 0.0 ]
//!     m: 1.0
//!   - x: [  1.0, 0.0, 0.0 ]
//!     v: [  0.0, -0.5, 0.0 ]
//!     m: 1.0
//!
//! galaxy:                   # optional, appended after `bodies`
//!   n: 200
//!   r_max: 350.0
//!   velocity_scale: 4.0
//!   seed: 42
//! ```
//!
//! The engine maps this into a runtime `Scenario`; all physical validation
//! (mass sign, body count) happens there, not during deserialization.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::stepper::StepperKind;

/// Failure to load a scenario file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn default_threads() -> usize {
    1
}

/// Engine configuration: which stepper runs the steps
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub backend: StepperKind, // Backend that evaluates forces and integrates
    #[serde(default = "default_threads")]
    pub threads: usize, // Worker count or team size hint, at least 1
}

/// Numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64,      // time step size
    pub steps: usize, // number of steps in a full run
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant
    pub softening: Option<f64>, // softening length, defaults to the kernel constant
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 3], // Initial position in simulation units
    pub v: [f64; 3], // Initial velocity in simulation units per time unit
    pub m: f64,      // Mass of the body, strictly positive
}

/// Generated disk of bodies on roughly tangential orbits
#[derive(Deserialize, Debug, Clone)]
pub struct GalaxyConfig {
    pub n: usize,            // number of generated bodies
    pub r_max: f64,          // disk radius
    pub velocity_scale: f64, // multiplier on the circular speed estimate
    pub seed: u64,           // deterministic seed
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,         // Backend selection
    pub parameters: ParametersConfig, // Step size and constants
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // Explicit initial bodies
    pub galaxy: Option<GalaxyConfig>, // Generated bodies appended after `bodies`
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path.as_ref())?;
        let reader = std::io::BufReader::new(file);
        let cfg = serde_yaml::from_reader(reader)?;
        Ok(cfg)
    }
}

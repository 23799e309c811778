//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - body state (`BodiesContainer` at t = 0)
//! - the stepper selected by the engine settings
//!
//! Also hosts the body generators used by the CLI, benchmarks and tests.

use std::f64::consts::PI;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::{BodyConfig, GalaxyConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::error::Result;
use crate::simulation::forces::SOFTENING_LENGTH;
use crate::simulation::params::Parameters;
use crate::simulation::states::{BodiesContainer, NVec3};
use crate::simulation::stepper::Stepper;

/// Runtime bundle built from a [`ScenarioConfig`]
///
/// Owns the body container and the stepper that advances it. Drivers call
/// [`Scenario::advance`] once per tick and read bodies back in between.
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub bodies: BodiesContainer,
    pub t: f64, // elapsed simulation time
    stepper: Box<dyn Stepper + Send + Sync>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            steps: p_cfg.steps,
            g: p_cfg.g,
            softening: p_cfg.softening.unwrap_or(SOFTENING_LENGTH),
        };

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            backend: cfg.engine.backend,
            threads: cfg.engine.threads,
        };

        // Bodies: explicit list first, generated disk appended after it
        let mut rows: Vec<f64> = cfg.bodies.iter().flat_map(body_row).collect();
        if let Some(galaxy) = &cfg.galaxy {
            rows.extend(galaxy_from_config(galaxy, parameters.g)?.to_rows());
        }
        let bodies = BodiesContainer::from_rows(&rows)?;

        let stepper = engine
            .backend
            .build_with_softening(engine.threads, parameters.softening)?;

        info!(
            "scenario: {} bodies, backend = {}, threads = {}, dt = {}, steps = {}",
            bodies.size(),
            engine.backend,
            engine.threads,
            parameters.dt,
            parameters.steps
        );

        Ok(Self {
            engine,
            parameters,
            bodies,
            t: 0.0,
            stepper,
        })
    }

    pub fn stepper(&self) -> &dyn Stepper {
        self.stepper.as_ref()
    }

    /// Advance one step of `parameters.dt`
    pub fn advance(&mut self) -> Result<()> {
        self.stepper
            .step(&mut self.bodies, self.parameters.dt, self.parameters.g)?;
        self.t += self.parameters.dt;
        Ok(())
    }

    /// Run the configured number of steps
    pub fn run(&mut self) -> Result<()> {
        for _ in 0..self.parameters.steps {
            self.advance()?;
        }
        info!(
            "scenario complete: {} steps with {}, t = {}",
            self.parameters.steps,
            self.stepper.name(),
            self.t
        );
        Ok(())
    }

    /// Run the configured number of steps, handing `on_frame` the bodies at
    /// step 0 and after every `every`-th step
    ///
    /// `every = 0` is treated as 1.
    pub fn run_with_frames<F>(&mut self, every: usize, mut on_frame: F) -> Result<()>
    where
        F: FnMut(usize, &BodiesContainer),
    {
        let every = every.max(1);
        on_frame(0, &self.bodies);
        for step in 1..=self.parameters.steps {
            self.advance()?;
            if step % every == 0 {
                on_frame(step, &self.bodies);
            }
        }
        info!(
            "scenario complete: {} steps with {}, frame every {every}, t = {}",
            self.parameters.steps,
            self.stepper.name(),
            self.t
        );
        Ok(())
    }
}

fn body_row(bc: &BodyConfig) -> [f64; 7] {
    [bc.x[0], bc.x[1], bc.x[2], bc.v[0], bc.v[1], bc.v[2], bc.m]
}

fn galaxy_from_config(cfg: &GalaxyConfig, g: f64) -> Result<BodiesContainer> {
    galaxy_disk(cfg.n, cfg.r_max, g, cfg.velocity_scale, cfg.seed)
}

/// Random cloud of `n` bodies
///
/// Positions in [-50, 50)^3, velocities in [-1, 1)^3, masses in [0.1, 10).
pub fn uniform_cloud(n: usize, seed: u64) -> Result<BodiesContainer> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut positions = Vec::with_capacity(n);
    let mut velocities = Vec::with_capacity(n);
    let mut masses = Vec::with_capacity(n);
    for _ in 0..n {
        positions.push(NVec3::new(
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
            rng.gen_range(-50.0..50.0),
        ));
        velocities.push(NVec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ));
        masses.push(rng.gen_range(0.1..10.0));
    }

    let mut container = BodiesContainer::with_len(n);
    container.set_all(&positions, &velocities, &masses)?;
    Ok(container)
}

/// Flat disk of `n` bodies in the z = 0 plane
///
/// Radii are drawn so the surface density is uniform out to `r_max`. Each
/// body gets a tangential speed of `velocity_scale * sqrt(G m / r)`.
pub fn galaxy_disk(n: usize, r_max: f64, g: f64, velocity_scale: f64, seed: u64) -> Result<BodiesContainer> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut positions = Vec::with_capacity(n);
    let mut velocities = Vec::with_capacity(n);
    let mut masses = Vec::with_capacity(n);
    for _ in 0..n {
        let r = (rng.gen::<f64>() * r_max * r_max).sqrt();
        let theta = rng.gen::<f64>() * 2.0 * PI;
        let m = rng.gen_range(0.5..5.0);

        // 1e-6 keeps a body at the centre finite
        let v_circ = velocity_scale * (g * m / (r + 1e-6)).sqrt();

        positions.push(NVec3::new(r * theta.cos(), r * theta.sin(), 0.0));
        velocities.push(NVec3::new(-v_circ * theta.sin(), v_circ * theta.cos(), 0.0));
        masses.push(m);
    }

    let mut container = BodiesContainer::with_len(n);
    container.set_all(&positions, &velocities, &masses)?;
    Ok(container)
}

/// Deterministic placement of `n` unit masses at rest, no rng involved
pub fn lattice_system(n: usize) -> Result<BodiesContainer> {
    let mut rows = Vec::with_capacity(n * 7);
    for i in 0..n {
        let i_f = i as f64;
        rows.extend_from_slice(&[
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ]);
    }
    BodiesContainer::from_rows(&rows)
}

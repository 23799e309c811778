//! Numerical and physical parameters for a run
//!
//! `Parameters` holds runtime settings:
//! - step size and number of steps,
//! - gravitational constant `g`,
//! - softening length used by the force kernel

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub dt: f64,        // step size
    pub steps: usize,   // number of steps for a full run
    pub g: f64,         // gravitational constant
    pub softening: f64, // softening length
}

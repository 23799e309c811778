//! Conserved-quantity diagnostics for a body set
//!
//! Used to watch for drift over long runs. The potential uses the same
//! softening as the force kernel so energy is consistent with the dynamics.

use super::forces::NewtonianGravity3;
use super::states::{BodiesContainer, NVec3};

/// Total linear momentum: sum_i m_i * v_i
pub fn total_momentum(container: &BodiesContainer) -> NVec3 {
    container
        .bodies()
        .iter()
        .fold(NVec3::zeros(), |p, b| p + b.m * b.v)
}

/// Total angular momentum about the origin: sum_i m_i * (x_i x v_i)
pub fn total_angular_momentum(container: &BodiesContainer) -> NVec3 {
    container
        .bodies()
        .iter()
        .fold(NVec3::zeros(), |l, b| l + b.m * b.x.cross(&b.v))
}

/// Mass-weighted mean position, `None` when total mass is zero
pub fn center_of_mass(container: &BodiesContainer) -> Option<NVec3> {
    let total: f64 = container.bodies().iter().map(|b| b.m).sum();
    if total <= 0.0 {
        return None;
    }
    let weighted = container
        .bodies()
        .iter()
        .fold(NVec3::zeros(), |acc, b| acc + b.m * b.x);
    Some(weighted / total)
}

/// Kinetic energy: sum_i 1/2 m_i |v_i|^2
pub fn kinetic_energy(container: &BodiesContainer) -> f64 {
    container
        .bodies()
        .iter()
        .map(|b| 0.5 * b.m * b.v.norm_squared())
        .sum()
}

/// Softened potential energy: -sum_{i<j} G m_i m_j / sqrt(|r_ij|^2 + eps^2)
pub fn potential_energy(container: &BodiesContainer, gravity: &NewtonianGravity3) -> f64 {
    let bodies = container.bodies();
    let mut u = 0.0;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let r = bodies[j].x - bodies[i].x;
            let d = (r.norm_squared() + gravity.eps2).sqrt();
            u -= gravity.g * bodies[i].m * bodies[j].m / d;
        }
    }
    u
}

pub fn total_energy(container: &BodiesContainer, gravity: &NewtonianGravity3) -> f64 {
    kinetic_energy(container) + potential_energy(container, gravity)
}

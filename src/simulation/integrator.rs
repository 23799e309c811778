//! Fixed-step semi-implicit (symplectic) Euler update
//!
//! Runs only after the accelerations of every body for the current step are
//! known. Velocity is kicked first, then the new velocity drifts the position:
//!   v_n+1 = v_n + dt * a_n
//!   x_n+1 = x_n + dt * v_n+1

use super::states::{Body3, NVec3};

#[inline]
pub fn kick_drift_body(b: &mut Body3, a: &NVec3, dt: f64) {
    b.v += dt * *a;
    b.x += dt * b.v;
}

/// Advance a slice of bodies with their matching accelerations
///
/// `bodies` and `accels` are index-aligned; callers hand in matching chunks
/// when the update is split across workers.
pub fn kick_drift(bodies: &mut [Body3], accels: &[NVec3], dt: f64) {
    debug_assert_eq!(bodies.len(), accels.len());
    for (b, a) in bodies.iter_mut().zip(accels.iter()) {
        kick_drift_body(b, a, dt);
    }
}

//! Direct-summation Newtonian gravity shared by every stepper
//!
//! Two loop shapes over the same pair kernel:
//! - [`NewtonianGravity3::accumulate_pairs`] visits each unordered pair once
//!   and writes the equal-and-opposite contribution to both bodies (serial)
//! - [`NewtonianGravity3::accel_on`] sums the full row for one body, reading
//!   every other body but writing nothing shared (parallel workers)

use std::ops::Range;

use crate::simulation::states::{Body3, NVec3};

/// Softening length ε in simulation units
///
/// Added as ε² to the squared separation so coincident bodies produce a
/// bounded force.
pub const SOFTENING_LENGTH: f64 = 1.0e-5;

/// 3D Newtonian gravity with Plummer softening (direct n^2 sum)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity3 {
    pub g: f64,    // gravitational constant
    pub eps2: f64, // softening length squared
}

impl NewtonianGravity3 {
    /// Kernel with the default [`SOFTENING_LENGTH`]
    pub fn new(g: f64) -> Self {
        Self::with_softening(g, SOFTENING_LENGTH)
    }

    pub fn with_softening(g: f64, softening: f64) -> Self {
        Self {
            g,
            eps2: softening * softening,
        }
    }

    /// Coefficient `G / (|r|^2 + eps^2)^(3/2)` for the displacement `r`
    #[inline]
    fn coefficient(&self, r: &NVec3) -> f64 {
        // Total softened squared distance:
        // d2 = |r|^2 + eps^2
        let d2 = r.dot(r) + self.eps2;

        // 1 / |r_soft|^3
        let inv_r = d2.sqrt().recip();
        let inv_r3 = inv_r * inv_r * inv_r;

        self.g * inv_r3
    }

    /// Acceleration on a body at `xi` due to a mass `mj` at `xj`
    #[inline]
    pub fn pair_acceleration(&self, xi: &NVec3, xj: &NVec3, mj: f64) -> NVec3 {
        // r points from i to j, so i is pulled along +r
        let r = xj - xi;
        self.coefficient(&r) * mj * r
    }

    /// Add the contribution of every unordered pair (i, j), i < j, into `out`
    ///
    /// Each pair is evaluated once:
    ///   a_i +=  G * m_j * r / |r_soft|^3
    ///   a_j += -G * m_i * r / |r_soft|^3
    /// The visiting order is fixed, so the result is reproducible bit for bit.
    pub fn accumulate_pairs(&self, bodies: &[Body3], out: &mut [NVec3]) {
        let n = bodies.len();
        debug_assert_eq!(n, out.len());

        for i in 0..n {
            let xi = bodies[i].x;
            let mi = bodies[i].m;

            for j in (i + 1)..n {
                let xj = bodies[j].x;
                let mj = bodies[j].m;

                let r = xj - xi;
                let coef = self.coefficient(&r);

                out[i] += coef * mj * r;
                out[j] -= coef * mi * r;
            }
        }
    }

    /// Total acceleration on body `i` from all other bodies, j ascending
    #[inline]
    pub fn accel_on(&self, i: usize, bodies: &[Body3]) -> NVec3 {
        let xi = bodies[i].x;
        let mut a = NVec3::zeros();
        for (j, bj) in bodies.iter().enumerate() {
            if i == j {
                continue; // no self-force
            }
            a += self.pair_acceleration(&xi, &bj.x, bj.m);
        }
        a
    }

    /// Row sums for a contiguous block of bodies
    ///
    /// `out[k]` receives the acceleration of body `range.start + k`.
    pub fn accumulate_range(&self, bodies: &[Body3], range: Range<usize>, out: &mut [NVec3]) {
        debug_assert_eq!(range.len(), out.len());
        for (a, i) in out.iter_mut().zip(range) {
            *a = self.accel_on(i, bodies);
        }
    }
}

//! Core state types for the N-body engine.
//!
//! - `Body3` is one point mass (position, velocity, mass) using `NVec3`
//! - `BodiesContainer` owns a fixed number of bodies for the lifetime of a run
//!
//! The container is the only mutable state a stepper touches. Accessors hand
//! out value copies so a caller sampling between steps never sees a body that
//! is halfway through an update.

use nalgebra::Vector3;

use super::error::{Result, SimError};

pub type NVec3 = Vector3<f64>;

/// Number of columns in the row-major body table: x, y, z, vx, vy, vz, mass
pub const ROW_WIDTH: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body3 {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64,   // mass
}

impl Default for Body3 {
    fn default() -> Self {
        Self {
            x: NVec3::zeros(),
            v: NVec3::zeros(),
            m: 0.0,
        }
    }
}

fn check_mass(index: usize, mass: f64) -> Result<()> {
    // NaN fails the comparison as well
    if mass > 0.0 && mass.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidMass { index, mass })
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(SimError::LengthMismatch { what, expected, actual })
    }
}

/// Fixed-size collection of bodies
///
/// The body count is chosen at construction and never changes. Bodies start
/// zero-valued and are filled in with [`BodiesContainer::set_body`],
/// [`BodiesContainer::set_all`] or [`BodiesContainer::set_rows`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BodiesContainer {
    bodies: Vec<Body3>,
}

impl BodiesContainer {
    /// Create a container of `n` zero-valued bodies
    ///
    /// Takes a signed count so that a negative size coming from a driver is
    /// reported as [`SimError::InvalidSize`] rather than wrapping.
    pub fn new(n: i64) -> Result<Self> {
        let n = usize::try_from(n).map_err(|_| SimError::InvalidSize(n))?;
        Ok(Self::with_len(n))
    }

    /// Create a container of `n` zero-valued bodies
    pub fn with_len(n: usize) -> Self {
        Self {
            bodies: vec![Body3::default(); n],
        }
    }

    /// Build a container from a row-major `N x 7` table
    pub fn from_rows(rows: &[f64]) -> Result<Self> {
        if rows.len() % ROW_WIDTH != 0 {
            let expected = rows.len() / ROW_WIDTH * ROW_WIDTH;
            return Err(SimError::LengthMismatch {
                what: "body rows",
                expected,
                actual: rows.len(),
            });
        }
        let mut container = Self::with_len(rows.len() / ROW_WIDTH);
        container.set_rows(rows)?;
        Ok(container)
    }

    /// Overwrite body `i`
    pub fn set_body(&mut self, i: usize, x: NVec3, v: NVec3, m: f64) -> Result<()> {
        let len = self.bodies.len();
        let body = self
            .bodies
            .get_mut(i)
            .ok_or(SimError::IndexOutOfRange { index: i, len })?;
        check_mass(i, m)?;
        *body = Body3 { x, v, m };
        Ok(())
    }

    /// Overwrite every body at once
    ///
    /// All three slices must hold exactly `size()` entries. Input is fully
    /// validated before anything is written, so a failed call leaves the
    /// container untouched.
    pub fn set_all(&mut self, positions: &[NVec3], velocities: &[NVec3], masses: &[f64]) -> Result<()> {
        let n = self.bodies.len();
        check_len("positions", n, positions.len())?;
        check_len("velocities", n, velocities.len())?;
        check_len("masses", n, masses.len())?;
        for (i, &m) in masses.iter().enumerate() {
            check_mass(i, m)?;
        }

        for (i, b) in self.bodies.iter_mut().enumerate() {
            *b = Body3 {
                x: positions[i],
                v: velocities[i],
                m: masses[i],
            };
        }
        Ok(())
    }

    /// Populate from a row-major `N x 7` table (`x, y, z, vx, vy, vz, mass`)
    pub fn set_rows(&mut self, rows: &[f64]) -> Result<()> {
        check_len("body rows", self.bodies.len() * ROW_WIDTH, rows.len())?;

        let mut positions = Vec::with_capacity(self.bodies.len());
        let mut velocities = Vec::with_capacity(self.bodies.len());
        let mut masses = Vec::with_capacity(self.bodies.len());
        for row in rows.chunks_exact(ROW_WIDTH) {
            positions.push(NVec3::new(row[0], row[1], row[2]));
            velocities.push(NVec3::new(row[3], row[4], row[5]));
            masses.push(row[6]);
        }
        self.set_all(&positions, &velocities, &masses)
    }

    /// Flatten the current state into a row-major `N x 7` table
    pub fn to_rows(&self) -> Vec<f64> {
        let mut rows = Vec::with_capacity(self.bodies.len() * ROW_WIDTH);
        for b in &self.bodies {
            rows.extend_from_slice(&[b.x.x, b.x.y, b.x.z, b.v.x, b.v.y, b.v.z, b.m]);
        }
        rows
    }

    /// Snapshot of body `i`
    pub fn get_body(&self, i: usize) -> Result<Body3> {
        self.bodies.get(i).copied().ok_or(SimError::IndexOutOfRange {
            index: i,
            len: self.bodies.len(),
        })
    }

    pub fn size(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Read-only view of all bodies
    pub fn bodies(&self) -> &[Body3] {
        &self.bodies
    }

    pub fn positions(&self) -> Vec<NVec3> {
        self.bodies.iter().map(|b| b.x).collect()
    }

    pub fn velocities(&self) -> Vec<NVec3> {
        self.bodies.iter().map(|b| b.v).collect()
    }

    pub fn masses(&self) -> Vec<f64> {
        self.bodies.iter().map(|b| b.m).collect()
    }

    // Steppers only; the body count is never changed through this
    pub(crate) fn bodies_mut(&mut self) -> &mut [Body3] {
        &mut self.bodies
    }
}

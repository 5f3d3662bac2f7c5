//! Atomgas - a toroidal 2D atom gas simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spatial grid, heat field, bonding chemistry)
//! - `config`: Data-driven simulation parameters

pub mod config;
pub mod sim;

pub use config::{HeatInit, SimConfig};

/// Simulation tuning constants
pub mod consts {
    /// Maximum frame delta accepted by the driver (prevents long-stall blowups)
    pub const MAX_FRAME_DT: f32 = 0.2;

    /// Blend weight toward the neighbor average per diffusion step
    pub const DIFFUSION_RATE: f32 = 0.03;

    /// Base per-cell bond probability; acceptance is `0.9^(1/dt)` so the
    /// expected bonds per real second stay constant across frame rates
    pub const BOND_CHANCE_BASE: f32 = 0.9;

    /// Squared distance below which a bond attempt is geometrically degenerate
    pub const MIN_BOND_DIST_SQ: f32 = 0.1;

    /// Bonds allowed between one unordered atom pair (single/double/triple)
    pub const MAX_BOND_MULTIPLICITY: u8 = 3;

    /// Initial atom speed (world units per second)
    pub const ATOM_START_SPEED: f32 = 5.0;

    /// Atom radius in render (NDC) space
    pub const ATOM_RADIUS: f32 = 0.002;

    /// Horizontal separation between parallel bond lines of one pair
    pub const BOND_SEPARATION: f32 = ATOM_RADIUS * 0.7;

    /// Bonds whose NDC endpoints are farther apart than this (squared) span
    /// the toroidal seam and are culled from the render buffer
    pub const BOND_SEAM_DIST_SQ: f32 = 0.5;
}

/// Wrap a coordinate into `[0, size)` on the torus
#[inline]
pub fn wrap_coord(v: f32, size: f32) -> f32 {
    let w = v.rem_euclid(size);
    // rem_euclid of a tiny negative v can round to `size` itself
    if w >= size { w - size } else { w }
}

/// Linear interpolation from `a` toward `b` by `t`
#[inline]
pub fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

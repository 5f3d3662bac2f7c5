//! Render buffer emission
//!
//! Flattens world state into upload-ready arrays for the rendering
//! collaborator: per-atom NDC positions, per-bond line endpoints, and the raw
//! heat field. Positions map through `pos * (2 / domain) - 1`; bonds that
//! span the toroidal seam would stretch across the screen and are culled.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::state::World;
use crate::consts::{BOND_SEAM_DIST_SQ, BOND_SEPARATION};

/// Per-atom vertex data that changes every frame
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct AtomVertex {
    pub position: [f32; 2],
}

/// Per-atom vertex data fixed for the whole run
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct AtomAttribute {
    pub valence: u32,
}

/// One endpoint of a bond line
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct BondVertex {
    pub position: [f32; 2],
}

/// One frame's worth of render data
#[derive(Debug)]
pub struct RenderFrame<'w> {
    /// One vertex per atom, in atom-id order
    pub atoms: Vec<AtomVertex>,
    /// Two vertices per visible bond (seam-spanning bonds culled)
    pub bonds: Vec<BondVertex>,
    /// Row-major heat values for a texture-like consumer
    pub heat: &'w [f32],
    pub heat_width: u32,
    pub heat_height: u32,
}

/// World position -> normalized device coordinates
#[inline]
fn to_ndc(pos: Vec2, domain: Vec2) -> Vec2 {
    pos * (2.0 / domain) - Vec2::ONE
}

/// Constant per-atom attributes; build once at startup
pub fn atom_attributes(world: &World) -> Vec<AtomAttribute> {
    world
        .atoms
        .iter()
        .map(|atom| AtomAttribute {
            valence: atom.valence as u32,
        })
        .collect()
}

/// Flatten the current state into render buffers. Valid to call while
/// paused; the buffers then reflect the last advanced frame.
pub fn render_frame(world: &World) -> RenderFrame<'_> {
    let domain = world.domain_size();

    let atoms = world
        .atoms
        .iter()
        .map(|atom| AtomVertex {
            position: to_ndc(atom.pos, domain).into(),
        })
        .collect();

    let mut bonds = Vec::with_capacity(world.bonds.len() * 2);
    for bond in &world.bonds {
        let mut a = to_ndc(world.atoms[bond.a as usize].pos, domain);
        let mut b = to_ndc(world.atoms[bond.b as usize].pos, domain);
        if a.distance_squared(b) > BOND_SEAM_DIST_SQ {
            continue; // endpoints sit on opposite sides of the seam
        }
        // parallel lines for double/triple bonds
        match bond.multiplicity {
            0 => {}
            1 => {
                a.x -= BOND_SEPARATION;
                b.x -= BOND_SEPARATION;
            }
            2 => {
                a.x += BOND_SEPARATION;
                b.x += BOND_SEPARATION;
            }
            m => unreachable!("invalid bond multiplicity {m}"),
        }
        bonds.push(BondVertex { position: a.into() });
        bonds.push(BondVertex { position: b.into() });
    }

    RenderFrame {
        atoms,
        bonds,
        heat: world.heat.as_slice(),
        heat_width: world.grid.width(),
        heat_height: world.grid.height(),
    }
}

//! Per-frame simulation driver
//!
//! Advances the world one frame: heat diffusion, then atom movement with
//! grid reassignment, then the stochastic bonding pass. Each phase finishes
//! completely before the next starts.

use rand::Rng;

use super::chem::bond_energy;
use super::state::{AtomId, World};
use crate::consts::{BOND_CHANCE_BASE, MAX_FRAME_DT, MIN_BOND_DIST_SQ};

/// Driver state; toggled by the host's pause signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}

/// Host input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause toggle (edge, not level)
    pub pause: bool,
}

/// Advance the world by one frame. `dt` is clamped to [`MAX_FRAME_DT`].
/// While paused nothing moves; the host can still emit render buffers, which
/// simply reflect the last advanced state.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if input.pause {
        world.phase = match world.phase {
            SimPhase::Running => SimPhase::Paused,
            SimPhase::Paused => SimPhase::Running,
        };
    }
    if world.phase == SimPhase::Paused {
        return;
    }

    let dt = dt.min(MAX_FRAME_DT);
    world.time_ticks += 1;

    world.heat.diffuse();
    move_atoms(world, dt);
    bonding_pass(world, dt);
}

/// Ballistic movement with toroidal wrap and cell migration
fn move_atoms(world: &mut World, dt: f32) {
    for id in 0..world.atoms.len() as AtomId {
        let atom = &world.atoms[id as usize];
        let new_pos = atom.pos + atom.vel * dt;
        world.move_atom(id, new_pos);
    }
}

/// Per-cell stochastic bond formation.
///
/// Acceptance probability is `0.9^(1/dt)`: the compounded chance of a cell
/// not bonding per unit of real time is frame-rate independent. Rejections
/// (degenerate geometry, saturated valence, insufficient heat) are silent.
fn bonding_pass(world: &mut World, dt: f32) {
    let p_bond = BOND_CHANCE_BASE.powf(1.0 / dt);
    let cell_count = world.grid.width() as usize * world.grid.height() as usize;

    for cell in 0..cell_count {
        let occupants = world.grid.occupants(cell).len();
        if occupants < 2 {
            continue;
        }
        if world.rng.random::<f32>() >= p_bond {
            continue;
        }

        let first = world.rng.random_range(0..occupants);
        let mut second = world.rng.random_range(0..occupants);
        while second == first {
            second = world.rng.random_range(0..occupants);
        }
        let id_a = world.grid.occupants(cell)[first];
        let id_b = world.grid.occupants(cell)[second];

        let a = &world.atoms[id_a as usize];
        let b = &world.atoms[id_b as usize];
        if a.pos.distance_squared(b.pos) < MIN_BOND_DIST_SQ {
            continue; // bond would be too short
        }
        if a.bonds >= a.valence || b.bonds >= b.valence {
            continue;
        }
        if bond_energy(a.valence, b.valence, 0) > world.heat.get(cell) {
            continue; // cell can't pay for this bond
        }
        debug_assert_eq!(world.grid.cell_of(a.pos), cell);
        debug_assert_eq!(world.grid.cell_of(b.pos), cell);

        let spent = world.form_bond(id_a, id_b);
        world.heat.consume(cell, spent);
    }
}

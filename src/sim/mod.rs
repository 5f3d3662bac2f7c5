//! Deterministic simulation module
//!
//! All world-state logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (one `Pcg32` owned by the world)
//! - Single-threaded, frame-stepped; every phase completes before the next
//! - No rendering or platform dependencies (emission produces plain buffers)

pub mod chem;
pub mod emit;
pub mod grid;
pub mod heat;
pub mod state;
pub mod tick;

pub use chem::{bond_energy, mass_of};
pub use emit::{AtomAttribute, AtomVertex, BondVertex, RenderFrame, atom_attributes, render_frame};
pub use grid::SpatialGrid;
pub use heat::HeatField;
pub use state::{Atom, AtomId, Bond, Molecule, MoleculeId, World};
pub use tick::{SimPhase, TickInput, tick};

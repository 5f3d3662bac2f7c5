//! Spatial partitioning grid
//!
//! The toroidal domain is split into unit cells, one per integer coordinate.
//! Each cell holds the ids of the atoms whose floored position falls inside
//! it; the movement step keeps membership exact every frame so the bonding
//! pass can query neighbors per cell instead of scanning all atoms.

use glam::Vec2;

use super::state::AtomId;

/// One cell per integer grid coordinate, row-major
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    width: u32,
    height: u32,
    cells: Vec<Vec<AtomId>>,
}

impl SpatialGrid {
    pub fn new(width: u32, height: u32) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Vec::new(); n],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Map a wrapped position to its cell index (row-major, floor)
    #[inline]
    pub fn cell_of(&self, pos: Vec2) -> usize {
        assert!(
            pos.x >= 0.0 && pos.x < self.width as f32 && pos.y >= 0.0 && pos.y < self.height as f32,
            "position {pos} outside {}x{} domain",
            self.width,
            self.height
        );
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Atom ids currently in a cell (order is not meaningful)
    #[inline]
    pub fn occupants(&self, cell: usize) -> &[AtomId] {
        &self.cells[cell]
    }

    pub fn insert(&mut self, cell: usize, atom: AtomId) {
        self.cells[cell].push(atom);
    }

    /// Swap-delete an atom from a cell. The atom must be a member; anything
    /// else means grid membership has diverged from atom positions.
    pub fn remove(&mut self, cell: usize, atom: AtomId) {
        let members = &mut self.cells[cell];
        let idx = members
            .iter()
            .position(|&id| id == atom)
            .unwrap_or_else(|| panic!("atom {atom} not in cell {cell}"));
        members.swap_remove(idx);
    }

    /// Total membership across all cells
    pub fn total_occupancy(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}

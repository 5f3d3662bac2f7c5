//! World state and the bond/molecule registry
//!
//! The `World` owns every entity plus the grid, heat field, and RNG. All
//! state needed to reproduce a run from a seed lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::chem::{bond_energy, mass_of};
use super::grid::SpatialGrid;
use super::heat::HeatField;
use super::tick::SimPhase;
use crate::config::{HeatInit, SimConfig};
use crate::consts::{ATOM_START_SPEED, MAX_BOND_MULTIPLICITY};
use crate::wrap_coord;

/// Dense atom index, stable for the run
pub type AtomId = u32;
/// Index into the molecule arena; slots are never reused
pub type MoleculeId = u32;

/// A single atom. Population is fixed at world creation.
#[derive(Debug, Clone)]
pub struct Atom {
    /// Bonding capacity class (1-4), fixed at creation
    pub valence: u8,
    /// Current number of bonds (each multiplicity counts)
    pub bonds: u8,
    /// Position, always wrapped into the domain
    pub pos: Vec2,
    pub vel: Vec2,
    /// Owning molecule, if any
    pub molecule: Option<MoleculeId>,
}

/// One bond record. A double bond between `(a, b)` is two records with
/// multiplicities 0 and 1. Append-only.
#[derive(Debug, Clone, Copy)]
pub struct Bond {
    pub a: AtomId,
    pub b: AtomId,
    /// 0/1/2 = single/double/triple
    pub multiplicity: u8,
}

impl Bond {
    /// Whether this record connects the unordered pair `(x, y)`
    #[inline]
    pub fn joins(&self, x: AtomId, y: AtomId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// A connected group of atoms with aggregate mass. A molecule that has been
/// merged away keeps its arena slot but holds no atoms and zero mass.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    pub mass: f32,
    pub atoms: Vec<AtomId>,
}

impl Molecule {
    /// True once every atom has been absorbed into another molecule
    #[inline]
    pub fn is_orphaned(&self) -> bool {
        self.atoms.is_empty()
    }
}

/// The complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub seed: u64,
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    pub molecules: Vec<Molecule>,
    pub grid: SpatialGrid,
    pub heat: HeatField,
    pub rng: Pcg32,
    pub phase: SimPhase,
    /// Frames advanced while running (paused frames don't count)
    pub time_ticks: u64,
}

impl World {
    /// Build a world from config: heat field first, then the atom population,
    /// all drawn from one seeded RNG.
    pub fn new(config: &SimConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(config.seed);

        let heat = HeatField::new(config.width, config.height, |_| match config.heat {
            HeatInit::Constant(value) => value,
            HeatInit::Random { average } => rng.random::<f32>() * average * 2.0,
        });

        let mut world = Self {
            seed: config.seed,
            atoms: Vec::with_capacity(config.atom_count as usize),
            bonds: Vec::new(),
            molecules: Vec::new(),
            grid: SpatialGrid::new(config.width, config.height),
            heat,
            rng,
            phase: SimPhase::Running,
            time_ticks: 0,
        };

        let domain = Vec2::new(config.width as f32, config.height as f32);
        for _ in 0..config.atom_count {
            let pos = Vec2::new(world.rng.random::<f32>(), world.rng.random::<f32>()) * domain;
            let angle = world.rng.random::<f32>() * std::f32::consts::TAU;
            let vel = Vec2::from_angle(angle) * ATOM_START_SPEED;
            let valence = world.rng.random_range(1..=4u8);
            world.create_atom(valence, pos, vel);
        }

        log::info!(
            "world created: {}x{} cells, {} atoms, seed {}",
            config.width,
            config.height,
            world.atoms.len(),
            config.seed
        );
        world
    }

    pub fn domain_size(&self) -> Vec2 {
        Vec2::new(self.grid.width() as f32, self.grid.height() as f32)
    }

    /// Append an atom and register it in its grid cell
    pub fn create_atom(&mut self, valence: u8, pos: Vec2, vel: Vec2) -> AtomId {
        let id = self.atoms.len() as AtomId;
        let cell = self.grid.cell_of(pos);
        self.atoms.push(Atom {
            valence,
            bonds: 0,
            pos,
            vel,
            molecule: None,
        });
        self.grid.insert(cell, id);
        id
    }

    /// Move an atom, wrapping into the domain and migrating grid cells if the
    /// floored position changed. Pure bookkeeping; bonds and molecules are
    /// untouched.
    pub fn move_atom(&mut self, id: AtomId, new_pos: Vec2) {
        let domain = self.domain_size();
        let wrapped = Vec2::new(
            wrap_coord(new_pos.x, domain.x),
            wrap_coord(new_pos.y, domain.y),
        );
        let atom = &mut self.atoms[id as usize];
        let old_cell = self.grid.cell_of(atom.pos);
        let new_cell = self.grid.cell_of(wrapped);
        atom.pos = wrapped;
        if old_cell != new_cell {
            self.grid.remove(old_cell, id);
            self.grid.insert(new_cell, id);
        }
    }

    /// Molecules still holding atoms (orphaned slots excluded)
    pub fn live_molecules(&self) -> usize {
        self.molecules.iter().filter(|m| !m.is_orphaned()).count()
    }

    /// Form a bond between two distinct atoms, returning the energy consumed.
    ///
    /// A repeat bond between an already-connected pair raises the
    /// multiplicity; at the triple-bond cap the call is a zero-energy no-op.
    /// A first bond reconciles molecule membership (create, absorb, or merge)
    /// and assigns the mass-weighted average velocity of the two pre-merge
    /// groups to every atom of the result.
    pub fn form_bond(&mut self, id_a: AtomId, id_b: AtomId) -> f32 {
        assert_ne!(id_a, id_b, "atom {id_a} cannot bond with itself");

        let (valence_a, valence_b) = (
            self.atoms[id_a as usize].valence,
            self.atoms[id_b as usize].valence,
        );
        let a_mol = self.atoms[id_a as usize].molecule;
        let b_mol = self.atoms[id_b as usize].molecule;
        let already_connected = a_mol.is_some() && a_mol == b_mol;

        let mut multiplicity = 0u8;
        if already_connected {
            multiplicity = self
                .bonds
                .iter()
                .filter(|bond| bond.joins(id_a, id_b))
                .count() as u8;
            if multiplicity >= MAX_BOND_MULTIPLICITY {
                return 0.0;
            }
        }
        let energy = bond_energy(valence_a, valence_b, multiplicity);

        self.atoms[id_a as usize].bonds += 1;
        self.atoms[id_b as usize].bonds += 1;
        self.bonds.push(Bond {
            a: id_a,
            b: id_b,
            multiplicity,
        });
        if already_connected {
            // raising the bond order changes nothing about membership or motion
            return energy;
        }

        // pre-merge group masses and velocities for momentum conservation
        let mass_a = a_mol.map_or_else(|| mass_of(valence_a), |m| self.molecules[m as usize].mass);
        let mass_b = b_mol.map_or_else(|| mass_of(valence_b), |m| self.molecules[m as usize].mass);
        let vel_a = self.atoms[id_a as usize].vel;
        let vel_b = self.atoms[id_b as usize].vel;

        let result = match (a_mol, b_mol) {
            (Some(ma), Some(mb)) => {
                // merge: absorb every atom of b's molecule one at a time,
                // leaving b's slot empty and orphaned
                let absorbed = std::mem::take(&mut self.molecules[mb as usize].atoms);
                self.molecules[mb as usize].mass = 0.0;
                for id in absorbed {
                    self.absorb(ma, id);
                }
                ma
            }
            (Some(ma), None) => {
                self.absorb(ma, id_b);
                ma
            }
            (None, Some(mb)) => {
                self.absorb(mb, id_a);
                mb
            }
            (None, None) => {
                let m = self.molecules.len() as MoleculeId;
                self.molecules.push(Molecule::default());
                self.absorb(m, id_a);
                self.absorb(m, id_b);
                m
            }
        };

        // m_a*v_a + m_b*v_b = (m_a + m_b) * v'
        let merged_vel = (vel_a * mass_a + vel_b * mass_b) / (mass_a + mass_b);
        for i in 0..self.molecules[result as usize].atoms.len() {
            let id = self.molecules[result as usize].atoms[i];
            self.atoms[id as usize].vel = merged_vel;
        }

        energy
    }

    /// Add one atom to a molecule, charging the atom's own valence-derived
    /// mass to the molecule's aggregate.
    fn absorb(&mut self, molecule: MoleculeId, atom: AtomId) {
        let mass = mass_of(self.atoms[atom as usize].valence);
        let slot = &mut self.molecules[molecule as usize];
        slot.mass += mass;
        slot.atoms.push(atom);
        self.atoms[atom as usize].molecule = Some(molecule);
        debug_assert!(slot.atoms.len() <= self.atoms.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_world() -> World {
        World::new(&SimConfig {
            width: 10,
            height: 10,
            atom_count: 0,
            seed: 1,
            heat: HeatInit::Constant(10.0),
        })
    }

    #[test]
    fn test_create_atom_registers_in_grid() {
        let mut world = empty_world();
        let id = world.create_atom(4, Vec2::new(3.5, 7.2), Vec2::ZERO);
        let cell = world.grid.cell_of(Vec2::new(3.5, 7.2));
        assert!(world.grid.occupants(cell).contains(&id));
        assert_eq!(world.grid.total_occupancy(), 1);
    }

    #[test]
    fn test_move_atom_wraps_toroidally() {
        let mut world = empty_world();
        let id = world.create_atom(1, Vec2::new(5.0, 5.0), Vec2::ZERO);
        world.move_atom(id, Vec2::new(10.5, 9.5));
        let pos = world.atoms[id as usize].pos;
        assert!((pos.x - 0.5).abs() < 1e-6);
        assert!((pos.y - 9.5).abs() < 1e-6);
    }

    #[test]
    fn test_move_atom_migrates_cells() {
        let mut world = empty_world();
        let id = world.create_atom(1, Vec2::new(2.5, 2.5), Vec2::ZERO);
        let old_cell = world.grid.cell_of(Vec2::new(2.5, 2.5));
        world.move_atom(id, Vec2::new(6.5, 2.5));
        let new_cell = world.grid.cell_of(Vec2::new(6.5, 2.5));
        assert!(!world.grid.occupants(old_cell).contains(&id));
        assert!(world.grid.occupants(new_cell).contains(&id));
        assert_eq!(world.grid.total_occupancy(), 1);
    }

    #[test]
    fn test_first_bond_creates_molecule() {
        let mut world = empty_world();
        let a = world.create_atom(4, Vec2::new(1.0, 1.0), Vec2::ZERO);
        let b = world.create_atom(1, Vec2::new(2.0, 1.0), Vec2::ZERO);
        let energy = world.form_bond(a, b);
        assert!((energy - 0.413).abs() < 1e-6); // H-C single bond

        assert_eq!(world.molecules.len(), 1);
        let mol = &world.molecules[0];
        assert_eq!(mol.atoms, vec![a, b]);
        assert!((mol.mass - (12.011 + 1.008)).abs() < 1e-4);
        assert_eq!(world.atoms[a as usize].molecule, Some(0));
        assert_eq!(world.atoms[b as usize].molecule, Some(0));
        assert_eq!(world.atoms[a as usize].bonds, 1);
        assert_eq!(world.atoms[b as usize].bonds, 1);
    }

    #[test]
    fn test_momentum_conservation_on_merge() {
        let mut world = empty_world();
        let a = world.create_atom(4, Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
        let b = world.create_atom(1, Vec2::new(2.0, 1.0), Vec2::ZERO);
        world.form_bond(a, b);

        let expected = 12.011 / (12.011 + 1.008);
        for id in [a, b] {
            let vel = world.atoms[id as usize].vel;
            assert!((vel.x - expected).abs() < 1e-4, "vel.x = {}", vel.x);
            assert_eq!(vel.y, 0.0);
        }
    }

    #[test]
    fn test_absorb_into_existing_molecule() {
        let mut world = empty_world();
        let a = world.create_atom(4, Vec2::new(1.0, 1.0), Vec2::ZERO);
        let b = world.create_atom(4, Vec2::new(2.0, 1.0), Vec2::ZERO);
        let c = world.create_atom(1, Vec2::new(3.0, 1.0), Vec2::ZERO);
        world.form_bond(a, b);
        world.form_bond(a, c);

        assert_eq!(world.molecules.len(), 1);
        let mol = &world.molecules[0];
        assert_eq!(mol.atoms.len(), 3);
        assert!((mol.mass - (2.0 * 12.011 + 1.008)).abs() < 1e-4);
        assert_eq!(world.atoms[c as usize].molecule, Some(0));
    }

    #[test]
    fn test_merge_orphans_absorbed_molecule() {
        let mut world = empty_world();
        let a = world.create_atom(4, Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
        let b = world.create_atom(4, Vec2::new(2.0, 1.0), Vec2::ZERO);
        let c = world.create_atom(3, Vec2::new(3.0, 1.0), Vec2::new(0.0, 1.0));
        let d = world.create_atom(3, Vec2::new(4.0, 1.0), Vec2::ZERO);
        world.form_bond(a, b); // molecule 0
        world.form_bond(c, d); // molecule 1
        world.form_bond(b, c); // merge 1 into 0

        assert_eq!(world.molecules.len(), 2);
        let merged = &world.molecules[0];
        let orphan = &world.molecules[1];
        assert_eq!(merged.atoms.len(), 4);
        assert!((merged.mass - (2.0 * 12.011 + 2.0 * 14.007)).abs() < 1e-3);
        assert!(orphan.is_orphaned());
        assert_eq!(orphan.mass, 0.0);
        for id in [a, b, c, d] {
            assert_eq!(world.atoms[id as usize].molecule, Some(0));
        }

        // momentum: group masses 24.022 at v=(0.5, 0) and 28.014 at (0, 0.5)
        let total = 2.0 * 12.011 + 2.0 * 14.007;
        let expected = Vec2::new(2.0 * 12.011 * 0.5, 2.0 * 14.007 * 0.5) / total;
        let vel = world.atoms[a as usize].vel;
        assert!((vel - expected).length() < 1e-4);
    }

    #[test]
    fn test_repeat_bond_energy_sequence() {
        let mut world = empty_world();
        let a = world.create_atom(4, Vec2::new(1.0, 1.0), Vec2::ZERO);
        let b = world.create_atom(4, Vec2::new(2.0, 1.0), Vec2::ZERO);
        assert!((world.form_bond(a, b) - 0.347).abs() < 1e-6);
        assert!((world.form_bond(a, b) - 0.614).abs() < 1e-6);
        assert!((world.form_bond(b, a) - 0.839).abs() < 1e-6); // unordered pair
        assert_eq!(world.bonds.len(), 3);
        assert_eq!(world.bonds[2].multiplicity, 2);
    }

    #[test]
    fn test_triple_bond_cap_is_noop() {
        let mut world = empty_world();
        let a = world.create_atom(4, Vec2::new(1.0, 1.0), Vec2::ZERO);
        let b = world.create_atom(4, Vec2::new(2.0, 1.0), Vec2::ZERO);
        for _ in 0..3 {
            assert!(world.form_bond(a, b) > 0.0);
        }
        let bonds_before = world.bonds.len();
        let count_a = world.atoms[a as usize].bonds;
        assert_eq!(world.form_bond(a, b), 0.0);
        assert_eq!(world.bonds.len(), bonds_before);
        assert_eq!(world.atoms[a as usize].bonds, count_a);
    }

    #[test]
    fn test_repeat_bond_leaves_velocity_alone() {
        let mut world = empty_world();
        let a = world.create_atom(2, Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0));
        let b = world.create_atom(2, Vec2::new(2.0, 1.0), Vec2::ZERO);
        world.form_bond(a, b);
        let vel = world.atoms[a as usize].vel;
        world.form_bond(a, b); // O=O, still inside the same molecule
        assert_eq!(world.atoms[a as usize].vel, vel);
        assert_eq!(world.molecules.len(), 1);
    }

    #[test]
    fn test_world_new_population() {
        let world = World::new(&SimConfig {
            width: 16,
            height: 9,
            atom_count: 200,
            seed: 42,
            heat: HeatInit::Random { average: 10.0 },
        });
        assert_eq!(world.atoms.len(), 200);
        assert_eq!(world.grid.total_occupancy(), 200);
        for atom in &world.atoms {
            assert!((1..=4).contains(&atom.valence));
            assert!(atom.pos.x >= 0.0 && atom.pos.x < 16.0);
            assert!(atom.pos.y >= 0.0 && atom.pos.y < 9.0);
            assert!((atom.vel.length() - 5.0).abs() < 1e-3);
        }
    }
}

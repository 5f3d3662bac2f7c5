//! Valence chemistry tables
//!
//! Four valence classes (1-4) stand in for H, O, N, and C. Mass and bond
//! energies come from real single/double/triple bond enthalpies; energies are
//! kJ/mol scaled by 0.001 into simulation units. Unknown valences mean the
//! world state is corrupt, so lookups abort rather than return an error.

/// kJ/mol -> simulation energy units per bond
const ENERGY_SCALE: f32 = 0.001;

/// Atomic-like mass for a valence class
pub fn mass_of(valence: u8) -> f32 {
    match valence {
        1 => 1.008,
        2 => 15.999,
        3 => 14.007,
        4 => 12.011,
        _ => unreachable!("invalid valence {valence}"),
    }
}

/// Energy to form the `multiplicity`-th bond (0/1/2 = single/double/triple)
/// between two valence classes. Symmetric in the valence arguments.
pub fn bond_energy(valence_a: u8, valence_b: u8, multiplicity: u8) -> f32 {
    if valence_a > valence_b {
        return bond_energy(valence_b, valence_a, multiplicity);
    }
    let table = |single: f32, double: f32, triple: f32| {
        ENERGY_SCALE
            * match multiplicity {
                0 => single,
                1 => double,
                2 => triple,
                _ => unreachable!("invalid bond multiplicity {multiplicity}"),
            }
    };
    match (valence_a, valence_b) {
        (1, 1) => table(432.0, 0.0, 0.0), // H-H
        (1, 2) => table(467.0, 0.0, 0.0), // H-O
        (1, 3) => table(391.0, 0.0, 0.0), // H-N
        (1, 4) => table(413.0, 0.0, 0.0), // H-C
        (2, 2) => table(146.0, 495.0, 0.0), // O-O / O=O
        (2, 3) => table(201.0, 607.0, 0.0), // O-N / O=N
        (2, 4) => table(358.0, 745.0, 0.0), // O-C / O=C
        (3, 3) => table(160.0, 418.0, 941.0), // N-N / N=N / N#N
        (3, 4) => table(305.0, 615.0, 891.0), // N-C / N=C / N#C
        (4, 4) => table(347.0, 614.0, 839.0), // C-C / C=C / C#C
        _ => unreachable!("invalid valence pair ({valence_a}, {valence_b})"),
    }
}

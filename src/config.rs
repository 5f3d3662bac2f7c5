//! Simulation parameters
//!
//! Loaded from a JSON file by the host binary, or built in code for tests.

use serde::{Deserialize, Serialize};

/// How the heat field is seeded at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HeatInit {
    /// Every cell starts at the given value
    Constant(f32),
    /// Each cell drawn uniformly from `[0, 2 * average)`
    Random { average: f32 },
}

impl Default for HeatInit {
    fn default() -> Self {
        HeatInit::Random { average: 10.0 }
    }
}

/// Simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Domain width in cells
    pub width: u32,
    /// Domain height in cells
    pub height: u32,
    /// Fixed atom population
    pub atom_count: u32,
    /// RNG seed; same seed and dt sequence reproduce the same run
    pub seed: u64,
    /// Initial heat distribution
    pub heat: HeatInit,
}

impl Default for SimConfig {
    fn default() -> Self {
        let width = 100;
        Self {
            width,
            height: 9 * width / 16,
            atom_count: 10_000,
            seed: 0,
            heat: HeatInit::default(),
        }
    }
}

impl SimConfig {
    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {path}");
                    config
                }
                Err(e) => {
                    log::warn!("Bad config in {path}: {e}; using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Couldn't read {path}: {e}; using defaults");
                Self::default()
            }
        }
    }

    /// Number of cells in the domain
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_domain() {
        let config = SimConfig::default();
        assert_eq!(config.width, 100);
        assert_eq!(config.height, 56);
        assert_eq!(config.atom_count, 10_000);
        assert_eq!(config.cell_count(), 5600);
    }

    #[test]
    fn test_config_round_trip() {
        let config = SimConfig {
            heat: HeatInit::Constant(4.0),
            seed: 7,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 7);
        assert_eq!(back.heat, HeatInit::Constant(4.0));
    }
}

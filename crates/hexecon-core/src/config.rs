use serde::{Deserialize, Serialize};

/// Tiles an asset covers per turn when no configuration is given.
pub const DEFAULT_TRANSPORTATION_PER_TURN: u32 = 5;

/// Engine tuning. Chosen at construction and carried in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Tiles a transferred asset travels per turn. Delivery takes
    /// `ceil(distance / transportation_per_turn)` turns; 0 counts as 1.
    pub transportation_per_turn: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            transportation_per_turn: DEFAULT_TRANSPORTATION_PER_TURN,
        }
    }
}

impl EconomyConfig {
    pub fn with_transportation_per_turn(mut self, tiles: u32) -> Self {
        self.transportation_per_turn = tiles;
        self
    }
}

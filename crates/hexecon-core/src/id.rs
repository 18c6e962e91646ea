use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a factory in the economy.
    pub struct FactoryId;

    /// Identifies a warehouse in the economy.
    pub struct WarehouseId;
}

/// Identifies a resource type (wood, plank, ore). Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetType(pub u32);

/// Identifies a factory template. Keys the recipe catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactoryType(pub u32);

/// Identifies a player or faction that owns buildings and assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub u32);

/// Identity of a single asset. Stable across moves between stocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// Hands out asset ids in increasing order. Owned by the economy manager and
/// persisted with it so restored snapshots never reuse an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIdGen {
    next: u64,
}

impl AssetIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn next_id(&mut self) -> AssetId {
        let id = AssetId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next
    }
}

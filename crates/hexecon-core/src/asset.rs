use crate::id::{AssetId, AssetType, OwnerId};
use crate::position::{CubeCoord, Position};
use serde::{Deserialize, Serialize};

/// Where an asset is in its transport lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetState {
    /// Still travelling (or not yet usable); counts down once per turn.
    InTransit { turns_left: u32 },
    /// Usable by factories and transfers.
    Available,
}

/// A single unit of a resource, owned by a player and located on the map.
///
/// Assets are never destroyed in transit. Moving one to another warehouse is
/// modelled as taking it out of one stock and putting it into another with a
/// fresh countdown via [`Asset::initialize_transport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset<P = CubeCoord> {
    pub id: AssetId,
    pub asset_type: AssetType,
    pub owner: OwnerId,
    pub position: P,
    turns_until_available: u32,
    is_available: bool,
}

impl<P: Position> Asset<P> {
    /// Create an asset. Raw materials (generator output, trade output) start
    /// available; everything else starts one turn away from being usable.
    pub fn new(id: AssetId, asset_type: AssetType, owner: OwnerId, position: P, raw_material: bool) -> Self {
        Self {
            id,
            asset_type,
            owner,
            position,
            turns_until_available: if raw_material { 0 } else { 1 },
            is_available: raw_material,
        }
    }

    pub fn turns_until_available(&self) -> u32 {
        self.turns_until_available
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    pub fn state(&self) -> AssetState {
        if self.is_available {
            AssetState::Available
        } else {
            AssetState::InTransit {
                turns_left: self.turns_until_available,
            }
        }
    }

    /// Advance the transport countdown by one turn. Availability flips exactly
    /// when the countdown reaches zero and never flips back.
    pub fn process(&mut self) {
        if self.is_available {
            return;
        }
        self.turns_until_available = self.turns_until_available.saturating_sub(1);
        if self.turns_until_available == 0 {
            self.is_available = true;
        }
    }

    /// Send the asset to `destination`, arriving after `distance_in_turns` turns.
    ///
    /// A zero distance still leaves the asset unusable until the next
    /// [`Asset::process`] call.
    pub fn initialize_transport(&mut self, destination: P, distance_in_turns: u32) {
        self.position = destination;
        self.turns_until_available = distance_in_turns;
        self.is_available = false;
    }
}

//! Turn bookkeeping: the per-turn report and the deterministic state hash.

use crate::demand::Demand;
use crate::factory::ProductionOutcome;
use crate::id::{AssetType, FactoryId, WarehouseId};

// ---------------------------------------------------------------------------
// Turn report
// ---------------------------------------------------------------------------

/// A batch of assets moved from one warehouse to another to cover a demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub from: WarehouseId,
    pub to: WarehouseId,
    pub asset_type: AssetType,
    pub amount: u32,
    /// Turns until the moved assets become available at `to`.
    pub turns: u32,
}

/// What happened during one call to `EconomyManager::process_factories`.
///
/// Demands are discarded at the end of every turn; the report is the only
/// place they remain visible afterwards.
#[derive(Debug, Clone, Default)]
pub struct TurnReport {
    /// Turn number this report covers (0 for the first processed turn).
    pub turn: u64,
    /// Production result per factory, producers first, then generators.
    pub outcomes: Vec<(FactoryId, ProductionOutcome)>,
    /// Every demand the turn raised, in the order fulfillment handled them.
    pub demands: Vec<Demand>,
    /// Every transfer fulfillment performed.
    pub transfers: Vec<Transfer>,
}

impl TurnReport {
    /// An empty report for `turn`.
    pub fn new(turn: u64) -> Self {
        Self {
            turn,
            ..Self::default()
        }
    }

    /// Factories whose cycle succeeded.
    pub fn produced(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_success()).count()
    }

    /// Factories whose cycle failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.produced()
    }

    /// How `factory`'s cycle ended, if it ran this turn.
    pub fn outcome_of(&self, factory: FactoryId) -> Option<ProductionOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| *id == factory)
            .map(|(_, o)| *o)
    }

    /// Total units moved this turn.
    pub fn units_transferred(&self) -> u32 {
        self.transfers.iter().map(|t| t.amount).sum()
    }
}

// ---------------------------------------------------------------------------
// State hash
// ---------------------------------------------------------------------------

/// Running FNV-1a (64-bit) digest fed by [`EconomyManager::state_hash`].
///
/// Two economies that went through the same calls produce the same digest on
/// every platform, since integers are always fed little-endian. Not
/// cryptographic.
///
/// [`EconomyManager::state_hash`]: crate::economy::EconomyManager::state_hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateHash(pub u64);

impl StateHash {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    /// Start a digest at the FNV offset basis.
    pub fn new() -> Self {
        Self(Self::FNV_OFFSET)
    }

    /// Mix raw bytes into the digest, one byte at a time.
    pub fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(Self::FNV_PRIME);
        }
    }

    /// Mix in an id, counter or turn number.
    pub fn write_u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    /// Mix in a type id, owner, amount or countdown.
    pub fn write_u32(&mut self, v: u32) {
        self.write(&v.to_le_bytes());
    }

    /// The digest so far.
    pub fn finish(self) -> u64 {
        self.0
    }
}

impl Default for StateHash {
    fn default() -> Self {
        Self::new()
    }
}

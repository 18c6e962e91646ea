//! Snapshot support for the economy.
//!
//! The binary format is `bitcode` with a versioned header. With the `json`
//! feature the same state can be written as JSON for tooling and debugging.
//! Both encodings are lossless: catalog, config, buildings, stocks with
//! their transport countdowns, pending demands, the asset id counter and the
//! turn counter all survive a round trip.

use crate::economy::EconomyManager;
use crate::position::Position;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic number identifying an economy snapshot.
pub const SNAPSHOT_MAGIC: u32 = 0x4845_5801;

/// Current format version. Increment when breaking the wire format.
pub const FORMAT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("bitcode encoding failed: {0}")]
    Encode(String),
    #[cfg(feature = "json")]
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("invalid magic number: expected 0x{:08X}, got 0x{:08X}", SNAPSHOT_MAGIC, .0)]
    InvalidMagic(u32),
    #[error("unsupported format version: expected {}, got {}", FORMAT_VERSION, .0)]
    UnsupportedVersion(u32),
    #[error("snapshot from future version {0} (this build supports up to {FORMAT_VERSION})")]
    FutureVersion(u32),
    #[error("bitcode decoding failed: {0}")]
    Decode(String),
    #[cfg(feature = "json")]
    #[error("json decoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Snapshot header
// ---------------------------------------------------------------------------

/// Header stored in front of every snapshot payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub magic: u32,
    pub version: u32,
    /// Turn counter at the time the snapshot was taken.
    pub turn: u64,
}

impl SnapshotHeader {
    pub fn new(turn: u64) -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: FORMAT_VERSION,
            turn,
        }
    }

    pub fn validate(&self) -> Result<(), DeserializeError> {
        if self.magic != SNAPSHOT_MAGIC {
            return Err(DeserializeError::InvalidMagic(self.magic));
        }
        if self.version > FORMAT_VERSION {
            return Err(DeserializeError::FutureVersion(self.version));
        }
        if self.version < FORMAT_VERSION {
            return Err(DeserializeError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a, P> {
    header: SnapshotHeader,
    economy: &'a EconomyManager<P>,
}

#[derive(Deserialize)]
struct SnapshotOwned<P> {
    header: SnapshotHeader,
    economy: EconomyManager<P>,
}

impl<'a, P: Position> SnapshotRef<'a, P> {
    fn new(economy: &'a EconomyManager<P>) -> Self {
        Self {
            header: SnapshotHeader::new(economy.turn()),
            economy,
        }
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

impl<P: Position + Serialize + DeserializeOwned> EconomyManager<P> {
    /// Serialize the whole economy to a binary blob.
    pub fn serialize(&self) -> Result<Vec<u8>, SerializeError> {
        bitcode::serialize(&SnapshotRef::new(self)).map_err(|e| SerializeError::Encode(e.to_string()))
    }

    /// Restore an economy from [`EconomyManager::serialize`] output. The
    /// header is validated before the economy is handed back.
    pub fn deserialize(data: &[u8]) -> Result<Self, DeserializeError> {
        let snapshot: SnapshotOwned<P> =
            bitcode::deserialize(data).map_err(|e| DeserializeError::Decode(e.to_string()))?;
        snapshot.header.validate()?;
        Ok(snapshot.economy)
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, SerializeError> {
        Ok(serde_json::to_string(&SnapshotRef::new(self))?)
    }

    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, DeserializeError> {
        let snapshot: SnapshotOwned<P> = serde_json::from_str(json)?;
        snapshot.header.validate()?;
        Ok(snapshot.economy)
    }
}

//! Hexecon Core -- a turn-based production and logistics economy on a hex map.
//!
//! Owners place warehouses on map tiles and bind factories to them. Each turn
//! factories turn stocked assets into new assets according to their recipe,
//! and warehouses of the same owner ship assets to each other to keep every
//! producer supplied.
//!
//! # Four-Phase Turn Pipeline
//!
//! Each call to [`economy::EconomyManager::process_factories`] advances the
//! economy by one turn:
//!
//! 1. **Transport** -- In-transit assets count down; those reaching zero
//!    become available.
//! 2. **Production** -- Producer factories consume inputs, then generator
//!    factories emit raw materials.
//! 3. **Logistics** -- Per owner, demands are sized to fill each producer's
//!    warehouse and covered from the nearest other warehouses.
//! 4. **Bookkeeping** -- Unmet demands are dropped and the turn counter
//!    advances.
//!
//! # Key Types
//!
//! - [`economy::EconomyManager`] -- Owns all buildings and runs the pipeline.
//! - [`stock::Stock`] -- Capacity-bounded asset container with atomic
//!   insert and take.
//! - [`factory::Factory`] -- Runs a recipe against its warehouse and tracks
//!   productivity over the last ten turns.
//! - [`recipe::RecipeCatalog`] -- Immutable recipes keyed by factory type.
//! - [`logistics`] -- Demand sizing, fulfillment and delivery estimates.
//! - [`trade`] -- Fixed-ratio asset conversion.
//! - [`serialize`] -- Versioned snapshots via bitcode (and JSON with the
//!   `json` feature).

pub mod asset;
pub mod config;
pub mod demand;
pub mod economy;
pub mod factory;
pub mod id;
pub mod logistics;
pub mod position;
pub mod recipe;
pub mod serialize;
pub mod sim;
pub mod stock;
pub mod trade;
pub mod warehouse;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

//! Data-driven content for the hexecon economy.
//!
//! Asset types and factory recipes are written with human-readable names in
//! RON, TOML or JSON and resolved into a [`hexecon_core::recipe::RecipeCatalog`]
//! by [`load_economy_data`].

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, EconomyData, load_economy_data};

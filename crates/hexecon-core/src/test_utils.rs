//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::asset::Asset;
use crate::economy::EconomyManager;
use crate::id::*;
use crate::position::{CubeCoord, Position};
use crate::recipe::{Recipe, RecipeCatalog, RecipeIngredient};

// ===========================================================================
// Asset and factory types
// ===========================================================================

pub const WOOD: AssetType = AssetType(1);
pub const PLANK: AssetType = AssetType(2);
pub const IRON: AssetType = AssetType(3);
pub const NAIL: AssetType = AssetType(4);
pub const CHAIR: AssetType = AssetType(5);

/// Generator: nothing -> 1 wood.
pub const LUMBERJACK: FactoryType = FactoryType(1);
/// Producer: 1 wood -> 1 plank.
pub const SAWMILL: FactoryType = FactoryType(2);
/// Generator: nothing -> 1 iron.
pub const MINE: FactoryType = FactoryType(3);
/// Producer: 1 iron -> 2 nails.
pub const SMITHY: FactoryType = FactoryType(4);
/// Producer: 2 planks + 1 nail -> 1 chair.
pub const CARPENTER: FactoryType = FactoryType(5);

pub const PLAYER: OwnerId = OwnerId(1);

pub fn ingredient(asset_type: AssetType, amount: u32) -> RecipeIngredient {
    RecipeIngredient::new(asset_type, amount)
}

// ===========================================================================
// Catalog and economy
// ===========================================================================

/// Lumberjack, sawmill, mine, smithy and carpenter recipes.
pub fn sample_catalog() -> RecipeCatalog {
    let mut builder = RecipeCatalog::builder();
    builder
        .register(LUMBERJACK, Recipe::new(vec![], vec![ingredient(WOOD, 1)]))
        .register(
            SAWMILL,
            Recipe::new(vec![ingredient(WOOD, 1)], vec![ingredient(PLANK, 1)]),
        )
        .register(MINE, Recipe::new(vec![], vec![ingredient(IRON, 1)]))
        .register(
            SMITHY,
            Recipe::new(vec![ingredient(IRON, 1)], vec![ingredient(NAIL, 2)]),
        )
        .register(
            CARPENTER,
            Recipe::new(
                vec![ingredient(PLANK, 2), ingredient(NAIL, 1)],
                vec![ingredient(CHAIR, 1)],
            ),
        );
    match builder.build() {
        Ok(catalog) => catalog,
        Err(e) => panic!("sample catalog is invalid: {e}"),
    }
}

/// An empty economy over [`sample_catalog`] with default configuration.
pub fn sample_economy() -> EconomyManager {
    EconomyManager::new(sample_catalog())
}

// ===========================================================================
// Stock seeding
// ===========================================================================

/// `count` available assets of one type owned by `owner` at `position`.
pub fn make_assets<P: Position>(
    ids: &mut AssetIdGen,
    asset_type: AssetType,
    owner: OwnerId,
    position: P,
    count: u32,
) -> Vec<Asset<P>> {
    (0..count)
        .map(|_| Asset::new(ids.next_id(), asset_type, owner, position, true))
        .collect()
}

/// Put `count` available assets into a warehouse's stock and return their
/// ids. Panics if the warehouse is missing or cannot hold them.
pub fn seed_stock<P: Position>(
    economy: &mut EconomyManager<P>,
    warehouse: WarehouseId,
    asset_type: AssetType,
    count: u32,
) -> Vec<AssetId> {
    let ids: Vec<AssetId> = (0..count).map(|_| economy.next_asset_id()).collect();
    let Some(target) = economy.get_warehouse_mut(warehouse) else {
        panic!("warehouse {warehouse:?} does not exist");
    };
    let owner = target.owner();
    let position = target.position;
    let assets: Vec<Asset<P>> = ids
        .iter()
        .map(|&id| Asset::new(id, asset_type, owner, position, true))
        .collect();
    assert_eq!(
        target.stock.add_range(assets),
        count as usize,
        "warehouse {warehouse:?} has no room for {count} assets"
    );
    ids
}

/// Two warehouses of [`PLAYER`]: a forest with a lumberjack at the origin and
/// a sawmill two tiles away.
pub fn forest_and_mill(stock_limit: u32) -> (EconomyManager, WarehouseId, WarehouseId) {
    let mut economy = sample_economy();
    let forest_pos = CubeCoord::ORIGIN;
    let mill_pos = CubeCoord::new(1, 1, -2);
    let forest = economy
        .create_warehouse(forest_pos, PLAYER, stock_limit)
        .unwrap_or_else(|e| panic!("forest warehouse: {e}"));
    let mill = economy
        .create_warehouse(mill_pos, PLAYER, stock_limit)
        .unwrap_or_else(|e| panic!("mill warehouse: {e}"));
    economy
        .create_factory(forest_pos, LUMBERJACK, PLAYER, forest)
        .unwrap_or_else(|e| panic!("lumberjack: {e}"));
    economy
        .create_factory(mill_pos, SAWMILL, PLAYER, mill)
        .unwrap_or_else(|e| panic!("sawmill: {e}"));
    (economy, forest, mill)
}

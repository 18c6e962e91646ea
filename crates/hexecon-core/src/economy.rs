//! The economy manager: owns every warehouse and factory and advances the
//! world one turn at a time.
//!
//! A turn ([`EconomyManager::process_factories`]) runs these phases:
//!
//! 1. **Transport** -- every asset in every stock counts down one turn.
//! 2. **Production** -- all producers run, then all generators, so fresh
//!    generator output is never consumed in the turn it appears.
//! 3. **Logistics** -- per owner, fill-to-capacity demands are raised and then
//!    covered from the owner's other warehouses. Leftover demands are dropped.
//! 4. **Bookkeeping** -- the turn counter advances.

use crate::config::EconomyConfig;
use crate::factory::{Factory, ProductionOutcome};
use crate::id::{AssetId, AssetIdGen, AssetType, FactoryId, FactoryType, OwnerId, WarehouseId};
use crate::logistics::{self, DeliveryEstimate};
use crate::position::{CubeCoord, Position};
use crate::recipe::{RecipeCatalog, RecipeIngredient};
use crate::sim::{StateHash, TurnReport};
use crate::trade::{self, TradeError};
use crate::warehouse::Warehouse;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use slotmap::{Key, SlotMap};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors reported by the economy manager.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EconomyError {
    #[error("factory type {0:?} has no recipe")]
    UnknownFactoryType(FactoryType),
    #[error("factory owner {factory_owner:?} does not own warehouse (owner {warehouse_owner:?})")]
    OwnerMismatch {
        factory_owner: OwnerId,
        warehouse_owner: OwnerId,
    },
    #[error("warehouse {existing:?} already occupies that position")]
    WarehouseOccupied { existing: WarehouseId },
    #[error("warehouse {warehouse:?} still has {factories} factory(ies) bound")]
    WarehouseInUse { warehouse: WarehouseId, factories: usize },
    #[error("factory not found: {0:?}")]
    UnknownFactory(FactoryId),
    #[error("warehouse not found: {0:?}")]
    UnknownWarehouse(WarehouseId),
    #[error("internal invariant violated: {0}")]
    Invariant(String),
    #[error(transparent)]
    Trade(#[from] TradeError),
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// All economic state of one game: recipes, configuration, buildings and the
/// turn counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyManager<P = CubeCoord> {
    catalog: RecipeCatalog,
    config: EconomyConfig,
    pub(crate) factories: SlotMap<FactoryId, Factory<P>>,
    pub(crate) warehouses: SlotMap<WarehouseId, Warehouse<P>>,
    asset_ids: AssetIdGen,
    turn: u64,
}

impl<P: Position> EconomyManager<P> {
    /// An empty economy with the default configuration.
    pub fn new(catalog: RecipeCatalog) -> Self {
        Self::with_config(catalog, EconomyConfig::default())
    }

    /// An empty economy with an explicit configuration.
    pub fn with_config(catalog: RecipeCatalog, config: EconomyConfig) -> Self {
        Self {
            catalog,
            config,
            factories: SlotMap::with_key(),
            warehouses: SlotMap::with_key(),
            asset_ids: AssetIdGen::new(),
            turn: 0,
        }
    }

    /// The recipe catalog every factory resolves against.
    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    /// Tunables such as transport speed.
    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    /// Number of turns processed so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Allocate a fresh asset id. Hosts use this to seed stocks directly.
    pub fn next_asset_id(&mut self) -> AssetId {
        self.asset_ids.next_id()
    }

    // -- Warehouses ---------------------------------------------------------

    /// Place a warehouse. At most one warehouse may occupy a position.
    pub fn create_warehouse(
        &mut self,
        position: P,
        owner: OwnerId,
        stock_limit: u32,
    ) -> Result<WarehouseId, EconomyError> {
        if let Some(existing) = self.warehouse_by_position(&position) {
            debug!("[ECONOMY] rejected warehouse at {position:?}: occupied");
            return Err(EconomyError::WarehouseOccupied {
                existing: existing.id,
            });
        }
        Ok(self
            .warehouses
            .insert_with_key(|id| Warehouse::new(id, position, owner, stock_limit)))
    }

    /// The warehouse on `position`, if any.
    pub fn warehouse_by_position(&self, position: &P) -> Option<&Warehouse<P>> {
        self.warehouses.values().find(|w| w.position == *position)
    }

    /// Look up a warehouse that must exist.
    pub fn warehouse_by_id(&self, id: WarehouseId) -> Result<&Warehouse<P>, EconomyError> {
        self.warehouses
            .get(id)
            .ok_or(EconomyError::UnknownWarehouse(id))
    }

    /// Get a warehouse by id.
    pub fn get_warehouse(&self, id: WarehouseId) -> Option<&Warehouse<P>> {
        self.warehouses.get(id)
    }

    /// Get a mutable reference to a warehouse, e.g. to seed its stock.
    pub fn get_warehouse_mut(&mut self, id: WarehouseId) -> Option<&mut Warehouse<P>> {
        self.warehouses.get_mut(id)
    }

    /// Every warehouse, in arena order.
    pub fn warehouses(&self) -> impl Iterator<Item = &Warehouse<P>> {
        self.warehouses.values()
    }

    /// Warehouses currently owned by `owner`.
    pub fn warehouses_by_owner(&self, owner: OwnerId) -> impl Iterator<Item = &Warehouse<P>> {
        self.warehouses.values().filter(move |w| w.owner() == owner)
    }

    /// Number of warehouses on the map.
    pub fn count_warehouses(&self) -> usize {
        self.warehouses.len()
    }

    /// Reassign a warehouse. Its stock and bound factories are untouched.
    pub fn change_warehouse_owner(
        &mut self,
        id: WarehouseId,
        owner: OwnerId,
    ) -> Result<(), EconomyError> {
        self.warehouses
            .get_mut(id)
            .ok_or(EconomyError::UnknownWarehouse(id))?
            .change_owner(owner);
        Ok(())
    }

    /// Remove a warehouse and return it. Refused while factories are bound.
    pub fn remove_warehouse(&mut self, id: WarehouseId) -> Result<Warehouse<P>, EconomyError> {
        if !self.warehouses.contains_key(id) {
            return Err(EconomyError::UnknownWarehouse(id));
        }
        let bound = self.factories.values().filter(|f| f.warehouse == id).count();
        if bound > 0 {
            return Err(EconomyError::WarehouseInUse {
                warehouse: id,
                factories: bound,
            });
        }
        self.warehouses
            .remove(id)
            .ok_or(EconomyError::UnknownWarehouse(id))
    }

    // -- Factories ----------------------------------------------------------

    /// Place a factory bound to `warehouse`. The factory type must have a
    /// recipe and the owner must match the warehouse's owner.
    pub fn create_factory(
        &mut self,
        position: P,
        factory_type: FactoryType,
        owner: OwnerId,
        warehouse: WarehouseId,
    ) -> Result<FactoryId, EconomyError> {
        if !self.catalog.contains(factory_type) {
            debug!("[ECONOMY] rejected factory: no recipe for {factory_type:?}");
            return Err(EconomyError::UnknownFactoryType(factory_type));
        }
        let warehouse_owner = self.warehouse_by_id(warehouse)?.owner();
        if warehouse_owner != owner {
            debug!("[ECONOMY] rejected factory: {owner:?} does not own {warehouse:?}");
            return Err(EconomyError::OwnerMismatch {
                factory_owner: owner,
                warehouse_owner,
            });
        }
        Ok(self
            .factories
            .insert_with_key(|id| Factory::new(id, factory_type, owner, position, warehouse)))
    }

    /// Get a factory by id.
    pub fn get_factory(&self, id: FactoryId) -> Option<&Factory<P>> {
        self.factories.get(id)
    }

    /// Every factory, in arena order.
    pub fn factories(&self) -> impl Iterator<Item = &Factory<P>> {
        self.factories.values()
    }

    /// Factories standing on `position`.
    pub fn factories_by_position(&self, position: &P) -> impl Iterator<Item = &Factory<P>> {
        let position = *position;
        self.factories.values().filter(move |f| f.position == position)
    }

    /// Factories currently owned by `owner`.
    pub fn factories_by_owner(&self, owner: OwnerId) -> impl Iterator<Item = &Factory<P>> {
        self.factories.values().filter(move |f| f.owner() == owner)
    }

    /// Number of factories on the map.
    pub fn count_factories(&self) -> usize {
        self.factories.len()
    }

    /// Reassign a factory. Its warehouse and stocked assets keep their owner,
    /// so a factory may end up working for a warehouse it does not own.
    pub fn change_factory_owner(&mut self, id: FactoryId, owner: OwnerId) -> Result<(), EconomyError> {
        self.factories
            .get_mut(id)
            .ok_or(EconomyError::UnknownFactory(id))?
            .change_owner(owner);
        Ok(())
    }

    /// Remove a factory and return it. Its warehouse stays.
    pub fn remove_factory(&mut self, id: FactoryId) -> Result<Factory<P>, EconomyError> {
        self.factories
            .remove(id)
            .ok_or(EconomyError::UnknownFactory(id))
    }

    // -- Turn processing ----------------------------------------------------

    /// Advance the economy by exactly one turn.
    ///
    /// An error means an internal invariant broke; the turn is abandoned
    /// where it stopped and the turn counter does not advance.
    pub fn process_factories(&mut self) -> Result<TurnReport, EconomyError> {
        let mut report = TurnReport::new(self.turn);
        if let Err(e) = self.run_turn(&mut report) {
            error!("[ECONOMY] turn {} aborted: {e}", self.turn);
            return Err(e);
        }
        self.turn += 1;
        debug!(
            "[ECONOMY] turn {} done: {} produced, {} failed, {} demand(s), {} unit(s) moved",
            report.turn,
            report.produced(),
            report.failed(),
            report.demands.len(),
            report.units_transferred()
        );
        Ok(report)
    }

    fn run_turn(&mut self, report: &mut TurnReport) -> Result<(), EconomyError> {
        // Phase 1: transport countdowns.
        for warehouse in self.warehouses.values_mut() {
            warehouse.stock.process();
        }

        // Phase 2: producers before generators.
        let mut producers = Vec::new();
        let mut generators = Vec::new();
        for factory in self.factories.values() {
            let recipe = self
                .catalog
                .get(factory.factory_type)
                .ok_or(EconomyError::UnknownFactoryType(factory.factory_type))?;
            if recipe.is_generator() {
                generators.push(factory.id);
            } else {
                producers.push(factory.id);
            }
        }
        for id in producers.into_iter().chain(generators) {
            let outcome = self.run_factory(id)?;
            report.outcomes.push((id, outcome));
        }

        // Phase 3: logistics, one owner at a time.
        let mut by_owner: BTreeMap<OwnerId, Vec<WarehouseId>> = BTreeMap::new();
        for warehouse in self.warehouses.values() {
            by_owner.entry(warehouse.owner()).or_default().push(warehouse.id);
        }
        for owned in by_owner.values() {
            logistics::create_factory_demands(
                &self.catalog,
                &self.factories,
                &mut self.warehouses,
                owned,
            )?;
            logistics::fulfill_factory_demands(
                &mut self.warehouses,
                owned,
                self.config.transportation_per_turn,
                report,
            )?;
        }
        Ok(())
    }

    fn run_factory(&mut self, id: FactoryId) -> Result<ProductionOutcome, EconomyError> {
        let factory = self
            .factories
            .get_mut(id)
            .ok_or(EconomyError::UnknownFactory(id))?;
        let recipe = self
            .catalog
            .get(factory.factory_type)
            .ok_or(EconomyError::UnknownFactoryType(factory.factory_type))?;
        let warehouse = self
            .warehouses
            .get_mut(factory.warehouse)
            .ok_or(EconomyError::UnknownWarehouse(factory.warehouse))?;
        factory.process(recipe, warehouse, &mut self.asset_ids)
    }

    // -- Queries ------------------------------------------------------------

    /// Estimate how many turns `owner` needs to gather `ingredients` at
    /// `position` from current available stock.
    pub fn estimate_delivery_time(
        &self,
        ingredients: &[RecipeIngredient],
        owner: OwnerId,
        position: &P,
    ) -> DeliveryEstimate {
        logistics::estimate_delivery_time(
            self.warehouses_by_owner(owner),
            ingredients,
            position,
            self.config.transportation_per_turn,
        )
    }

    /// Trade assets held in `warehouse` for new assets of `output_type`.
    /// Returns the number of assets created.
    pub fn trade_assets(
        &mut self,
        warehouse: WarehouseId,
        inputs: &[AssetId],
        output_type: AssetType,
        trade_factor: u32,
    ) -> Result<u32, EconomyError> {
        let warehouse = self
            .warehouses
            .get_mut(warehouse)
            .ok_or(EconomyError::UnknownWarehouse(warehouse))?;
        let created = trade::trade_assets_for_other_assets(
            &mut warehouse.stock,
            inputs,
            output_type,
            trade_factor,
            &mut self.asset_ids,
        )?;
        Ok(created)
    }

    /// Deterministic hash of the simulation state, for desync detection.
    ///
    /// Covers the counters, every stocked asset with its countdown, pending
    /// demands, factory bindings and production history. Positions are not
    /// hashed since `P` only promises equality and distance.
    pub fn state_hash(&self) -> u64 {
        let mut hash = StateHash::new();
        hash.write_u64(self.turn);
        hash.write_u64(self.asset_ids.allocated());
        for warehouse in self.warehouses.values() {
            hash.write_u64(warehouse.id.data().as_ffi());
            hash.write_u32(warehouse.owner().0);
            hash.write_u32(warehouse.stock.stock_limit());
            for asset in warehouse.stock.iter() {
                hash.write_u64(asset.id.0);
                hash.write_u32(asset.asset_type.0);
                hash.write_u32(asset.owner.0);
                hash.write_u32(asset.turns_until_available());
            }
            for demand in warehouse.demands() {
                hash.write_u64(demand.factory.data().as_ffi());
                hash.write_u32(demand.ingredient.asset_type.0);
                hash.write_u32(demand.ingredient.amount);
            }
        }
        for factory in self.factories.values() {
            hash.write_u64(factory.id.data().as_ffi());
            hash.write_u32(factory.factory_type.0);
            hash.write_u32(factory.owner().0);
            hash.write_u64(factory.warehouse.data().as_ffi());
            let history: Vec<u8> = factory.output_history().collect();
            hash.write(&history);
        }
        hash.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::Demand;
    use crate::test_utils::*;

    #[test]
    fn create_warehouse_rejects_occupied_position() {
        let mut economy = sample_economy();
        let first = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 10).unwrap();
        let err = economy
            .create_warehouse(CubeCoord::ORIGIN, OwnerId(2), 10)
            .unwrap_err();
        assert_eq!(err, EconomyError::WarehouseOccupied { existing: first });
        assert_eq!(economy.count_warehouses(), 1);
    }

    #[test]
    fn create_factory_validates_type_and_owner() {
        let mut economy = sample_economy();
        let wh = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 10).unwrap();

        assert_eq!(
            economy.create_factory(CubeCoord::ORIGIN, FactoryType(99), PLAYER, wh),
            Err(EconomyError::UnknownFactoryType(FactoryType(99)))
        );
        assert_eq!(
            economy.create_factory(CubeCoord::ORIGIN, LUMBERJACK, OwnerId(2), wh),
            Err(EconomyError::OwnerMismatch {
                factory_owner: OwnerId(2),
                warehouse_owner: PLAYER
            })
        );
        assert!(economy.create_factory(CubeCoord::ORIGIN, LUMBERJACK, PLAYER, wh).is_ok());
        assert_eq!(economy.count_factories(), 1);
    }

    #[test]
    fn create_factory_with_unknown_warehouse_fails() {
        let mut economy = sample_economy();
        let stale = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 10).unwrap();
        economy.remove_warehouse(stale).unwrap();
        assert_eq!(
            economy.create_factory(CubeCoord::ORIGIN, LUMBERJACK, PLAYER, stale),
            Err(EconomyError::UnknownWarehouse(stale))
        );
    }

    #[test]
    fn generator_first_turn() {
        let mut economy = sample_economy();
        let wh = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 10).unwrap();
        let f = economy.create_factory(CubeCoord::ORIGIN, LUMBERJACK, PLAYER, wh).unwrap();

        let report = economy.process_factories().unwrap();
        assert_eq!(report.outcome_of(f), Some(ProductionOutcome::Produced));
        assert_eq!(economy.get_factory(f).unwrap().productivity(), 1.0);
        let stock = &economy.get_warehouse(wh).unwrap().stock;
        assert_eq!(stock.count(WOOD), 1);
        assert_eq!(stock.count_available(WOOD), 1);
        assert_eq!(economy.turn(), 1);
    }

    #[test]
    fn producer_without_inputs_raises_transient_demand() {
        let mut economy = sample_economy();
        let wh = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 10).unwrap();
        let f = economy.create_factory(CubeCoord::ORIGIN, SAWMILL, PLAYER, wh).unwrap();

        let report = economy.process_factories().unwrap();
        assert_eq!(economy.get_factory(f).unwrap().productivity(), 0.0);
        assert!(
            report
                .demands
                .iter()
                .any(|d| d.factory == f && d.ingredient.asset_type == WOOD)
        );
        assert!(economy.get_warehouse(wh).unwrap().demands().is_empty());
    }

    #[test]
    fn producers_run_before_generators() {
        let mut economy = sample_economy();
        let wh = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 10).unwrap();
        economy.create_factory(CubeCoord::ORIGIN, LUMBERJACK, PLAYER, wh).unwrap();
        let saw = economy.create_factory(CubeCoord::ORIGIN, SAWMILL, PLAYER, wh).unwrap();

        let first = economy.process_factories().unwrap();
        assert_eq!(first.outcomes[0].0, saw);
        assert_eq!(first.outcome_of(saw), Some(ProductionOutcome::MissingInputs));

        let second = economy.process_factories().unwrap();
        assert_eq!(second.outcome_of(saw), Some(ProductionOutcome::Produced));
    }

    #[test]
    fn aborted_turn_on_unknown_factory_type_keeps_turn() {
        let mut economy = sample_economy();
        let wh = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 10).unwrap();
        let f = economy.create_factory(CubeCoord::ORIGIN, SAWMILL, PLAYER, wh).unwrap();
        economy.process_factories().unwrap();
        assert_eq!(economy.turn(), 1);

        economy.factories[f].factory_type = FactoryType(99);
        assert_eq!(
            economy.process_factories().unwrap_err(),
            EconomyError::UnknownFactoryType(FactoryType(99))
        );
        assert_eq!(economy.turn(), 1);
    }

    #[test]
    fn aborted_turn_on_dangling_warehouse_keeps_turn() {
        let mut economy = sample_economy();
        let wh = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 10).unwrap();
        economy.create_factory(CubeCoord::ORIGIN, LUMBERJACK, PLAYER, wh).unwrap();
        economy.warehouses.remove(wh);

        assert_eq!(
            economy.process_factories().unwrap_err(),
            EconomyError::UnknownWarehouse(wh)
        );
        assert_eq!(economy.turn(), 0);
    }

    #[test]
    fn state_hash_sees_demands_and_bindings() {
        let mut economy = sample_economy();
        let first = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 10).unwrap();
        let second = economy.create_warehouse(CubeCoord::new(1, -1, 0), PLAYER, 10).unwrap();
        let f = economy.create_factory(CubeCoord::ORIGIN, SAWMILL, PLAYER, first).unwrap();
        let base = economy.state_hash();

        let mut with_demand = economy.clone();
        with_demand.warehouses[first].add_demand(Demand::new(f, RecipeIngredient::new(WOOD, 3)));
        assert_ne!(with_demand.state_hash(), base);

        let mut rebound = economy.clone();
        rebound.factories[f].warehouse = second;
        assert_ne!(rebound.state_hash(), base);
    }

    #[test]
    fn remove_warehouse_refused_while_bound() {
        let mut economy = sample_economy();
        let wh = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 10).unwrap();
        let f = economy.create_factory(CubeCoord::ORIGIN, LUMBERJACK, PLAYER, wh).unwrap();

        assert_eq!(
            economy.remove_warehouse(wh).unwrap_err(),
            EconomyError::WarehouseInUse {
                warehouse: wh,
                factories: 1
            }
        );
        economy.remove_factory(f).unwrap();
        assert!(economy.remove_warehouse(wh).is_ok());
        assert_eq!(economy.count_warehouses(), 0);
        assert_eq!(economy.warehouse_by_id(wh).unwrap_err(), EconomyError::UnknownWarehouse(wh));
    }

    #[test]
    fn change_factory_owner_leaves_warehouse_alone() {
        let mut economy = sample_economy();
        let wh = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 10).unwrap();
        let f = economy.create_factory(CubeCoord::ORIGIN, LUMBERJACK, PLAYER, wh).unwrap();

        economy.change_factory_owner(f, OwnerId(2)).unwrap();
        assert_eq!(economy.get_factory(f).unwrap().owner(), OwnerId(2));
        assert_eq!(economy.get_warehouse(wh).unwrap().owner(), PLAYER);
        assert_eq!(economy.factories_by_owner(OwnerId(2)).count(), 1);
        assert_eq!(economy.factories_by_owner(PLAYER).count(), 0);

        // The captured factory keeps producing into the old owner's warehouse.
        economy.process_factories().unwrap();
        let wood = &economy.get_warehouse(wh).unwrap().stock.assets()[0];
        assert_eq!(wood.owner, OwnerId(2));
    }

    #[test]
    fn lookups_by_position_and_owner() {
        let mut economy = sample_economy();
        let here = CubeCoord::new(1, -1, 0);
        let wh = economy.create_warehouse(here, PLAYER, 10).unwrap();
        economy.create_warehouse(CubeCoord::ORIGIN, OwnerId(2), 10).unwrap();
        economy.create_factory(here, LUMBERJACK, PLAYER, wh).unwrap();
        economy.create_factory(here, SAWMILL, PLAYER, wh).unwrap();

        assert_eq!(economy.warehouse_by_position(&here).unwrap().id, wh);
        assert!(economy.warehouse_by_position(&CubeCoord::new(5, -5, 0)).is_none());
        assert_eq!(economy.factories_by_position(&here).count(), 2);
        assert_eq!(economy.warehouses_by_owner(PLAYER).count(), 1);

        economy.change_warehouse_owner(wh, OwnerId(2)).unwrap();
        assert_eq!(economy.warehouses_by_owner(OwnerId(2)).count(), 2);
    }

    #[test]
    fn trade_through_manager() {
        let mut economy = sample_economy();
        let wh = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 0).unwrap();
        let inputs = seed_stock(&mut economy, wh, WOOD, 5);

        assert_eq!(economy.trade_assets(wh, &inputs, PLANK, 2), Ok(2));
        assert_eq!(
            economy.trade_assets(wh, &inputs, PLANK, 2),
            Err(EconomyError::Trade(TradeError::MissingAsset(inputs[0])))
        );
    }

    #[test]
    fn estimate_only_counts_own_warehouses() {
        let mut economy = sample_economy();
        let mine = economy.create_warehouse(CubeCoord::new(1, -1, 0), PLAYER, 0).unwrap();
        let theirs = economy.create_warehouse(CubeCoord::new(-1, 1, 0), OwnerId(2), 0).unwrap();
        seed_stock(&mut economy, theirs, WOOD, 3);

        let need = [RecipeIngredient::new(WOOD, 2)];
        assert_eq!(
            economy
                .estimate_delivery_time(&need, PLAYER, &CubeCoord::ORIGIN)
                .turns,
            None
        );

        seed_stock(&mut economy, mine, WOOD, 2);
        assert_eq!(
            economy
                .estimate_delivery_time(&need, PLAYER, &CubeCoord::ORIGIN)
                .turns,
            Some(1)
        );
    }

    #[test]
    fn state_hash_tracks_progress() {
        let mut a = sample_economy();
        let mut b = sample_economy();
        for economy in [&mut a, &mut b] {
            let wh = economy.create_warehouse(CubeCoord::ORIGIN, PLAYER, 10).unwrap();
            economy.create_factory(CubeCoord::ORIGIN, LUMBERJACK, PLAYER, wh).unwrap();
        }
        assert_eq!(a.state_hash(), b.state_hash());

        a.process_factories().unwrap();
        assert_ne!(a.state_hash(), b.state_hash());
        b.process_factories().unwrap();
        assert_eq!(a.state_hash(), b.state_hash());
    }
}

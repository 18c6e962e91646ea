//! Factories and the per-turn production step.
//!
//! A factory is bound to one warehouse and runs its recipe against that
//! warehouse's stock once per turn:
//!
//! - **Generators** (no recipe inputs) always succeed and emit outputs that
//!   are usable immediately.
//! - **Producers** need every input available in the stock. Inputs are taken
//!   atomically; if any take fails, everything already taken goes back and a
//!   demand is raised. Outputs start one turn away from being usable.
//!
//! Each cycle appends a 1 (success) or 0 (failure) to a ten-slot history whose
//! mean is the factory's productivity.

use crate::asset::Asset;
use crate::demand::Demand;
use crate::economy::EconomyError;
use crate::id::{AssetIdGen, FactoryId, FactoryType, OwnerId, WarehouseId};
use crate::position::{CubeCoord, Position};
use crate::recipe::{Recipe, RecipeIngredient};
use crate::warehouse::Warehouse;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of recent cycles the productivity metric averages over.
pub const PRODUCTIVITY_WINDOW: usize = 10;

/// How a single production cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionOutcome {
    /// All outputs were created.
    Produced,
    /// Inputs were not available; demands were raised.
    MissingInputs,
    /// Inputs were consumed but the warehouse ran out of room for outputs.
    /// Outputs already placed stay; consumed inputs are not restored.
    OutputFull,
}

impl ProductionOutcome {
    pub fn is_success(self) -> bool {
        self == ProductionOutcome::Produced
    }
}

/// A production building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factory<P = CubeCoord> {
    pub id: FactoryId,
    pub factory_type: FactoryType,
    owner: OwnerId,
    pub position: P,
    pub warehouse: WarehouseId,
    #[serde(default)]
    last_outputs: VecDeque<u8>,
}

impl<P: Position> Factory<P> {
    pub fn new(
        id: FactoryId,
        factory_type: FactoryType,
        owner: OwnerId,
        position: P,
        warehouse: WarehouseId,
    ) -> Self {
        Self {
            id,
            factory_type,
            owner,
            position,
            warehouse,
            last_outputs: VecDeque::with_capacity(PRODUCTIVITY_WINDOW),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Reassign the factory. The bound warehouse and its assets keep their
    /// owner, so a factory can end up feeding from another player's warehouse.
    pub fn change_owner(&mut self, owner: OwnerId) {
        self.owner = owner;
    }

    /// Mean of the recent output history in `[0, 1]`; 0 with no history.
    pub fn productivity(&self) -> f32 {
        if self.last_outputs.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.last_outputs.iter().map(|&v| v as u32).sum();
        sum as f32 / self.last_outputs.len() as f32
    }

    /// Recent cycle results, oldest first.
    pub fn output_history(&self) -> impl Iterator<Item = u8> + '_ {
        self.last_outputs.iter().copied()
    }

    fn record_output(&mut self, success: bool) {
        if self.last_outputs.len() == PRODUCTIVITY_WINDOW {
            self.last_outputs.pop_front();
        }
        self.last_outputs.push_back(success as u8);
    }

    /// Run one production cycle against the bound warehouse.
    ///
    /// Returns an error only if putting already-taken inputs back fails,
    /// which would mean the stock lost track of its own capacity.
    pub fn process(
        &mut self,
        recipe: &Recipe,
        warehouse: &mut Warehouse<P>,
        asset_ids: &mut AssetIdGen,
    ) -> Result<ProductionOutcome, EconomyError> {
        let generator = recipe.is_generator();

        let mut outcome = if generator {
            ProductionOutcome::Produced
        } else {
            self.consume_inputs(recipe, warehouse)?
        };

        if outcome.is_success() {
            'outputs: for output in &recipe.outputs {
                for _ in 0..output.amount {
                    let asset = Asset::new(
                        asset_ids.next_id(),
                        output.asset_type,
                        self.owner,
                        self.position,
                        generator,
                    );
                    if !warehouse.stock.add(asset) {
                        debug!(
                            "[FACTORY] {:?} output {:?} does not fit into warehouse {:?}",
                            self.id, output.asset_type, warehouse.id
                        );
                        outcome = ProductionOutcome::OutputFull;
                        break 'outputs;
                    }
                }
            }
        }

        self.record_output(outcome.is_success());
        Ok(outcome)
    }

    fn consume_inputs(
        &self,
        recipe: &Recipe,
        warehouse: &mut Warehouse<P>,
    ) -> Result<ProductionOutcome, EconomyError> {
        let feasible = recipe
            .inputs
            .iter()
            .all(|input| warehouse.stock.count_available(input.asset_type) >= input.amount);

        if !feasible {
            for input in &recipe.inputs {
                let available = warehouse.stock.count_available(input.asset_type);
                if available < input.amount {
                    warehouse.add_demand(Demand::new(
                        self.id,
                        RecipeIngredient::new(input.asset_type, input.amount - available),
                    ));
                }
            }
            return Ok(ProductionOutcome::MissingInputs);
        }

        let mut taken = Vec::new();
        for input in &recipe.inputs {
            let batch = warehouse.stock.take(input.asset_type, input.amount);
            if batch.is_empty() {
                // An earlier input of the same type already drained the stock.
                let count = taken.len();
                if warehouse.stock.add_range(taken) != count {
                    return Err(EconomyError::Invariant(format!(
                        "factory {:?} could not return {count} inputs to warehouse {:?}",
                        self.id, warehouse.id
                    )));
                }
                warehouse.add_demand(Demand::new(self.id, *input));
                return Ok(ProductionOutcome::MissingInputs);
            }
            taken.extend(batch);
        }

        Ok(ProductionOutcome::Produced)
    }
}

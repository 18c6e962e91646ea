//! Moving assets between warehouses of the same owner.
//!
//! Each turn, after production, the economy runs two passes per owner:
//!
//! 1. [`create_factory_demands`] sizes a demand per producer input so that
//!    the warehouse fills up to its limit in the recipe's proportions.
//! 2. [`fulfill_factory_demands`] covers every pending demand greedily from
//!    the owner's other warehouses, nearest first. Moved assets re-enter the
//!    destination stock in transit for `ceil(distance / tiles_per_turn)`
//!    turns. Whatever is left unmet is dropped.
//!
//! [`estimate_delivery_time`] answers the read-only question "how long until
//! these ingredients could reach this tile" with the same distance model.

use crate::demand::Demand;
use crate::economy::EconomyError;
use crate::factory::Factory;
use crate::id::{AssetType, FactoryId, WarehouseId};
use crate::position::{Position, distance_in_turns};
use crate::recipe::{Recipe, RecipeCatalog, RecipeIngredient};
use crate::sim::{Transfer, TurnReport};
use crate::warehouse::Warehouse;
use log::{debug, trace};
use slotmap::SlotMap;

// ---------------------------------------------------------------------------
// Demand creation
// ---------------------------------------------------------------------------

/// Per-input amounts that fill `stock_limit` slots in recipe proportion.
///
/// Whole cycles are packed first; the leftover slots go to each input up to
/// its per-cycle amount.
pub fn target_amounts(recipe: &Recipe, stock_limit: u32) -> Vec<RecipeIngredient> {
    let per_cycle = recipe.total_input_per_cycle();
    if per_cycle == 0 {
        return Vec::new();
    }
    let cycles = stock_limit / per_cycle;
    let remainder = stock_limit % per_cycle;
    recipe
        .inputs
        .iter()
        .map(|input| {
            RecipeIngredient::new(
                input.asset_type,
                (cycles * input.amount).saturating_add(remainder.min(input.amount)),
            )
        })
        .collect()
}

/// Raise fill-to-capacity demands for every producer bound to one of
/// `owner_warehouses`. Warehouses without a stock limit are skipped.
pub(crate) fn create_factory_demands<P: Position>(
    catalog: &RecipeCatalog,
    factories: &SlotMap<FactoryId, Factory<P>>,
    warehouses: &mut SlotMap<WarehouseId, Warehouse<P>>,
    owner_warehouses: &[WarehouseId],
) -> Result<(), EconomyError> {
    for factory in factories.values() {
        if !owner_warehouses.contains(&factory.warehouse) {
            continue;
        }
        let recipe = catalog.get(factory.factory_type).ok_or_else(|| {
            EconomyError::Invariant(format!(
                "factory {:?} has type {:?} missing from the catalog",
                factory.id, factory.factory_type
            ))
        })?;
        if recipe.is_generator() {
            continue;
        }
        let warehouse = warehouses
            .get_mut(factory.warehouse)
            .ok_or(EconomyError::UnknownWarehouse(factory.warehouse))?;
        let stock_limit = warehouse.stock.stock_limit();
        if stock_limit == 0 {
            continue;
        }

        for target in target_amounts(recipe, stock_limit) {
            let current = warehouse.stock.count(target.asset_type);
            if target.amount > current {
                warehouse.add_demand(Demand::new(
                    factory.id,
                    RecipeIngredient::new(target.asset_type, target.amount - current),
                ));
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Demand fulfillment
// ---------------------------------------------------------------------------

/// Cover the pending demands of `owner_warehouses` from each other, nearest
/// source first. Every demand is discarded afterwards, met or not.
///
/// Transfers are clamped to the free room of the destination. Returns an
/// error if a source hands over fewer assets than it reported available, or
/// the destination rejects a batch that was sized to fit.
pub(crate) fn fulfill_factory_demands<P: Position>(
    warehouses: &mut SlotMap<WarehouseId, Warehouse<P>>,
    owner_warehouses: &[WarehouseId],
    transportation_per_turn: u32,
    report: &mut TurnReport,
) -> Result<(), EconomyError> {
    for &dest_id in owner_warehouses {
        let (dest_position, demands) = {
            let dest = warehouses
                .get_mut(dest_id)
                .ok_or(EconomyError::UnknownWarehouse(dest_id))?;
            (dest.position, dest.take_demands())
        };
        if demands.is_empty() {
            continue;
        }

        let mut sources: Vec<(u32, WarehouseId)> = owner_warehouses
            .iter()
            .filter(|&&id| id != dest_id)
            .filter_map(|&id| {
                warehouses
                    .get(id)
                    .map(|w| (w.position.distance_to(&dest_position), id))
            })
            .collect();
        sources.sort_by_key(|&(distance, _)| distance);

        for demand in demands {
            report.demands.push(demand);
            let asset_type = demand.ingredient.asset_type;
            let mut remaining = demand.ingredient.amount;

            for &(distance, source_id) in &sources {
                let available = warehouses
                    .get(source_id)
                    .map_or(0, |w| w.stock.count_available(asset_type));
                let possible = available.min(remaining);
                if possible == 0 {
                    continue;
                }

                let headroom = warehouses[dest_id]
                    .stock
                    .remaining_capacity()
                    .map_or(possible, |free| (free as u32).min(possible));
                if headroom == 0 {
                    debug!(
                        "[DEMAND] warehouse {dest_id:?} is full, dropping {remaining} x {asset_type:?} for {:?}",
                        demand.factory
                    );
                    break;
                }

                let moved = move_assets(
                    warehouses,
                    source_id,
                    dest_id,
                    asset_type,
                    headroom,
                    distance_in_turns(distance, transportation_per_turn),
                )?;
                report.transfers.push(moved);
                remaining -= headroom;
                if remaining == 0 {
                    break;
                }
            }

            if remaining > 0 {
                debug!(
                    "[DEMAND] {:?} left {remaining} x {asset_type:?} unmet at {dest_id:?}",
                    demand.factory
                );
            }
        }
    }
    Ok(())
}

fn move_assets<P: Position>(
    warehouses: &mut SlotMap<WarehouseId, Warehouse<P>>,
    from: WarehouseId,
    to: WarehouseId,
    asset_type: AssetType,
    amount: u32,
    turns: u32,
) -> Result<Transfer, EconomyError> {
    let destination = warehouses[to].position;
    let mut assets = warehouses[from].stock.take(asset_type, amount);
    if assets.len() != amount as usize {
        return Err(EconomyError::Invariant(format!(
            "warehouse {from:?} reported {amount} x {asset_type:?} available but released {}",
            assets.len()
        )));
    }
    for asset in &mut assets {
        asset.initialize_transport(destination, turns);
    }
    if warehouses[to].stock.add_range(assets) != amount as usize {
        return Err(EconomyError::Invariant(format!(
            "warehouse {to:?} rejected {amount} x {asset_type:?} sized to its free room"
        )));
    }
    trace!("[DEMAND] moved {amount} x {asset_type:?} {from:?} -> {to:?}, {turns} turn(s)");
    Ok(Transfer {
        from,
        to,
        asset_type,
        amount,
        turns,
    })
}

// ---------------------------------------------------------------------------
// Delivery estimation
// ---------------------------------------------------------------------------

/// Delivery estimate for a single ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAvailability {
    pub asset_type: AssetType,
    /// Turns until the full amount could arrive; `None` if current stock can
    /// never cover it.
    pub turns: Option<u32>,
}

/// Delivery estimate for a whole ingredient list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryEstimate {
    /// Slowest ingredient, or `None` if any ingredient is unreachable.
    pub turns: Option<u32>,
    pub details: Vec<IngredientAvailability>,
}

impl DeliveryEstimate {
    /// Turn count with `-1` standing in for "unreachable".
    pub fn turns_or_negative(&self) -> i64 {
        self.turns.map_or(-1, i64::from)
    }
}

/// Estimate how many turns it takes to gather `ingredients` at `target` from
/// `warehouses`, scanning the nearest warehouses first and counting only
/// available assets.
pub fn estimate_delivery_time<'a, P, I>(
    warehouses: I,
    ingredients: &[RecipeIngredient],
    target: &P,
    transportation_per_turn: u32,
) -> DeliveryEstimate
where
    P: Position + 'a,
    I: IntoIterator<Item = &'a Warehouse<P>>,
{
    let mut by_distance: Vec<(u32, &Warehouse<P>)> = warehouses
        .into_iter()
        .map(|w| (w.position.distance_to(target), w))
        .collect();
    by_distance.sort_by_key(|&(distance, _)| distance);

    let details: Vec<IngredientAvailability> = ingredients
        .iter()
        .map(|ingredient| {
            let mut gathered = 0;
            let mut farthest = 0;
            for &(distance, warehouse) in &by_distance {
                if gathered >= ingredient.amount {
                    break;
                }
                let available = warehouse.stock.count_available(ingredient.asset_type);
                if available == 0 {
                    continue;
                }
                gathered += available;
                farthest = distance;
            }
            IngredientAvailability {
                asset_type: ingredient.asset_type,
                turns: (gathered >= ingredient.amount)
                    .then(|| distance_in_turns(farthest, transportation_per_turn)),
            }
        })
        .collect();

    let turns = details
        .iter()
        .try_fold(0, |slowest, d| d.turns.map(|t| slowest.max(t)));

    DeliveryEstimate { turns, details }
}

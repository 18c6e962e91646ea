use crate::demand::Demand;
use crate::id::{OwnerId, WarehouseId};
use crate::position::{CubeCoord, Position};
use crate::stock::Stock;
use serde::{Deserialize, Serialize};

/// A storage building. Holds the stock its factories consume from and produce
/// into, plus the demands those factories raised this turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse<P = CubeCoord> {
    pub id: WarehouseId,
    owner: OwnerId,
    pub position: P,
    pub stock: Stock<P>,
    #[serde(default)]
    demands: Vec<Demand>,
}

impl<P: Position> Warehouse<P> {
    /// An empty warehouse. `stock_limit` 0 means unlimited.
    pub fn new(id: WarehouseId, position: P, owner: OwnerId, stock_limit: u32) -> Self {
        Self {
            id,
            owner,
            position,
            stock: Stock::new(stock_limit),
            demands: Vec::new(),
        }
    }

    /// Current owner.
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Reassign the warehouse. Stocked assets and bound factories keep their
    /// current owner.
    pub fn change_owner(&mut self, owner: OwnerId) {
        self.owner = owner;
    }

    /// Demands raised this turn and not yet handled.
    pub fn demands(&self) -> &[Demand] {
        &self.demands
    }

    /// Queue a demand for this turn's fulfillment.
    pub fn add_demand(&mut self, demand: Demand) {
        self.demands.push(demand);
    }

    /// Remove and return every pending demand.
    pub fn take_demands(&mut self) -> Vec<Demand> {
        std::mem::take(&mut self.demands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{AssetType, FactoryId};
    use crate::recipe::RecipeIngredient;

    fn warehouse() -> Warehouse {
        Warehouse::new(WarehouseId::default(), CubeCoord::ORIGIN, OwnerId(1), 10)
    }

    #[test]
    fn new_warehouse_is_empty() {
        let w = warehouse();
        assert!(w.stock.is_empty());
        assert_eq!(w.stock.stock_limit(), 10);
        assert!(w.demands().is_empty());
    }

    #[test]
    fn take_demands_drains() {
        let mut w = warehouse();
        w.add_demand(Demand::new(
            FactoryId::default(),
            RecipeIngredient::new(AssetType(1), 3),
        ));
        assert_eq!(w.demands().len(), 1);
        let drained = w.take_demands();
        assert_eq!(drained.len(), 1);
        assert!(w.demands().is_empty());
    }

    #[test]
    fn change_owner_only_touches_warehouse() {
        let mut w = warehouse();
        w.change_owner(OwnerId(7));
        assert_eq!(w.owner(), OwnerId(7));
    }
}

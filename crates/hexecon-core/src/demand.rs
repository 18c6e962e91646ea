use crate::id::FactoryId;
use crate::recipe::RecipeIngredient;
use serde::{Deserialize, Serialize};

/// An outstanding shortfall of one asset type for one factory's production.
///
/// Demands live on the warehouse the factory is bound to and only for the
/// duration of a turn: they are raised by production and demand creation and
/// discarded by fulfillment, met or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demand {
    pub factory: FactoryId,
    pub ingredient: RecipeIngredient,
}

impl Demand {
    pub fn new(factory: FactoryId, ingredient: RecipeIngredient) -> Self {
        Self { factory, ingredient }
    }
}

//! Recipes and the recipe catalog.
//!
//! A [`Recipe`] says what a factory type consumes and produces per cycle. The
//! [`RecipeCatalog`] maps every factory type to its recipe. It is built once
//! through [`RecipeCatalogBuilder`] and never mutated afterwards; factories
//! store only their [`FactoryType`] and the engine resolves the recipe from the
//! catalog each turn.

use crate::id::{AssetType, FactoryType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An amount of one asset type, used for recipe entries and demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub asset_type: AssetType,
    pub amount: u32,
}

impl RecipeIngredient {
    /// `amount` units of `asset_type`.
    pub fn new(asset_type: AssetType, amount: u32) -> Self {
        Self { asset_type, amount }
    }
}

/// What a factory consumes and produces per cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub inputs: Vec<RecipeIngredient>,
    pub outputs: Vec<RecipeIngredient>,
    /// Nominal cycle length. Every cycle currently completes within one turn.
    #[serde(default = "default_duration")]
    pub duration: u32,
}

fn default_duration() -> u32 {
    1
}

impl Recipe {
    /// A one-turn recipe.
    pub fn new(inputs: Vec<RecipeIngredient>, outputs: Vec<RecipeIngredient>) -> Self {
        Self {
            inputs,
            outputs,
            duration: default_duration(),
        }
    }

    /// A recipe without inputs makes its factory a generator (mine, lumberjack).
    pub fn is_generator(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Stock slots one cycle's inputs occupy, saturating at `u32::MAX`.
    pub fn total_input_per_cycle(&self) -> u32 {
        self.inputs
            .iter()
            .fold(0u32, |total, i| total.saturating_add(i.amount))
    }
}

/// Errors raised while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("factory type {0:?} registered twice")]
    DuplicateFactoryType(FactoryType),
    #[error("factory type {factory_type:?} has a zero amount for {asset_type:?}")]
    ZeroAmount {
        factory_type: FactoryType,
        asset_type: AssetType,
    },
    #[error("factory type {0:?} produces nothing")]
    NoOutputs(FactoryType),
}

/// Collects recipes and validates them on [`RecipeCatalogBuilder::build`].
#[derive(Debug, Default)]
pub struct RecipeCatalogBuilder {
    recipes: Vec<(FactoryType, Recipe)>,
}

impl RecipeCatalogBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `recipe` for `factory_type`. Checked on build.
    pub fn register(&mut self, factory_type: FactoryType, recipe: Recipe) -> &mut Self {
        self.recipes.push((factory_type, recipe));
        self
    }

    /// Validate every queued recipe and freeze the catalog.
    pub fn build(self) -> Result<RecipeCatalog, CatalogError> {
        let mut recipes = BTreeMap::new();
        for (factory_type, recipe) in self.recipes {
            if recipe.outputs.is_empty() {
                return Err(CatalogError::NoOutputs(factory_type));
            }
            if let Some(zero) = recipe
                .inputs
                .iter()
                .chain(recipe.outputs.iter())
                .find(|i| i.amount == 0)
            {
                return Err(CatalogError::ZeroAmount {
                    factory_type,
                    asset_type: zero.asset_type,
                });
            }
            if recipes.insert(factory_type, recipe).is_some() {
                return Err(CatalogError::DuplicateFactoryType(factory_type));
            }
        }
        Ok(RecipeCatalog { recipes })
    }
}

/// Immutable mapping from factory type to recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCatalog {
    recipes: BTreeMap<FactoryType, Recipe>,
}

impl RecipeCatalog {
    /// Start building a catalog.
    pub fn builder() -> RecipeCatalogBuilder {
        RecipeCatalogBuilder::new()
    }

    /// The recipe for `factory_type`, if registered.
    pub fn get(&self, factory_type: FactoryType) -> Option<&Recipe> {
        self.recipes.get(&factory_type)
    }

    /// True if `factory_type` has a recipe.
    pub fn contains(&self, factory_type: FactoryType) -> bool {
        self.recipes.contains_key(&factory_type)
    }

    /// Number of registered factory types.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// True if no recipes are registered.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipes in ascending factory type order.
    pub fn iter(&self) -> impl Iterator<Item = (FactoryType, &Recipe)> {
        self.recipes.iter().map(|(t, r)| (*t, r))
    }
}

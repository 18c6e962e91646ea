//! Serde data file structs for economy content.
//!
//! These structs define the on-disk format for asset types and factory
//! recipes. They are deserialized from RON, JSON, or TOML data files and then
//! resolved into engine types by the loader.

use serde::Deserialize;

// ===========================================================================
// Assets
// ===========================================================================

/// An asset type definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetData {
    pub name: String,
}

// ===========================================================================
// Recipes
// ===========================================================================

/// A recipe ingredient, in short tuple form or with named fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IngredientData {
    /// Short form: `("wood", 2)`.
    Short(String, u32),
    /// Full form: `(asset: "wood", amount: 2)`.
    Full { asset: String, amount: u32 },
}

impl IngredientData {
    pub fn asset(&self) -> &str {
        match self {
            IngredientData::Short(asset, _) => asset,
            IngredientData::Full { asset, .. } => asset,
        }
    }

    pub fn amount(&self) -> u32 {
        match self {
            IngredientData::Short(_, amount) => *amount,
            IngredientData::Full { amount, .. } => *amount,
        }
    }
}

/// A factory type and the recipe it runs. An empty `inputs` list makes the
/// factory a generator.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeData {
    pub factory: String,
    #[serde(default)]
    pub inputs: Vec<IngredientData>,
    pub outputs: Vec<IngredientData>,
    #[serde(default = "default_duration")]
    pub duration: u32,
}

fn default_duration() -> u32 {
    1
}

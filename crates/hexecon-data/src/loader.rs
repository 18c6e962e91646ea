//! Resolution pipeline: reads data files, resolves names, builds the catalog.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and
//! deserialization helpers, plus [`load_economy_data`] which ties them
//! together for a content directory:
//!
//! | File                       | Required | Contents                      |
//! |----------------------------|----------|-------------------------------|
//! | `assets.{ron,toml,json}`   | yes      | list of [`AssetData`]         |
//! | `recipes.{ron,toml,json}`  | yes      | list of [`RecipeData`]        |
//! | `economy.{ron,toml,json}`  | no       | an [`EconomyConfig`]          |

use crate::schema::{AssetData, IngredientData, RecipeData};
use hexecon_core::config::EconomyConfig;
use hexecon_core::id::{AssetType, FactoryType};
use hexecon_core::recipe::{CatalogError, Recipe, RecipeCatalog, RecipeIngredient};
use log::{debug, info};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A name reference could not be resolved.
    #[error("unresolved {expected_kind} reference '{name}' in {file}")]
    UnresolvedRef {
        file: PathBuf,
        name: String,
        expected_kind: &'static str,
    },

    /// A duplicate name was found.
    #[error("duplicate name '{name}' in {file}")]
    DuplicateName { file: PathBuf, name: String },

    /// The resolved recipes do not form a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name.
///
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// more than one format exists for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, e: impl std::fmt::Display) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    }
}

/// Read a file and deserialize it according to its format.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(path, e)),
    }
}

/// Deserialize a list from a file. TOML has no top-level arrays, so for TOML
/// the list is read from the array at `toml_key`.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    if detect_format(path)? != Format::Toml {
        return deserialize_file(path);
    }

    let content = std::fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&content).map_err(|e| parse_error(path, e))?;
    let array = table
        .get(toml_key)
        .ok_or_else(|| parse_error(path, format!("missing key '{toml_key}' in TOML file")))?
        .clone();
    array
        .try_into()
        .map_err(|e: toml::de::Error| parse_error(path, e))
}

// ===========================================================================
// Name resolution helpers
// ===========================================================================

/// Look up a name in a map, returning an `UnresolvedRef` error if not found.
pub fn resolve_name<'a, V>(
    map: &'a HashMap<String, V>,
    name: &str,
    file: &Path,
    expected_kind: &'static str,
) -> Result<&'a V, DataLoadError> {
    map.get(name).ok_or_else(|| DataLoadError::UnresolvedRef {
        file: file.to_path_buf(),
        name: name.to_string(),
        expected_kind,
    })
}

/// Return a `DuplicateName` error if `name` is already in the map.
pub fn check_duplicate<V>(
    map: &HashMap<String, V>,
    name: &str,
    file: &Path,
) -> Result<(), DataLoadError> {
    if map.contains_key(name) {
        Err(DataLoadError::DuplicateName {
            file: file.to_path_buf(),
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

// ===========================================================================
// Loading pipeline
// ===========================================================================

/// Everything loaded from a content directory.
#[derive(Debug, Clone)]
pub struct EconomyData {
    pub catalog: RecipeCatalog,
    pub config: EconomyConfig,
    /// Asset names to ids, numbered in file order from 0.
    pub asset_types: HashMap<String, AssetType>,
    /// Factory names to ids, numbered in file order from 0.
    pub factory_types: HashMap<String, FactoryType>,
}

impl EconomyData {
    pub fn asset_type(&self, name: &str) -> Option<AssetType> {
        self.asset_types.get(name).copied()
    }

    pub fn factory_type(&self, name: &str) -> Option<FactoryType> {
        self.factory_types.get(name).copied()
    }

    /// Reverse lookup, for display.
    pub fn asset_name(&self, asset_type: AssetType) -> Option<&str> {
        self.asset_types
            .iter()
            .find(|(_, id)| **id == asset_type)
            .map(|(name, _)| name.as_str())
    }
}

/// Load asset types, recipes and the optional engine configuration from
/// `dir`.
pub fn load_economy_data(dir: &Path) -> Result<EconomyData, DataLoadError> {
    let assets_path = require_data_file(dir, "assets")?;
    let assets: Vec<AssetData> = deserialize_list(&assets_path, "assets")?;
    let mut asset_types = HashMap::new();
    for (i, asset) in assets.into_iter().enumerate() {
        check_duplicate(&asset_types, &asset.name, &assets_path)?;
        asset_types.insert(asset.name, AssetType(i as u32));
    }

    let recipes_path = require_data_file(dir, "recipes")?;
    let recipes: Vec<RecipeData> = deserialize_list(&recipes_path, "recipes")?;
    let mut factory_types = HashMap::new();
    let mut builder = RecipeCatalog::builder();
    for (i, data) in recipes.into_iter().enumerate() {
        check_duplicate(&factory_types, &data.factory, &recipes_path)?;
        let factory_type = FactoryType(i as u32);
        let recipe = Recipe {
            inputs: resolve_ingredients(&data.inputs, &asset_types, &recipes_path)?,
            outputs: resolve_ingredients(&data.outputs, &asset_types, &recipes_path)?,
            duration: data.duration,
        };
        builder.register(factory_type, recipe);
        factory_types.insert(data.factory, factory_type);
    }
    let catalog = builder.build()?;

    let config = match find_data_file(dir, "economy")? {
        Some(path) => deserialize_file(&path)?,
        None => {
            debug!("[DATA] no economy file in {}, using defaults", dir.display());
            EconomyConfig::default()
        }
    };

    info!(
        "[DATA] loaded {} asset type(s) and {} recipe(s) from {}",
        asset_types.len(),
        catalog.len(),
        dir.display()
    );
    Ok(EconomyData {
        catalog,
        config,
        asset_types,
        factory_types,
    })
}

fn resolve_ingredients(
    data: &[IngredientData],
    asset_types: &HashMap<String, AssetType>,
    file: &Path,
) -> Result<Vec<RecipeIngredient>, DataLoadError> {
    data.iter()
        .map(|ingredient| {
            let asset_type = *resolve_name(asset_types, ingredient.asset(), file, "asset")?;
            Ok(RecipeIngredient::new(asset_type, ingredient.amount()))
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================

//! Capacity-bounded asset storage.
//!
//! A [`Stock`] belongs to exactly one warehouse. Its operations are atomic:
//! [`Stock::add_range`] inserts a whole batch or nothing, and [`Stock::take`]
//! removes the full requested amount of available assets or nothing.

use crate::asset::Asset;
use crate::id::{AssetId, AssetType};
use crate::position::{CubeCoord, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A multiset of assets with an optional size limit. A limit of 0 means
/// unlimited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock<P = CubeCoord> {
    assets: Vec<Asset<P>>,
    stock_limit: u32,
}

impl<P: Position> Default for Stock<P> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<P: Position> Stock<P> {
    /// An empty stock. `stock_limit` 0 means unlimited.
    pub fn new(stock_limit: u32) -> Self {
        Self {
            assets: Vec::new(),
            stock_limit,
        }
    }

    /// The configured limit, 0 for unlimited.
    pub fn stock_limit(&self) -> u32 {
        self.stock_limit
    }

    /// True if the stock has a size limit.
    pub fn is_limited(&self) -> bool {
        self.stock_limit > 0
    }

    /// Number of assets held, available or not.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// True if the stock holds no assets.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Free slots, or `None` for an unlimited stock.
    pub fn remaining_capacity(&self) -> Option<usize> {
        self.is_limited()
            .then(|| (self.stock_limit as usize).saturating_sub(self.assets.len()))
    }

    /// Check if the stock has room for `count` more assets.
    pub fn has_space_for(&self, count: usize) -> bool {
        self.remaining_capacity().is_none_or(|free| count <= free)
    }

    /// Held assets in insertion order.
    pub fn assets(&self) -> &[Asset<P>] {
        &self.assets
    }

    /// Iterate held assets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Asset<P>> {
        self.assets.iter()
    }

    /// Add a single asset. Returns false if the stock is full.
    #[must_use = "a full stock rejects the asset"]
    pub fn add(&mut self, asset: Asset<P>) -> bool {
        if !self.has_space_for(1) {
            return false;
        }
        self.assets.push(asset);
        true
    }

    /// Add a batch of assets, all or nothing. Returns the number added, which
    /// is either `assets.len()` or 0.
    #[must_use = "a batch that does not fit is dropped entirely"]
    pub fn add_range(&mut self, assets: Vec<Asset<P>>) -> usize {
        if !self.has_space_for(assets.len()) {
            return 0;
        }
        let added = assets.len();
        self.assets.extend(assets);
        added
    }

    /// Take `amount` available assets of `asset_type` in stock order. If fewer
    /// than `amount` qualify, nothing is removed and the result is empty.
    pub fn take(&mut self, asset_type: AssetType, amount: u32) -> Vec<Asset<P>> {
        let amount = amount as usize;
        if amount == 0 || self.count_available(asset_type) < amount as u32 {
            return Vec::new();
        }

        let mut taken = Vec::with_capacity(amount);
        let mut kept = Vec::with_capacity(self.assets.len() - amount);
        for asset in self.assets.drain(..) {
            if taken.len() < amount && asset.asset_type == asset_type && asset.is_available() {
                taken.push(asset);
            } else {
                kept.push(asset);
            }
        }
        self.assets = kept;
        taken
    }

    /// Count assets of a type, available or not.
    pub fn count(&self, asset_type: AssetType) -> u32 {
        self.assets.iter().filter(|a| a.asset_type == asset_type).count() as u32
    }

    /// Count only the assets of a type that can be used right now.
    pub fn count_available(&self, asset_type: AssetType) -> u32 {
        self.assets
            .iter()
            .filter(|a| a.asset_type == asset_type && a.is_available())
            .count() as u32
    }

    /// True if every requested type is present in at least the given amount,
    /// regardless of availability.
    pub fn has(&self, requirements: &BTreeMap<AssetType, u32>) -> bool {
        requirements
            .iter()
            .all(|(&asset_type, &amount)| self.count(asset_type) >= amount)
    }

    /// True if the asset with `id` is in this stock.
    pub fn contains(&self, id: AssetId) -> bool {
        self.assets.iter().any(|a| a.id == id)
    }

    /// Look up a held asset by id.
    pub fn get(&self, id: AssetId) -> Option<&Asset<P>> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Remove the assets with the given ids. Ids not in the stock are ignored.
    pub(crate) fn remove_by_ids(&mut self, ids: &[AssetId]) -> Vec<Asset<P>> {
        let (removed, kept): (Vec<_>, Vec<_>) =
            self.assets.drain(..).partition(|a| ids.contains(&a.id));
        self.assets = kept;
        removed
    }

    /// Drop every held asset.
    pub fn clear(&mut self) {
        self.assets.clear();
    }

    /// Advance the transport countdown of every asset in the stock.
    pub fn process(&mut self) {
        for asset in &mut self.assets {
            asset.process();
        }
    }
}

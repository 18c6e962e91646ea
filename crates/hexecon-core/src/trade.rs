//! Converting a batch of stocked assets into fewer assets of another type.

use crate::asset::Asset;
use crate::id::{AssetId, AssetIdGen, AssetType};
use crate::position::Position;
use crate::stock::Stock;
use log::{debug, error};

/// Why a trade was rejected. A rejected trade leaves the stock untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TradeError {
    #[error("no input assets given")]
    NoInputs,
    #[error("trade factor must be at least 1")]
    InvalidTradeFactor,
    #[error("asset {0:?} listed more than once")]
    DuplicateInput(AssetId),
    #[error("asset {0:?} is not in the stock")]
    MissingAsset(AssetId),
    #[error("asset {0:?} is still in transit")]
    Unavailable(AssetId),
    #[error("{inputs} input(s) at factor {trade_factor} yield nothing")]
    NothingToCreate { inputs: usize, trade_factor: u32 },
    #[error("stock limit {limit} cannot hold the trade result")]
    CapacityExceeded { limit: u32 },
}

/// Replace `inputs` with `inputs.len() / trade_factor` new assets of
/// `output_type`. Leftover units below one full factor are lost.
///
/// New assets are raw materials, usable immediately, and inherit owner and
/// position from the first input. Returns the number of assets created.
pub fn trade_assets_for_other_assets<P: Position>(
    stock: &mut Stock<P>,
    inputs: &[AssetId],
    output_type: AssetType,
    trade_factor: u32,
    asset_ids: &mut AssetIdGen,
) -> Result<u32, TradeError> {
    let Some(&first_id) = inputs.first() else {
        return Err(TradeError::NoInputs);
    };
    if trade_factor == 0 {
        return Err(TradeError::InvalidTradeFactor);
    }
    for (i, id) in inputs.iter().enumerate() {
        if inputs[..i].contains(id) {
            return Err(TradeError::DuplicateInput(*id));
        }
        match stock.get(*id) {
            None => return Err(TradeError::MissingAsset(*id)),
            Some(asset) if !asset.is_available() => return Err(TradeError::Unavailable(*id)),
            Some(_) => {}
        }
    }

    let created = inputs.len() as u32 / trade_factor;
    if created == 0 {
        return Err(TradeError::NothingToCreate {
            inputs: inputs.len(),
            trade_factor,
        });
    }
    let after = stock.len() - inputs.len() + created as usize;
    if stock.is_limited() && after > stock.stock_limit() as usize {
        return Err(TradeError::CapacityExceeded {
            limit: stock.stock_limit(),
        });
    }

    let (owner, position) = match stock.get(first_id) {
        Some(asset) => (asset.owner, asset.position),
        None => return Err(TradeError::MissingAsset(first_id)),
    };
    let removed = stock.remove_by_ids(inputs);

    let mut new_ids = Vec::with_capacity(created as usize);
    for _ in 0..created {
        let asset = Asset::new(asset_ids.next_id(), output_type, owner, position, true);
        let id = asset.id;
        if !stock.add(asset) {
            rollback(stock, &new_ids, removed);
            return Err(TradeError::CapacityExceeded {
                limit: stock.stock_limit(),
            });
        }
        new_ids.push(id);
    }

    debug!(
        "[TRADE] {} asset(s) traded for {created} x {output_type:?} at factor {trade_factor}",
        inputs.len()
    );
    Ok(created)
}

fn rollback<P: Position>(stock: &mut Stock<P>, created: &[AssetId], inputs: Vec<Asset<P>>) {
    stock.remove_by_ids(created);
    let count = inputs.len();
    if stock.add_range(inputs) != count {
        error!("[TRADE] could not restore {count} input asset(s) after a failed trade");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::OwnerId;
    use crate::position::CubeCoord;

    const ORE: AssetType = AssetType(1);
    const COIN: AssetType = AssetType(9);

    fn stocked(limit: u32, available: &[bool]) -> (Stock, Vec<AssetId>, AssetIdGen) {
        let mut stock = Stock::new(limit);
        let mut ids = AssetIdGen::new();
        let mut added = Vec::new();
        for &raw in available {
            let asset = Asset::new(ids.next_id(), ORE, OwnerId(4), CubeCoord::new(1, -1, 0), raw);
            added.push(asset.id);
            assert!(stock.add(asset));
        }
        (stock, added, ids)
    }

    #[test]
    fn five_inputs_at_factor_two_yield_two() {
        let (mut stock, inputs, mut ids) = stocked(0, &[true; 5]);
        let created = trade_assets_for_other_assets(&mut stock, &inputs, COIN, 2, &mut ids).unwrap();

        assert_eq!(created, 2);
        assert_eq!(stock.len(), 2);
        assert_eq!(stock.count(ORE), 0);
        assert_eq!(stock.count_available(COIN), 2);
        let coin = &stock.assets()[0];
        assert_eq!(coin.owner, OwnerId(4));
        assert_eq!(coin.position, CubeCoord::new(1, -1, 0));
    }

    #[test]
    fn partial_selection_keeps_other_assets() {
        let (mut stock, inputs, mut ids) = stocked(0, &[true; 4]);
        trade_assets_for_other_assets(&mut stock, &inputs[..2], COIN, 2, &mut ids).unwrap();
        assert_eq!(stock.count(ORE), 2);
        assert_eq!(stock.count(COIN), 1);
        assert!(stock.contains(inputs[2]));
    }

    #[test]
    fn rejects_empty_and_zero_factor() {
        let (mut stock, inputs, mut ids) = stocked(0, &[true; 2]);
        assert_eq!(
            trade_assets_for_other_assets(&mut stock, &[], COIN, 1, &mut ids),
            Err(TradeError::NoInputs)
        );
        assert_eq!(
            trade_assets_for_other_assets(&mut stock, &inputs, COIN, 0, &mut ids),
            Err(TradeError::InvalidTradeFactor)
        );
        assert_eq!(stock.len(), 2);
    }

    #[test]
    fn rejects_unavailable_input() {
        let (mut stock, inputs, mut ids) = stocked(0, &[true, false]);
        assert_eq!(
            trade_assets_for_other_assets(&mut stock, &inputs, COIN, 1, &mut ids),
            Err(TradeError::Unavailable(inputs[1]))
        );
        assert_eq!(stock.count(ORE), 2);
        assert_eq!(stock.count(COIN), 0);
    }

    #[test]
    fn rejects_missing_and_duplicate_inputs() {
        let (mut stock, inputs, mut ids) = stocked(0, &[true; 2]);
        assert_eq!(
            trade_assets_for_other_assets(&mut stock, &[inputs[0], AssetId(999)], COIN, 1, &mut ids),
            Err(TradeError::MissingAsset(AssetId(999)))
        );
        assert_eq!(
            trade_assets_for_other_assets(&mut stock, &[inputs[0], inputs[0]], COIN, 1, &mut ids),
            Err(TradeError::DuplicateInput(inputs[0]))
        );
        assert_eq!(stock.len(), 2);
    }

    #[test]
    fn rejects_when_nothing_would_be_created() {
        let (mut stock, inputs, mut ids) = stocked(0, &[true; 2]);
        assert_eq!(
            trade_assets_for_other_assets(&mut stock, &inputs, COIN, 3, &mut ids),
            Err(TradeError::NothingToCreate {
                inputs: 2,
                trade_factor: 3
            })
        );
        assert_eq!(stock.count(ORE), 2);
    }

    #[test]
    fn full_stock_trades_one_for_one() {
        let (mut stock, inputs, mut ids) = stocked(3, &[true; 3]);
        let created = trade_assets_for_other_assets(&mut stock, &inputs, COIN, 1, &mut ids).unwrap();
        assert_eq!(created, 3);
        assert_eq!(stock.len(), 3);
        assert_eq!(stock.count(COIN), 3);
    }
}

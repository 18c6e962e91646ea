//! Property-based tests for the economy core.
//!
//! Uses proptest to generate random stocks and random economies, then
//! verifies the structural invariants hold.

use hexecon_core::asset::Asset;
use hexecon_core::economy::EconomyManager;
use hexecon_core::id::*;
use hexecon_core::position::CubeCoord;
use hexecon_core::stock::Stock;
use hexecon_core::test_utils::*;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

/// A stock with the given limit holding assets of two types with random
/// availability. Assets that would overflow the limit are dropped.
fn build_stock(limit: u32, contents: &[(bool, bool)]) -> Stock {
    let mut stock = Stock::new(limit);
    let mut ids = AssetIdGen::new();
    for &(is_wood, available) in contents {
        let asset_type = if is_wood { WOOD } else { PLANK };
        let _ = stock.add(Asset::new(
            ids.next_id(),
            asset_type,
            PLAYER,
            CubeCoord::ORIGIN,
            available,
        ));
    }
    stock
}

/// One building placed by the random layout generator.
#[derive(Debug, Clone)]
struct Site {
    q: i32,
    r: i32,
    owner: u32,
    limit: u32,
    factory: u32,
}

fn arb_site() -> impl Strategy<Value = Site> {
    (-4..=4i32, -4..=4i32, 1..=2u32, 0..=12u32, 1..=5u32).prop_map(|(q, r, owner, limit, factory)| {
        Site {
            q,
            r,
            owner,
            limit,
            factory,
        }
    })
}

/// Build an economy from random sites. Occupied positions get an extra
/// factory on the existing warehouse when the owner matches.
fn build_economy(sites: &[Site]) -> EconomyManager {
    let mut economy = sample_economy();
    for site in sites {
        let position = CubeCoord::new(site.q, site.r, -site.q - site.r);
        let owner = OwnerId(site.owner);
        let warehouse = match economy.warehouse_by_position(&position) {
            Some(existing) => existing.id,
            None => economy.create_warehouse(position, owner, site.limit).unwrap(),
        };
        let _ = economy.create_factory(position, FactoryType(site.factory), owner, warehouse);
    }
    economy
}

// ===========================================================================
// Stock properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A limited stock never holds more than its limit.
    #[test]
    fn stock_never_exceeds_limit(
        limit in 1..10u32,
        contents in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..30),
    ) {
        let stock = build_stock(limit, &contents);
        prop_assert!(stock.len() <= limit as usize);
        prop_assert_eq!(stock.len(), contents.len().min(limit as usize));
    }

    /// add_range adds the whole batch or nothing.
    #[test]
    fn add_range_is_all_or_nothing(
        limit in 0..10u32,
        existing in 0..10usize,
        batch_len in 0..10u32,
    ) {
        let mut stock = build_stock(limit, &vec![(true, true); existing]);
        let before = stock.len();
        let batch = make_assets(&mut AssetIdGen::new(), PLANK, PLAYER, CubeCoord::ORIGIN, batch_len);
        let fits = stock.has_space_for(batch.len());

        let added = stock.add_range(batch);

        if fits {
            prop_assert_eq!(added, batch_len as usize);
            prop_assert_eq!(stock.len(), before + batch_len as usize);
        } else {
            prop_assert_eq!(added, 0);
            prop_assert_eq!(stock.len(), before);
        }
    }

    /// take returns exactly the requested amount of available assets, or
    /// nothing and leaves the stock unchanged.
    #[test]
    fn take_is_atomic(
        contents in proptest::collection::vec((any::<bool>(), any::<bool>()), 0..20),
        amount in 1..8u32,
    ) {
        let mut stock = build_stock(0, &contents);
        let snapshot = stock.clone();
        let available = stock.count_available(WOOD);

        let taken = stock.take(WOOD, amount);

        if available >= amount {
            prop_assert_eq!(taken.len(), amount as usize);
            prop_assert!(taken.iter().all(|a| a.asset_type == WOOD && a.is_available()));
            prop_assert_eq!(stock.len(), snapshot.len() - amount as usize);
            prop_assert_eq!(stock.count_available(WOOD), available - amount);
        } else {
            prop_assert!(taken.is_empty());
            prop_assert_eq!(&stock, &snapshot);
        }
    }

    /// Once available, an asset stays available until it is sent again.
    #[test]
    fn availability_is_monotonic(turns in 0..6u32, steps in 0..12u32) {
        let mut asset: Asset = Asset::new(AssetId(0), WOOD, PLAYER, CubeCoord::ORIGIN, false);
        asset.initialize_transport(CubeCoord::ORIGIN, turns);
        let mut seen_available = asset.is_available();
        for step in 1..=steps {
            asset.process();
            if seen_available {
                prop_assert!(asset.is_available());
            }
            seen_available = asset.is_available();
            prop_assert_eq!(asset.is_available(), step >= turns);
        }
    }
}

// ===========================================================================
// Economy properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    /// Turns never fail, stocks respect their limits and productivity stays
    /// within [0, 1].
    #[test]
    fn random_economies_keep_invariants(
        sites in proptest::collection::vec(arb_site(), 1..12),
        turns in 1..15usize,
    ) {
        let mut economy = build_economy(&sites);
        for _ in 0..turns {
            prop_assert!(economy.process_factories().is_ok());
            for warehouse in economy.warehouses() {
                let stock = &warehouse.stock;
                prop_assert!(!stock.is_limited() || stock.len() <= stock.stock_limit() as usize);
                prop_assert!(warehouse.demands().is_empty());
            }
            for factory in economy.factories() {
                let p = factory.productivity();
                prop_assert!((0.0..=1.0).contains(&p));
            }
        }
    }

    /// Two economies built from the same layout evolve identically.
    #[test]
    fn same_layout_same_hash(
        sites in proptest::collection::vec(arb_site(), 1..10),
        turns in 1..10usize,
    ) {
        let mut a = build_economy(&sites);
        let mut b = build_economy(&sites);
        for _ in 0..turns {
            a.process_factories().unwrap();
            b.process_factories().unwrap();
        }
        prop_assert_eq!(a.state_hash(), b.state_hash());
    }

    /// Serialize round-trip keeps every building, the state hash and the
    /// future.
    #[test]
    fn snapshot_round_trip(
        sites in proptest::collection::vec(arb_site(), 1..10),
        turns in 0..6usize,
    ) {
        let mut economy = build_economy(&sites);
        for _ in 0..turns {
            economy.process_factories().unwrap();
        }
        let data = economy.serialize().unwrap();
        let mut restored: EconomyManager = EconomyManager::deserialize(&data).unwrap();
        prop_assert_eq!(restored.state_hash(), economy.state_hash());
        prop_assert_eq!(
            restored.warehouses().collect::<Vec<_>>(),
            economy.warehouses().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            restored.factories().collect::<Vec<_>>(),
            economy.factories().collect::<Vec<_>>()
        );

        economy.process_factories().unwrap();
        restored.process_factories().unwrap();
        prop_assert_eq!(restored.state_hash(), economy.state_hash());
    }
}

//! Cost curves and purchase reducers.
//!
//! Purchases degrade to silent no-ops when the balance cannot cover the
//! cost; the affordance is simply disabled. An out-of-range factory index is
//! a programming error and panics.
use crate::achievements::{Badge, tier_badge_for_level};
use crate::catalog::FactoryCatalog;
use crate::constants::{
    FACTORY_COST_MULTIPLIER, INITIAL_UPGRADE_COST, UPGRADE_COST_MULTIPLIER, VOLATILITY_GROWTH,
    YIELD_BASE_INCREMENT,
};
use crate::numbers::{floor_f64_to_i64, i64_to_f64};
use crate::state::GameState;

/// Upgrade cost at a given level: `floor(100 * 1.5^level)`.
#[must_use]
pub fn upgrade_cost(level: u32) -> i64 {
    let exponent = i32::try_from(level).unwrap_or(i32::MAX);
    floor_f64_to_i64(i64_to_f64(INITIAL_UPGRADE_COST) * UPGRADE_COST_MULTIPLIER.powi(exponent))
}

/// Cost of the next unit of a factory type after `owned` units:
/// `floor(base_cost * 1.15^owned)`.
#[must_use]
pub fn factory_cost(base_cost: i64, owned: u32) -> i64 {
    let exponent = i32::try_from(owned).unwrap_or(i32::MAX);
    floor_f64_to_i64(i64_to_f64(base_cost) * FACTORY_COST_MULTIPLIER.powi(exponent))
}

/// Passive production per tick across all owned factories.
#[must_use]
pub fn production_per_tick(gs: &GameState, factories: &FactoryCatalog) -> i64 {
    gs.factory_counts
        .iter()
        .zip(&factories.types)
        .map(|(&count, factory)| i64::from(count) * i64::from(factory.production))
        .sum()
}

/// Receipt for a successful upgrade purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeReceipt {
    pub cost: i64,
    pub new_level: u32,
    /// Tier badge earned by crossing a level boundary, if any.
    pub badge: Option<Badge>,
}

/// Buy one upgrade level. Returns `None` (state untouched) when the balance
/// is short.
pub fn buy_upgrade(gs: &mut GameState) -> Option<UpgradeReceipt> {
    let cost = upgrade_cost(gs.upgrade_level);
    if gs.balance < cost {
        return None;
    }
    gs.balance -= cost;
    gs.upgrade_level += 1;
    gs.click_yield += YIELD_BASE_INCREMENT * gs.volatility.sqrt();
    gs.volatility *= VOLATILITY_GROWTH;
    gs.clamp_volatility();

    let mut badge = None;
    if let Some(tier) = tier_badge_for_level(gs.upgrade_level)
        && gs.award(tier)
    {
        badge = Some(tier);
    }
    Some(UpgradeReceipt {
        cost,
        new_level: gs.upgrade_level,
        badge,
    })
}

/// Receipt for a successful factory purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryReceipt {
    pub type_index: usize,
    pub cost: i64,
    /// Units owned after the purchase.
    pub owned: u32,
}

/// Buy one unit of the given factory type. Returns `None` (state untouched)
/// when the balance is short.
///
/// # Panics
///
/// Panics when `type_index` is out of range: callers index a fixed static
/// table, so a bad index is a programming error rather than a user
/// condition.
pub fn buy_factory(
    gs: &mut GameState,
    factories: &FactoryCatalog,
    type_index: usize,
) -> Option<FactoryReceipt> {
    assert!(
        type_index < factories.len(),
        "factory index {type_index} out of range for catalog of {}",
        factories.len()
    );
    let owned = gs.factory_counts[type_index];
    let cost = factory_cost(factories.types[type_index].base_cost, owned);
    if gs.balance < cost {
        return None;
    }
    gs.balance -= cost;
    gs.factory_counts[type_index] = owned + 1;
    Some(FactoryReceipt {
        type_index,
        cost,
        owned: owned + 1,
    })
}

//! Badges and their unlock predicates.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    LORE_MASTER_THRESHOLD, TIER_BADGE_INTERVAL, ULTRA_DEGEN_LEVEL, WHALE_THRESHOLD,
};
use crate::state::GameState;

/// Secret achievement badges. Earned once, never removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    /// A click's net delta went negative.
    LiquidationWizard,
    /// Balance crossed one million.
    WhaleWatching,
    /// Upgrade level reached 10.
    UltraDegen,
    /// More than 50 lore lines logged over the session lifetime.
    LoreMaster,
    /// One badge per upgrade level that is an exact multiple of 5;
    /// the payload is `level / 5`.
    Tier(u32),
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LiquidationWizard => f.write_str("Liquidation Wizard"),
            Self::WhaleWatching => f.write_str("Whale Watching"),
            Self::UltraDegen => f.write_str("Ultra Degen"),
            Self::LoreMaster => f.write_str("Lore Master"),
            Self::Tier(k) => write!(f, "Tier {k} Degen"),
        }
    }
}

/// Tier badge for an upgrade level, when the level sits exactly on a tier
/// boundary.
#[must_use]
pub fn tier_badge_for_level(level: u32) -> Option<Badge> {
    if level > 0 && level.is_multiple_of(TIER_BADGE_INTERVAL) {
        Some(Badge::Tier(level / TIER_BADGE_INTERVAL))
    } else {
        None
    }
}

/// Evaluate the post-click predicates against the already-updated state.
/// Earned badges short-circuit via set semantics; the returned list holds
/// only badges new to this click.
pub fn evaluate_after_click(gs: &mut GameState, click_delta: i64) -> Vec<Badge> {
    let mut earned = Vec::new();
    if click_delta < 0 && gs.award(Badge::LiquidationWizard) {
        earned.push(Badge::LiquidationWizard);
    }
    if gs.balance >= WHALE_THRESHOLD && gs.award(Badge::WhaleWatching) {
        earned.push(Badge::WhaleWatching);
    }
    if gs.upgrade_level >= ULTRA_DEGEN_LEVEL && gs.award(Badge::UltraDegen) {
        earned.push(Badge::UltraDegen);
    }
    if gs.lore_total > LORE_MASTER_THRESHOLD && gs.award(Badge::LoreMaster) {
        earned.push(Badge::LoreMaster);
    }
    if let Some(tier) = tier_badge_for_level(gs.upgrade_level)
        && gs.award(tier)
    {
        earned.push(tier);
    }
    earned
}

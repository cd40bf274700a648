//! Read-only projection of engine output for display layers.
use serde::{Deserialize, Serialize};

use crate::economy::{factory_cost, production_per_tick, upgrade_cost};
use crate::session::Catalogs;
use crate::state::GameState;

/// Per-factory display row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryView {
    pub name: String,
    pub glyph: String,
    pub owned: u32,
    /// Cost of the next unit at the current owned count.
    pub next_cost: i64,
    pub production: u32,
}

/// Flat snapshot of everything the terminal renders. Pure data; building a
/// view never mutates the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalView {
    pub balance: i64,
    pub upgrade_level: u32,
    pub upgrade_cost: i64,
    pub click_yield: f64,
    pub factories: Vec<FactoryView>,
    pub production_per_second: i64,
    pub volatility: f64,
    pub achievement_count: usize,
    /// Most recent flavor text, if any lore has been logged.
    pub current_fortune: Option<String>,
    /// Pending transient banner text.
    pub system_message: Option<String>,
}

impl TerminalView {
    /// Project the display snapshot from state and catalogs.
    #[must_use]
    pub fn project(gs: &GameState, catalogs: &Catalogs) -> Self {
        let factories = catalogs
            .factories
            .types
            .iter()
            .zip(&gs.factory_counts)
            .map(|(factory, &owned)| FactoryView {
                name: factory.name.clone(),
                glyph: factory.glyph.clone(),
                owned,
                next_cost: factory_cost(factory.base_cost, owned),
                production: factory.production,
            })
            .collect();

        Self {
            balance: gs.balance,
            upgrade_level: gs.upgrade_level,
            upgrade_cost: upgrade_cost(gs.upgrade_level),
            click_yield: gs.click_yield,
            factories,
            production_per_second: production_per_tick(gs, &catalogs.factories),
            volatility: gs.volatility,
            achievement_count: gs.achievements.len(),
            current_fortune: gs.latest_lore().map(str::to_string),
            system_message: gs.system_message.as_ref().map(|m| m.text.clone()),
        }
    }
}

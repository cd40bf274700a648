//! Degen Fortune Game Engine
//!
//! Platform-agnostic core game logic for the Degen Fortune incremental
//! clicker. This crate provides all game mechanics without UI or
//! platform-specific dependencies: the embedding layer wires clicks and a
//! 1-second heartbeat into a [`FortuneSession`] and renders the
//! [`TerminalView`] projection.

pub mod achievements;
pub mod catalog;
pub mod constants;
pub mod economy;
pub mod fortune;
pub mod mechanics;
pub mod numbers;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod view;

// Re-export commonly used types
pub use achievements::{Badge, evaluate_after_click, tier_badge_for_level};
pub use catalog::{
    CatalogError, FactoryCatalog, FactoryType, FortuneCatalog, FortuneEvent, SideEffect,
    factory_catalog, fortune_catalog,
};
pub use economy::{
    FactoryReceipt, UpgradeReceipt, buy_factory, buy_upgrade, factory_cost, production_per_tick,
    upgrade_cost,
};
pub use fortune::{FortuneDraw, draw_fortune};
pub use mechanics::{ClickOutcome, TickOutcome, apply_tick, resolve_click};
pub use rng::{CountingRng, RngBundle};
pub use scheduler::{SchedulerCommand, TickScheduler};
pub use session::{Catalogs, FortuneSession, OpResult};
pub use state::{GameState, SystemMessage};
pub use view::{FactoryView, TerminalView};

/// Trait for abstracting catalog loading operations
/// Platform-specific implementations should provide this
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the factory type table.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or fails validation.
    fn load_factories(&self) -> Result<FactoryCatalog, Self::Error>;

    /// Load the fortune event and tip tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or fails validation.
    fn load_fortunes(&self) -> Result<FortuneCatalog, Self::Error>;
}

/// Default catalog source backed by the embedded JSON assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalogs;

impl CatalogSource for EmbeddedCatalogs {
    type Error = CatalogError;

    fn load_factories(&self) -> Result<FactoryCatalog, Self::Error> {
        Ok(factory_catalog().clone())
    }

    fn load_fortunes(&self) -> Result<FortuneCatalog, Self::Error> {
        Ok(fortune_catalog().clone())
    }
}

/// Main engine for constructing game sessions from a catalog source.
pub struct FortuneEngine<S>
where
    S: CatalogSource,
{
    source: S,
}

impl<S> FortuneEngine<S>
where
    S: CatalogSource,
{
    /// Create a new engine over the provided catalog source.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Construct a new session with the specified seed.
    ///
    /// # Errors
    ///
    /// Returns an error if either catalog cannot be loaded.
    pub fn create_session(&self, seed: u64) -> Result<FortuneSession, S::Error> {
        let catalogs = Catalogs {
            factories: self.source.load_factories()?,
            fortunes: self.source.load_fortunes()?,
        };
        Ok(FortuneSession::with_catalogs(seed, catalogs))
    }
}

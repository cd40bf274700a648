//! Centralized balance and tuning constants for Degen Fortune game logic.
//!
//! These values define the deterministic math for the core clicker loop.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Upgrade economy ----------------------------------------------------------
pub(crate) const INITIAL_UPGRADE_COST: i64 = 100;
pub(crate) const UPGRADE_COST_MULTIPLIER: f64 = 1.5;
pub(crate) const INITIAL_CLICK_YIELD: f64 = 1.0;
pub(crate) const YIELD_BASE_INCREMENT: f64 = 1.0;

// Factory economy ----------------------------------------------------------
pub(crate) const FACTORY_COST_MULTIPLIER: f64 = 1.15;
pub(crate) const PRODUCTION_BOOST_FACTOR: i64 = 2;

// Volatility tuning --------------------------------------------------------
pub(crate) const VOLATILITY_MIN: f64 = 1.0;
pub(crate) const VOLATILITY_MAX: f64 = 10.0;
pub(crate) const VOLATILITY_GROWTH: f64 = 1.2;
pub(crate) const VOLATILITY_SURGE_STEP: f64 = 1.0;

// Fortune events -----------------------------------------------------------
pub(crate) const REFUND_RATE: f64 = 0.20;

// Lore log -----------------------------------------------------------------
pub(crate) const LORE_WINDOW: usize = 5;

// Achievements -------------------------------------------------------------
pub(crate) const WHALE_THRESHOLD: i64 = 1_000_000;
pub(crate) const ULTRA_DEGEN_LEVEL: u32 = 10;
pub(crate) const LORE_MASTER_THRESHOLD: u64 = 50;
pub(crate) const TIER_BADGE_INTERVAL: u32 = 5;

// Transient system messages ------------------------------------------------
pub(crate) const MESSAGE_TTL_TICKS: u8 = 5;

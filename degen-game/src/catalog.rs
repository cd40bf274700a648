//! Static game data: factory types plus the fortune event and tip tables.
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

const DEFAULT_FACTORIES_DATA: &str = include_str!("../assets/data/factories.json");
const DEFAULT_FORTUNES_DATA: &str = include_str!("../assets/data/fortunes.json");

const fn default_weight() -> u32 {
    1
}

/// Validation failure in a static catalog. Static data ships with the
/// binary, so any of these indicates a programming error, not a runtime
/// condition.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("factory catalog has no types")]
    NoFactories,
    #[error("factory `{name}`: {field} must be positive")]
    BadFactory { name: String, field: &'static str },
    #[error("fortune catalog has no events")]
    NoEvents,
    #[error("fortune catalog has no tips")]
    NoTips,
    #[error("fortune chance {0} outside [0, 1]")]
    BadChance(f32),
    #[error("fortune event `{text}` needs a finite multiplier or a side effect")]
    BadEvent { text: String },
}

/// A purchasable passive-production building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryType {
    pub name: String,
    /// Cost of the first unit, in whole $DEGEN.
    pub base_cost: i64,
    /// $DEGEN produced per unit per tick.
    pub production: u32,
    /// Display glyph for the embedding layer.
    pub glyph: String,
}

/// The fixed, indexed set of factory types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryCatalog {
    pub types: Vec<FactoryType>,
}

impl FactoryCatalog {
    /// Parse and validate a factory catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json_str: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json_str)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.types.is_empty() {
            return Err(CatalogError::NoFactories);
        }
        for factory in &self.types {
            if factory.base_cost <= 0 {
                return Err(CatalogError::BadFactory {
                    name: factory.name.clone(),
                    field: "base_cost",
                });
            }
            if factory.production == 0 {
                return Err(CatalogError::BadFactory {
                    name: factory.name.clone(),
                    field: "production",
                });
            }
        }
        Ok(())
    }

    /// Load the embedded default catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded asset is malformed; shipping a broken asset is
    /// a programming error.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_FACTORIES_DATA).expect("valid embedded factory catalog")
    }

    /// Number of factory types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Named side effects a fortune event can trigger instead of a yield
/// multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideEffect {
    /// Double the next production tick.
    DoubleProduction,
    /// Grant back a fraction of the current balance.
    Refund,
    /// Push volatility up one step.
    VolatilitySurge,
}

/// One entry in the weighted fortune event table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FortuneEvent {
    pub text: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<SideEffect>,
}

/// Fortune event table, gate chance, and the tip fallback table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FortuneCatalog {
    pub chance_per_click: f32,
    pub events: Vec<FortuneEvent>,
    pub tips: Vec<String>,
}

impl FortuneCatalog {
    /// Parse and validate a fortune catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json_str: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json_str)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if !(0.0..=1.0).contains(&self.chance_per_click) {
            return Err(CatalogError::BadChance(self.chance_per_click));
        }
        if self.events.is_empty() {
            return Err(CatalogError::NoEvents);
        }
        if self.tips.is_empty() {
            return Err(CatalogError::NoTips);
        }
        for event in &self.events {
            let has_multiplier = event.multiplier.is_some_and(f64::is_finite);
            if !has_multiplier && event.effect.is_none() {
                return Err(CatalogError::BadEvent {
                    text: event.text.clone(),
                });
            }
        }
        Ok(())
    }

    /// Load the embedded default catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded asset is malformed; shipping a broken asset is
    /// a programming error.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_FORTUNES_DATA).expect("valid embedded fortune catalog")
    }
}

/// Shared accessor for the embedded factory catalog.
#[must_use]
pub fn factory_catalog() -> &'static FactoryCatalog {
    static CATALOG: OnceLock<FactoryCatalog> = OnceLock::new();
    CATALOG.get_or_init(FactoryCatalog::load_from_static)
}

/// Shared accessor for the embedded fortune catalog.
#[must_use]
pub fn fortune_catalog() -> &'static FortuneCatalog {
    static CATALOG: OnceLock<FortuneCatalog> = OnceLock::new();
    CATALOG.get_or_init(FortuneCatalog::load_from_static)
}

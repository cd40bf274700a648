use std::fmt;

use clap::ValueEnum;
use degen_game::TerminalView;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// One action an automated player can take on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotAction {
    Click,
    BuyUpgrade,
    BuyFactory(usize),
    /// Do nothing and let the heartbeat run.
    Idle,
}

/// Decision returned by a [`PlayerPolicy`].
#[derive(Debug, Clone)]
pub struct PolicyDecision {
    pub action: BotAction,
    pub rationale: Option<String>,
}

impl PolicyDecision {
    #[must_use]
    pub fn new(action: BotAction, rationale: Option<String>) -> Self {
        Self { action, rationale }
    }
}

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Select the next action given the current display projection.
    fn next_action(&mut self, view: &TerminalView) -> PolicyDecision;
}

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameplayStrategy {
    /// Never buy anything, just click.
    ClickOnly,
    /// Buy the cheapest affordable factory before anything else.
    FactoryFirst,
    /// Pour everything into upgrade levels.
    UpgradeRush,
    /// Greedy payback comparison between upgrades and factories.
    Balanced,
    /// Weighted random actions, seeded for replay.
    Chaotic,
}

impl GameplayStrategy {
    pub const ALL: [Self; 5] = [
        Self::ClickOnly,
        Self::FactoryFirst,
        Self::UpgradeRush,
        Self::Balanced,
        Self::Chaotic,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ClickOnly => "Click Only",
            Self::FactoryFirst => "Factory First",
            Self::UpgradeRush => "Upgrade Rush",
            Self::Balanced => "Balanced",
            Self::Chaotic => "Chaotic",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy + Send> {
        match self {
            Self::ClickOnly => Box::new(ClickOnlyPolicy),
            Self::FactoryFirst => Box::new(FactoryFirstPolicy),
            Self::UpgradeRush => Box::new(UpgradeRushPolicy),
            Self::Balanced => Box::new(BalancedPolicy),
            Self::Chaotic => Box::new(ChaoticPolicy::new(seed)),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

struct ClickOnlyPolicy;
struct FactoryFirstPolicy;
struct UpgradeRushPolicy;
struct BalancedPolicy;

struct ChaoticPolicy {
    rng: SmallRng,
}

impl ChaoticPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl PlayerPolicy for ClickOnlyPolicy {
    fn name(&self) -> &'static str {
        "Click Only"
    }

    fn next_action(&mut self, _view: &TerminalView) -> PolicyDecision {
        PolicyDecision::new(BotAction::Click, None)
    }
}

impl PlayerPolicy for FactoryFirstPolicy {
    fn name(&self) -> &'static str {
        "Factory First"
    }

    fn next_action(&mut self, view: &TerminalView) -> PolicyDecision {
        match cheapest_affordable_factory(view) {
            Some((idx, cost)) => PolicyDecision::new(
                BotAction::BuyFactory(idx),
                Some(format!("cheapest factory at {cost}")),
            ),
            None => PolicyDecision::new(BotAction::Click, Some("saving up".to_string())),
        }
    }
}

impl PlayerPolicy for UpgradeRushPolicy {
    fn name(&self) -> &'static str {
        "Upgrade Rush"
    }

    fn next_action(&mut self, view: &TerminalView) -> PolicyDecision {
        if view.balance >= view.upgrade_cost {
            PolicyDecision::new(
                BotAction::BuyUpgrade,
                Some(format!("level {} affordable", view.upgrade_level + 1)),
            )
        } else {
            PolicyDecision::new(BotAction::Click, Some("saving up".to_string()))
        }
    }
}

impl PlayerPolicy for BalancedPolicy {
    fn name(&self) -> &'static str {
        "Balanced"
    }

    fn next_action(&mut self, view: &TerminalView) -> PolicyDecision {
        let factory = cheapest_affordable_factory(view);
        let upgrade_affordable = view.balance >= view.upgrade_cost;

        match (factory, upgrade_affordable) {
            (Some((idx, cost)), true) => {
                let factory_payback = payback_turns(cost, f64::from(view.factories[idx].production));
                let upgrade_payback = payback_turns(view.upgrade_cost, view.click_yield);
                if factory_payback <= upgrade_payback {
                    PolicyDecision::new(
                        BotAction::BuyFactory(idx),
                        Some(format!("payback {factory_payback:.1} turns")),
                    )
                } else {
                    PolicyDecision::new(
                        BotAction::BuyUpgrade,
                        Some(format!("payback {upgrade_payback:.1} turns")),
                    )
                }
            }
            (Some((idx, cost)), false) => PolicyDecision::new(
                BotAction::BuyFactory(idx),
                Some(format!("only factory affordable at {cost}")),
            ),
            (None, true) => PolicyDecision::new(
                BotAction::BuyUpgrade,
                Some("only upgrade affordable".to_string()),
            ),
            (None, false) => PolicyDecision::new(BotAction::Click, None),
        }
    }
}

impl PlayerPolicy for ChaoticPolicy {
    fn name(&self) -> &'static str {
        "Chaotic"
    }

    fn next_action(&mut self, view: &TerminalView) -> PolicyDecision {
        let action = match self.rng.gen_range(0..10_u8) {
            0..=5 => BotAction::Click,
            6 => BotAction::BuyUpgrade,
            7 | 8 => {
                let idx = self.rng.gen_range(0..view.factories.len().max(1));
                BotAction::BuyFactory(idx)
            }
            _ => BotAction::Idle,
        };
        PolicyDecision::new(action, None)
    }
}

fn cheapest_affordable_factory(view: &TerminalView) -> Option<(usize, i64)> {
    view.factories
        .iter()
        .enumerate()
        .filter(|(_, f)| f.next_cost <= view.balance)
        .map(|(idx, f)| (idx, f.next_cost))
        .min_by_key(|&(_, cost)| cost)
}

#[allow(clippy::cast_precision_loss)]
fn payback_turns(cost: i64, gain_per_turn: f64) -> f64 {
    if gain_per_turn <= 0.0 {
        f64::INFINITY
    } else {
        cost as f64 / gain_per_turn
    }
}

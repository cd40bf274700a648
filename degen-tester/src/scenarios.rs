//! Scenario registry: named bot runs with expectations over the summary.
use std::collections::HashSet;

use degen_game::Badge;

use crate::policy::GameplayStrategy;
use crate::simulation::{SimulationConfig, SimulationSummary};

pub type Expectation = fn(&SimulationSummary) -> Result<(), String>;

/// Plan for one scenario: who plays, for how long, and what must hold.
pub struct ScenarioPlan {
    pub strategy: GameplayStrategy,
    pub max_turns: u32,
    /// Run the plan twice per iteration and require identical final state.
    pub verify_replay: bool,
    pub expectations: Vec<Expectation>,
}

impl ScenarioPlan {
    #[must_use]
    pub fn config(&self, seed: u64) -> SimulationConfig {
        SimulationConfig::new(self.strategy, seed).with_max_turns(self.max_turns)
    }
}

pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub plan: ScenarioPlan,
}

pub const SCENARIO_KEYS: [&str; 7] = [
    "smoke",
    "deterministic-gameplay",
    "economy-progression",
    "upgrade-scaling",
    "achievement-hunt",
    "heartbeat-contract",
    "chaos-invariants",
];

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIO_KEYS
        .iter()
        .filter_map(|key| get_scenario(key).map(|s| (s.key, s.description)))
        .collect()
}

#[must_use]
pub fn get_scenario(key: &str) -> Option<TestScenario> {
    match key {
        "smoke" => Some(TestScenario {
            key: "smoke",
            name: "Smoke",
            description: "Short click-only run; engine wiring sanity",
            plan: ScenarioPlan {
                strategy: GameplayStrategy::ClickOnly,
                max_turns: 50,
                verify_replay: false,
                expectations: vec![expect_core_invariants, expect_every_click_logged],
            },
        }),
        "deterministic-gameplay" => Some(TestScenario {
            key: "deterministic-gameplay",
            name: "Deterministic Gameplay",
            description: "Same seed must replay to an identical final state",
            plan: ScenarioPlan {
                strategy: GameplayStrategy::Chaotic,
                max_turns: 300,
                verify_replay: true,
                expectations: vec![expect_core_invariants],
            },
        }),
        "economy-progression" => Some(TestScenario {
            key: "economy-progression",
            name: "Economy Progression",
            description: "Factory-first bot must reach passive income",
            plan: ScenarioPlan {
                strategy: GameplayStrategy::FactoryFirst,
                max_turns: 300,
                verify_replay: false,
                expectations: vec![expect_core_invariants, expect_passive_income],
            },
        }),
        "upgrade-scaling" => Some(TestScenario {
            key: "upgrade-scaling",
            name: "Upgrade Scaling",
            description: "Upgrade-rush bot must grow yield and volatility",
            plan: ScenarioPlan {
                strategy: GameplayStrategy::UpgradeRush,
                max_turns: 400,
                verify_replay: false,
                expectations: vec![expect_core_invariants, expect_upgrade_growth],
            },
        }),
        "achievement-hunt" => Some(TestScenario {
            key: "achievement-hunt",
            name: "Achievement Hunt",
            description: "Long click grind must unlock the lore badge",
            plan: ScenarioPlan {
                strategy: GameplayStrategy::ClickOnly,
                max_turns: 700,
                verify_replay: false,
                expectations: vec![
                    expect_core_invariants,
                    expect_every_click_logged,
                    expect_lore_master,
                ],
            },
        }),
        "heartbeat-contract" => Some(TestScenario {
            key: "heartbeat-contract",
            name: "Heartbeat Contract",
            description: "Scheduler commands must track factories and messages",
            plan: ScenarioPlan {
                strategy: GameplayStrategy::FactoryFirst,
                max_turns: 200,
                verify_replay: false,
                expectations: vec![expect_core_invariants, expect_heartbeat_consistency],
            },
        }),
        "chaos-invariants" => Some(TestScenario {
            key: "chaos-invariants",
            name: "Chaos Invariants",
            description: "Random action soup; invariants must survive",
            plan: ScenarioPlan {
                strategy: GameplayStrategy::Chaotic,
                max_turns: 500,
                verify_replay: false,
                expectations: vec![expect_core_invariants],
            },
        }),
        _ => None,
    }
}

fn expect_core_invariants(summary: &SimulationSummary) -> Result<(), String> {
    let state = &summary.final_state;
    if state.balance < 0 {
        return Err(format!("balance went negative: {}", state.balance));
    }
    if !(1.0..=10.0).contains(&state.volatility) {
        return Err(format!("volatility left [1, 10]: {}", state.volatility));
    }
    if state.lore.len() > 5 {
        return Err(format!("lore window overflowed: {}", state.lore.len()));
    }
    let unique: HashSet<Badge> = state.achievements.iter().copied().collect();
    if unique.len() != state.achievements.len() {
        return Err("duplicate badge in achievements".to_string());
    }
    if summary.final_view.balance != state.balance {
        return Err("view balance diverged from state".to_string());
    }
    Ok(())
}

fn expect_every_click_logged(summary: &SimulationSummary) -> Result<(), String> {
    if summary.final_state.lore_total == u64::from(summary.clicks) {
        Ok(())
    } else {
        Err(format!(
            "lore_total {} != clicks {}",
            summary.final_state.lore_total, summary.clicks
        ))
    }
}

fn expect_passive_income(summary: &SimulationSummary) -> Result<(), String> {
    if !summary.final_state.any_factory() {
        return Err("no factory acquired".to_string());
    }
    if summary.total_produced <= 0 {
        return Err("factories never produced".to_string());
    }
    if summary.heartbeat_starts == 0 {
        return Err("heartbeat never started".to_string());
    }
    Ok(())
}

fn expect_upgrade_growth(summary: &SimulationSummary) -> Result<(), String> {
    let state = &summary.final_state;
    if state.upgrade_level < 2 {
        return Err(format!("only reached level {}", state.upgrade_level));
    }
    if state.click_yield <= 1.0 {
        return Err(format!("yield never grew: {}", state.click_yield));
    }
    Ok(())
}

fn expect_lore_master(summary: &SimulationSummary) -> Result<(), String> {
    if summary.final_state.has_badge(Badge::LoreMaster) {
        Ok(())
    } else {
        Err(format!(
            "lore badge missing after {} clicks",
            summary.clicks
        ))
    }
}

fn expect_heartbeat_consistency(summary: &SimulationSummary) -> Result<(), String> {
    if summary.heartbeat_starts == 0 {
        return Err("no start command observed".to_string());
    }
    if summary.heartbeat_stops > summary.heartbeat_starts {
        return Err(format!(
            "{} stops for {} starts",
            summary.heartbeat_stops, summary.heartbeat_starts
        ));
    }
    Ok(())
}

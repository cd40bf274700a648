//! Progression analysis: per-run records and per-strategy aggregates.
use anyhow::{Result, bail};
use serde::Serialize;

use crate::policy::GameplayStrategy;
use crate::simulation::{SimulationConfig, run_simulation};

/// One bot run, flattened for CSV/JSON reporting.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressionRecord {
    pub strategy: GameplayStrategy,
    pub seed: u64,
    pub turns: u32,
    pub final_balance: i64,
    pub upgrade_level: u32,
    pub factories_owned: u32,
    pub achievements: usize,
    pub events_fired: u32,
    pub clicks: u32,
    pub total_produced: i64,
}

/// Per-strategy rollup across seeds and iterations.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressionAggregate {
    pub strategy: GameplayStrategy,
    pub iterations: usize,
    pub mean_balance: f64,
    pub std_balance: f64,
    pub mean_achievements: f64,
    pub mean_upgrade_level: f64,
    pub mean_factories: f64,
    /// Fraction of clicks that rolled a fortune event.
    pub event_rate: f64,
}

/// Run every strategy over every seed, `iterations` times each, offsetting
/// the seed per iteration so records stay independent but replayable.
pub fn run_progression_analysis(
    strategies: &[GameplayStrategy],
    seeds: &[u64],
    iterations: usize,
    max_turns: u32,
) -> Result<Vec<ProgressionRecord>> {
    if strategies.is_empty() || seeds.is_empty() || iterations == 0 {
        bail!("progression analysis needs at least one strategy, seed, and iteration");
    }

    let mut records = Vec::with_capacity(strategies.len() * seeds.len() * iterations);
    for &strategy in strategies {
        for &seed in seeds {
            for i in 0..iterations {
                let run_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
                let summary =
                    run_simulation(SimulationConfig::new(strategy, run_seed).with_max_turns(max_turns));
                log::debug!(
                    "progression run: strategy={strategy} seed={run_seed} balance={}",
                    summary.final_state.balance
                );
                records.push(ProgressionRecord {
                    strategy,
                    seed: run_seed,
                    turns: summary.turns_run,
                    final_balance: summary.final_state.balance,
                    upgrade_level: summary.final_state.upgrade_level,
                    factories_owned: summary.final_state.factory_counts.iter().sum(),
                    achievements: summary.final_state.achievements.len(),
                    events_fired: summary.events_fired,
                    clicks: summary.clicks,
                    total_produced: summary.total_produced,
                });
            }
        }
    }
    Ok(records)
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate_progression(records: &[ProgressionRecord]) -> Vec<ProgressionAggregate> {
    let mut aggregates = Vec::new();
    for strategy in GameplayStrategy::ALL {
        let runs: Vec<&ProgressionRecord> =
            records.iter().filter(|r| r.strategy == strategy).collect();
        if runs.is_empty() {
            continue;
        }

        let n = runs.len() as f64;
        let balances: Vec<f64> = runs.iter().map(|r| r.final_balance as f64).collect();
        let mean_balance = balances.iter().sum::<f64>() / n;
        let variance = balances
            .iter()
            .map(|b| (b - mean_balance).powi(2))
            .sum::<f64>()
            / n;

        let total_clicks: u64 = runs.iter().map(|r| u64::from(r.clicks)).sum();
        let total_events: u64 = runs.iter().map(|r| u64::from(r.events_fired)).sum();
        let event_rate = if total_clicks == 0 {
            0.0
        } else {
            total_events as f64 / total_clicks as f64
        };

        aggregates.push(ProgressionAggregate {
            strategy,
            iterations: runs.len(),
            mean_balance,
            std_balance: variance.sqrt(),
            mean_achievements: runs.iter().map(|r| r.achievements as f64).sum::<f64>() / n,
            mean_upgrade_level: runs
                .iter()
                .map(|r| f64::from(r.upgrade_level))
                .sum::<f64>()
                / n,
            mean_factories: runs
                .iter()
                .map(|r| f64::from(r.factories_owned))
                .sum::<f64>()
                / n,
            event_rate,
        });
    }
    aggregates
}

/// Sanity targets for the default catalogs. Tuned against the embedded
/// 25% event chance; a drifting catalog shows up here before players see it.
pub fn validate_progression_targets(aggregates: &[ProgressionAggregate]) -> Result<()> {
    for aggregate in aggregates {
        if aggregate.mean_balance < 0.0 {
            bail!(
                "strategy {} finished with negative mean balance {:.1}",
                aggregate.strategy,
                aggregate.mean_balance
            );
        }
        if aggregate.iterations >= 20 && !(0.10..=0.40).contains(&aggregate.event_rate) {
            bail!(
                "strategy {} event rate {:.3} outside [0.10, 0.40]",
                aggregate.strategy,
                aggregate.event_rate
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_produces_one_record_per_run() {
        let records = run_progression_analysis(
            &[GameplayStrategy::ClickOnly, GameplayStrategy::Balanced],
            &[1337, 42],
            2,
            100,
        )
        .unwrap();
        assert_eq!(records.len(), 8);
    }

    #[test]
    fn analysis_rejects_empty_inputs() {
        assert!(run_progression_analysis(&[], &[1], 1, 10).is_err());
        assert!(run_progression_analysis(&[GameplayStrategy::ClickOnly], &[1], 0, 10).is_err());
    }

    #[test]
    fn aggregates_group_by_strategy() {
        let records = run_progression_analysis(
            &[GameplayStrategy::ClickOnly, GameplayStrategy::FactoryFirst],
            &[7],
            3,
            150,
        )
        .unwrap();
        let aggregates = aggregate_progression(&records);
        assert_eq!(aggregates.len(), 2);
        for aggregate in &aggregates {
            assert_eq!(aggregate.iterations, 3);
            assert!(aggregate.mean_balance >= 0.0);
        }
    }

    #[test]
    fn event_rate_stays_near_the_catalog_chance() {
        let records = run_progression_analysis(
            &[GameplayStrategy::ClickOnly],
            &[1, 2, 3, 4],
            5,
            400,
        )
        .unwrap();
        let aggregates = aggregate_progression(&records);
        validate_progression_targets(&aggregates).unwrap();
        assert!((aggregates[0].event_rate - 0.25).abs() < 0.05);
    }
}

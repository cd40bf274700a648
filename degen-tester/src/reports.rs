use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use crate::metrics::{ProgressionAggregate, ProgressionRecord};
use crate::tester::ScenarioResult;

#[allow(clippy::cast_precision_loss)]
pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    aggregates: &[ProgressionAggregate],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Logic Test Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(out, "Total scenarios: {total_tests}")?;
    writeln!(out, "Passed: {}", passed_tests.to_string().green())?;
    writeln!(out, "Failed: {}", failed_tests.to_string().red())?;
    let success_rate = (passed_tests as f64 / total_tests as f64) * 100.0;
    writeln!(out, "Success rate: {success_rate:.1}%")?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(out, "{} {}", status, result.scenario_name.bold())?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    if !aggregates.is_empty() {
        writeln!(out, "{}", "📈 Progression Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "======================".yellow())?;
        for aggregate in aggregates {
            writeln!(
                out,
                "{} ({} runs): balance {:.0}±{:.0}, level {:.1}, factories {:.1}, badges {:.1}, event rate {:.1}%",
                aggregate.strategy.label().bold(),
                aggregate.iterations,
                aggregate.mean_balance,
                aggregate.std_balance,
                aggregate.mean_upgrade_level,
                aggregate.mean_factories,
                aggregate.mean_achievements,
                aggregate.event_rate * 100.0
            )?;
        }
        writeln!(out)?;
    }

    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Degen Fortune Logic Test Results\n")?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total_tests}")?;
    writeln!(out, "- **Passed**: {passed_tests}")?;
    writeln!(out, "- **Failed**: {failed_tests}")?;
    let success_rate = (passed_tests as f64 / total_tests as f64) * 100.0;
    writeln!(out, "- **Success rate**: {success_rate:.1}%\n")?;

    writeln!(out, "## Detailed Results\n")?;

    for result in results {
        let status = if result.passed { "✅" } else { "❌" };

        writeln!(out, "### {} {}\n", status, result.scenario_name)?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }

    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, records: &[ProgressionRecord]) -> Result<()> {
    writeln!(
        out,
        "strategy,seed,turns,final_balance,upgrade_level,factories_owned,achievements,events_fired,clicks,total_produced"
    )?;
    for record in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{}",
            record.strategy.label(),
            record.seed,
            record.turns,
            record.final_balance,
            record.upgrade_level,
            record.factories_owned,
            record.achievements,
            record.events_fired,
            record.clicks,
            record.total_produced
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::GameplayStrategy;

    fn sample_result(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: "Smoke".to_string(),
            passed,
            iterations_run: 3,
            successful_iterations: if passed { 3 } else { 2 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["boom".to_string()]
            },
            average_duration: Duration::from_millis(10),
            performance_data: vec![Duration::from_millis(10)],
        }
    }

    fn sample_record() -> ProgressionRecord {
        ProgressionRecord {
            strategy: GameplayStrategy::Balanced,
            seed: 42,
            turns: 500,
            final_balance: 1_234,
            upgrade_level: 4,
            factories_owned: 6,
            achievements: 2,
            events_fired: 120,
            clicks: 460,
            total_produced: 900,
        }
    }

    #[test]
    fn console_report_includes_progression_summary() {
        let aggregate = ProgressionAggregate {
            strategy: GameplayStrategy::Balanced,
            iterations: 3,
            mean_balance: 1000.0,
            std_balance: 50.0,
            mean_achievements: 2.0,
            mean_upgrade_level: 4.0,
            mean_factories: 6.0,
            event_rate: 0.25,
        };
        let mut buf = Vec::new();
        generate_console_report(
            &mut buf,
            &[sample_result(true)],
            &[aggregate],
            Duration::from_secs(1),
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Progression Summary"));
        assert!(text.contains("Balanced"));
    }

    #[test]
    fn console_report_lists_failures() {
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &[sample_result(false)], &[], Duration::ZERO).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("boom"));
    }

    #[test]
    fn json_report_is_parseable() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &[sample_result(true)]).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0]["scenario_name"], "Smoke");
    }

    #[test]
    fn markdown_report_has_summary_section() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &[sample_result(true)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# Degen Fortune Logic Test Results"));
        assert!(text.contains("**Passed**: 1"));
    }

    #[test]
    fn csv_report_has_header_and_rows() {
        let mut buf = Vec::new();
        generate_csv_report(&mut buf, &[sample_record()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("strategy,seed,turns"));
        assert!(text.contains("Balanced,42,500,1234"));
    }
}

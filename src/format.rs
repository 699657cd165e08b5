//! Output formatting for resolved configurations.

use crate::config::{ExecutionPlan, GlobalConfiguration};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// JSON document printed by `show --format json`.
#[derive(Debug, Serialize)]
pub struct ShowOutput<'a> {
    pub config: &'a GlobalConfiguration,
    pub plan: &'a ExecutionPlan,
}

/// Render the configuration and its plan as pretty JSON.
pub fn format_json(config: &GlobalConfiguration, plan: &ExecutionPlan) -> serde_json::Result<String> {
    let value: Value = serde_json::to_value(ShowOutput { config, plan })?;
    serde_json::to_string_pretty(&value)
}

/// Render the configuration and its plan as markdown.
pub fn format_markdown(config: &GlobalConfiguration, plan: &ExecutionPlan) -> String {
    let mut md = String::new();

    let title = if config.scenario_name.is_empty() {
        "(unnamed scenario)"
    } else {
        config.scenario_name.as_str()
    };
    md.push_str(&format!("# Scenario: {}\n", title));
    md.push_str(&format!("- **benchmarks**: {}\n", config.benchmark_count()));
    md.push_str(&format!("- **isolation**: {}\n", config.isolation()));
    md.push_str(&format!("- **cuda_device**: {}\n", config.cuda_device));
    md.push_str(&format!(
        "- **base_result_directory**: `{}`\n",
        config.base_result_directory
    ));
    md.push_str(&format!(
        "- **max_iterations**: {}\n",
        format_count(config.iteration_cap())
    ));
    md.push_str(&format!("- **max_time**: {}\n", format_seconds(config.time_cap())));
    if config.pins_cpus() {
        md.push_str("- **pin_cpus**: on (per-benchmark cpu_core ignored)\n");
    }

    md.push_str("\n| # | filename | log | label | iterations | time | release | cpu | priority |\n");
    md.push_str("|---|---|---|---|---|---|---|---|---|\n");
    for b in &plan.benchmarks {
        md.push_str(&format!(
            "| {} | `{}` | `{}` | {} | {} | {} | {} | {} | {} |\n",
            b.index,
            escape_cell(&b.filename),
            escape_cell(&b.log_name),
            escape_cell(&b.label),
            format_count(b.max_iterations),
            format_seconds(b.max_time),
            b.release_delay
                .map(|d| format!("{}s", d.as_secs_f64()))
                .unwrap_or_else(|| "-".to_string()),
            b.cpu_core
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string()),
            b.stream_priority
                .map(|p| p.to_string())
                .unwrap_or_else(|| "default".to_string()),
        ));
    }

    md
}

/// Escape `|` so a value cannot split a table cell.
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

fn format_count(cap: Option<u64>) -> String {
    cap.map(|n| n.to_string())
        .unwrap_or_else(|| "unlimited".to_string())
}

fn format_seconds(cap: Option<Duration>) -> String {
    cap.map(|d| format!("{}s", d.as_secs_f64()))
        .unwrap_or_else(|| "unlimited".to_string())
}

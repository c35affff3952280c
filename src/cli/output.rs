//! CLI output formatting

use crate::core::{ExecutionStatus, Pipeline, PipelineData, PipelineState};
use console::Emoji;
use std::collections::BTreeMap;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");

/// Format an execution status for display
pub fn format_status(status: ExecutionStatus) -> String {
    match status {
        ExecutionStatus::Pending => style("PENDING").dim().to_string(),
        ExecutionStatus::Running => style("RUNNING").yellow().to_string(),
        ExecutionStatus::Completed => style("COMPLETED").green().to_string(),
        ExecutionStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// One-line summary of a finished run
pub fn format_run_summary(state: &PipelineState) -> String {
    let icon = match state.status {
        ExecutionStatus::Completed => CHECK,
        ExecutionStatus::Failed => CROSS,
        _ => INFO,
    };

    format!(
        "{} {} - {} ({}/{}, {:.0}%) - {}",
        icon,
        style(&state.execution_id.to_string()[..8]).dim(),
        format_status(state.status),
        state.completed_stages,
        state.total_stages,
        state.progress() * 100.0,
        style(format!("{:.3}s", state.elapsed_secs().unwrap_or_default())).cyan()
    )
}

/// Summary of an assembled but not executed pipeline
pub fn format_pipeline(pipeline: &Pipeline) -> String {
    let mut lines = vec![format!(
        "{} {} with {} stages",
        CHECK,
        style(pipeline.to_string()).bold(),
        style(pipeline.len()).cyan()
    )];

    for (index, (stage, options)) in pipeline.stages().zip(pipeline.stage_options()).enumerate() {
        let options = options
            .iter()
            .map(|(key, value)| format!("{}={}", key, format_value(value)))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "  {}. {} {}",
            index + 1,
            style(stage.name()).cyan(),
            style(format!("({})", options)).dim()
        ));
    }

    lines.join("\n")
}

/// Registered stages, one `group.stage` per line
pub fn format_stage_listing(listing: &BTreeMap<String, Vec<String>>) -> String {
    listing
        .iter()
        .flat_map(|(group, stages)| {
            stages
                .iter()
                .map(move |stage| format!("  {}.{}", style(group).dim(), style(stage).bold()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A data item as printed by `PrintProcessor`
pub fn format_pipeline_data(item: &PipelineData) -> String {
    let schema = item
        .schema
        .as_ref()
        .map(|s| format!(" [{}]", s))
        .unwrap_or_default();
    let body = serde_json::to_string_pretty(&item.data).unwrap_or_else(|_| item.data.to_string());

    format!("{}{}:\n{}", style(&item.name).bold(), style(schema).dim(), body)
}

fn format_value(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| format!("{:?}", other)),
    }
}

//! Report generation for reward results
//!
//! Renders a [`RewardReport`] as pretty JSON, per-candidate JSON Lines,
//! Markdown or a terminal table.

mod markdown;
mod summary;

pub use markdown::MarkdownReporter;
pub use summary::{FunctionScores, RewardReport};

use anyhow::Result;
use serde_json::{Map, Value, json};

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// The whole report as one JSON document
    Json,
    /// One JSON object per candidate, ready to join back onto the batch
    Jsonl,
    Markdown,
    Table,
}

impl ReportFormat {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "jsonl" => Some(ReportFormat::Jsonl),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            "table" => Some(ReportFormat::Table),
            _ => None,
        }
    }
}

/// Generate a report in the specified format
pub fn generate_report(report: &RewardReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Jsonl => generate_jsonl(report),
        ReportFormat::Markdown => Ok(MarkdownReporter::generate(report)),
        ReportFormat::Table => Ok(generate_table(report)),
    }
}

/// One line per candidate: its index, each function's reward and the total
fn generate_jsonl(report: &RewardReport) -> Result<String> {
    let mut output = String::new();

    for (index, total) in report.totals.iter().enumerate() {
        let rewards: Map<String, Value> = report
            .functions
            .iter()
            .filter_map(|f| f.rewards.get(index).map(|r| (f.name.clone(), json!(r))))
            .collect();
        let row = json!({
            "index": index,
            "rewards": rewards,
            "total": total
        });
        output.push_str(&serde_json::to_string(&row)?);
        output.push('\n');
    }

    Ok(output)
}

/// Generate a simple table report for terminal output
fn generate_table(report: &RewardReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:=<60}\n", "= Reward Results "));
    output.push_str(&format!(
        "Candidates: {} | Mean total: {:.4}\n",
        report.candidates, report.mean_total
    ));
    output.push_str(&format!("{:-<60}\n", ""));
    output.push_str(&format!(
        "{:<24} {:>10} {:>10} {:>10}\n",
        "Function", "Mean", "Hits", "Rate"
    ));
    output.push_str(&format!("{:-<60}\n", ""));

    for function in &report.functions {
        output.push_str(&format!(
            "{:<24} {:>10.4} {:>10} {:>9.1}%\n",
            function.name,
            function.mean,
            function.hits,
            function.hit_rate() * 100.0
        ));
    }

    output.push_str(&format!("{:=<60}\n", ""));
    output
}

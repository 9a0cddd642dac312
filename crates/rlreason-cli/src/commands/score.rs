//! Batch scoring command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rlreason_rewards::{
    ReportFormat, RewardReport, create_reward_functions, generate_report, load_batch,
    load_config,
};

/// Score a batch file with every configured reward function
pub fn run(config: &Path, input: &Path, format: &str, output: Option<PathBuf>) -> Result<()> {
    let reward_config = load_config(config)?;
    let functions = create_reward_functions(&reward_config)
        .with_context(|| format!("Invalid reward config: {:?}", config))?;
    let batch = load_batch(input)?;

    tracing::info!(
        functions = functions.len(),
        candidates = batch.len(),
        "scoring batch"
    );

    let report = RewardReport::compute(&functions, &batch)?;

    let report_format = ReportFormat::parse(format).unwrap_or(ReportFormat::Table);
    let rendered = generate_report(&report, report_format)?;

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write report: {:?}", path))?;
            println!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

//! CLI argument definitions using clap
//!
//! - rlreason list                                   # Registered reward functions
//! - rlreason score --config rewards.yaml --input batch.jsonl
//! - rlreason check countdown "<answer>1+2+3</answer>" --answer 6 --nums 1,2,3

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default reward configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "rewards.yaml";

#[derive(Parser, Debug)]
#[command(name = "rlreason")]
#[command(about = "Score completions with rule-based reward functions")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (per-candidate rejection reasons)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered reward functions
    List,

    /// Score a JSON Lines batch with every configured reward function
    Score {
        /// Reward configuration (YAML or JSON)
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Batch file, one JSON record per line
        #[arg(long)]
        input: PathBuf,

        /// Report format: table, json, jsonl or markdown
        #[arg(long, default_value = "table")]
        format: String,

        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Score a single completion with one reward function
    Check {
        /// Reward function name
        name: String,

        /// Completion text, or "-" to read stdin
        text: String,

        /// Reward paid on success
        #[arg(long)]
        scale: Option<f64>,

        /// Prepend <think> before matching (soft_format)
        #[arg(long)]
        add_think: Option<bool>,

        /// Target value (countdown)
        #[arg(long, allow_hyphen_values = true)]
        answer: Option<f64>,

        /// Required numbers, comma separated (countdown)
        #[arg(long, value_delimiter = ',')]
        nums: Option<Vec<i64>>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score() {
        let cli = Cli::try_parse_from([
            "rlreason", "score", "--input", "batch.jsonl", "--format", "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Score {
                config,
                input,
                format,
                output,
            } => {
                assert_eq!(config, PathBuf::from(DEFAULT_CONFIG_FILE));
                assert_eq!(input, PathBuf::from("batch.jsonl"));
                assert_eq!(format, "json");
                assert!(output.is_none());
            }
            other => panic!("Expected score command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "rlreason",
            "-v",
            "check",
            "countdown",
            "<answer>1+2+3</answer>",
            "--answer",
            "6",
            "--nums",
            "1,2,3",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Check {
                name, answer, nums, ..
            } => {
                assert_eq!(name, "countdown");
                assert_eq!(answer, Some(6.0));
                assert_eq!(nums, Some(vec![1, 2, 3]));
            }
            other => panic!("Expected check command, got {:?}", other),
        }
    }

    #[test]
    fn test_score_requires_input() {
        assert!(Cli::try_parse_from(["rlreason", "score"]).is_err());
    }
}

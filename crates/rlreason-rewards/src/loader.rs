//! Configuration and batch loading
//!
//! Reward configurations come from YAML or JSON files (chosen by extension);
//! batches come from JSON Lines files with one candidate per line.

use std::path::Path;

use anyhow::{Context, Result};

use crate::batch::{RewardBatch, RewardRecord};
use crate::config::RewardConfig;

/// Load a reward configuration from a file path
pub fn load_config(path: impl AsRef<Path>) -> Result<RewardConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read reward config: {:?}", path))?;

    let config = if is_yaml(path) {
        load_config_from_yaml(&content)
            .with_context(|| format!("Failed to parse YAML reward config: {:?}", path))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON reward config: {:?}", path))?
    };

    tracing::debug!(path = ?path, entries = config.len(), "loaded reward config");
    Ok(config)
}

/// Load a reward configuration from a YAML string
pub fn load_config_from_yaml(yaml: &str) -> Result<RewardConfig> {
    let config: RewardConfig = serde_yaml::from_str(yaml)?;
    Ok(config)
}

/// Load a batch from a JSON Lines file
pub fn load_batch(path: impl AsRef<Path>) -> Result<RewardBatch> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file: {:?}", path))?;

    let batch = load_batch_from_jsonl(&content)
        .with_context(|| format!("Failed to load batch: {:?}", path))?;

    tracing::debug!(path = ?path, candidates = batch.len(), "loaded batch");
    Ok(batch)
}

/// Load a batch from JSON Lines content
///
/// Blank lines are skipped. A line that does not parse fails the whole
/// load, since dropping it would misalign rewards with candidates.
pub fn load_batch_from_jsonl(content: &str) -> Result<RewardBatch> {
    let mut records = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: RewardRecord = serde_json::from_str(line)
            .with_context(|| format!("Invalid record on line {}", index + 1))?;
        records.push(record);
    }

    Ok(RewardBatch::from_records(records)?)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RewardOptions;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_from_yaml() {
        let yaml = r#"
strict_format:
  scale: 1.0
soft_format:
  add_think: false
"#;

        let config = load_config_from_yaml(yaml).unwrap();
        assert_eq!(config.names(), vec!["strict_format", "soft_format"]);
        assert_eq!(
            config.get("strict_format"),
            Some(&RewardOptions::new().with_scale(1.0))
        );
    }

    #[test]
    fn test_load_config_by_extension() {
        let temp_dir = TempDir::new().unwrap();

        let yaml_path = temp_dir.path().join("rewards.yml");
        std::fs::write(&yaml_path, "countdown:\n  scale: 2.0\n").unwrap();
        let config = load_config(&yaml_path).unwrap();
        assert_eq!(config.get("countdown").unwrap().scale, Some(2.0));

        let json_path = temp_dir.path().join("rewards.json");
        std::fs::write(&json_path, r#"{"soft_format": {"scale": 0.1}}"#).unwrap();
        let config = load_config(&json_path).unwrap();
        assert_eq!(config.get("soft_format").unwrap().scale, Some(0.1));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/rewards.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read reward config"));
    }

    #[test]
    fn test_load_batch_from_jsonl() {
        let content = r#"
{"completion": "<answer>1+2+3</answer>", "answer": 6, "nums": [1, 2, 3]}

{"completion": [{"role": "assistant", "content": "<answer>4*2</answer>"}], "answer": "8", "nums": [4, 2]}
"#;

        let batch = load_batch_from_jsonl(content).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.completions[1].text().unwrap(), "<answer>4*2</answer>");
        assert_eq!(batch.nums, Some(vec![vec![1, 2, 3], vec![4, 2]]));
    }

    #[test]
    fn test_load_batch_reports_bad_line() {
        let content = "{\"completion\": \"a\"}\n{\"completion\": 5}\n";
        let err = load_batch_from_jsonl(content).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_load_batch_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("batch.jsonl");
        std::fs::write(&path, "{\"completion\": \"x\", \"prompt\": \"p\"}\n").unwrap();

        let batch = load_batch(&path).unwrap();
        assert_eq!(batch.len(), 1);
        assert!(batch.extra.contains_key("prompt"));
    }
}

//! Format rewards
//!
//! Two tiers of structural checks over `<think>`/`<answer>` tagging:
//! - [`StrictFormatReward`]: the exact newline-delimited template, nothing
//!   outside it
//! - [`SoftFormatReward`]: both blocks in order, any spacing, any body
//!
//! The soft tier gives signal early in training, before exact formatting is
//! learned. Bodies are unconstrained in both, so nested or repeated tags
//! inside a body are accepted.

use regex::Regex;
use std::sync::LazyLock;

use crate::batch::RewardBatch;
use crate::error::RewardResult;
use crate::function::RewardFunction;

/// Default reward for a well-formatted completion
pub const DEFAULT_FORMAT_SCALE: f64 = 0.5;

/// Exact template: one newline around every body, nothing outside the tags
static STRICT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A<think>\n.*?\n</think>\n<answer>\n.*?\n</answer>\z").unwrap()
});

/// Both blocks in order, whitespace between them
static SOFT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A<think>.*?</think>\s*<answer>.*?</answer>\z").unwrap()
});

const THINK_OPEN: &str = "<think>";

/// Reward for completions that follow the exact think/answer template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrictFormatReward {
    scale: f64,
}

impl StrictFormatReward {
    /// Registry name
    pub const NAME: &'static str = "strict_format";

    /// Create a strict format reward paying `scale` on a match
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Reward on success
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Score a single completion text
    pub fn reward(&self, text: &str) -> f64 {
        if STRICT_PATTERN.is_match(text) {
            self.scale
        } else {
            0.0
        }
    }
}

impl Default for StrictFormatReward {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT_SCALE)
    }
}

impl RewardFunction for StrictFormatReward {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn score(&self, batch: &RewardBatch) -> RewardResult<Vec<f64>> {
        batch
            .completions
            .iter()
            .map(|c| c.text().map(|text| self.reward(text)))
            .collect()
    }
}

/// Reward for completions that contain both blocks, loosely formatted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftFormatReward {
    scale: f64,
    add_think: bool,
}

impl SoftFormatReward {
    /// Registry name
    pub const NAME: &'static str = "soft_format";

    /// Create a soft format reward paying `scale` on a match
    ///
    /// `<think>` is prepended before matching by default, for generation
    /// prompts that already end with the opening tag.
    pub fn new(scale: f64) -> Self {
        Self {
            scale,
            add_think: true,
        }
    }

    /// Set whether `<think>` is prepended before matching
    pub fn with_add_think(mut self, add_think: bool) -> Self {
        self.add_think = add_think;
        self
    }

    /// Reward on success
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Whether `<think>` is prepended before matching
    pub fn add_think(&self) -> bool {
        self.add_think
    }

    /// Score a single completion text
    pub fn reward(&self, text: &str) -> f64 {
        let matched = if self.add_think {
            SOFT_PATTERN.is_match(&format!("{THINK_OPEN}{text}"))
        } else {
            SOFT_PATTERN.is_match(text)
        };

        if matched { self.scale } else { 0.0 }
    }
}

impl Default for SoftFormatReward {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT_SCALE)
    }
}

impl RewardFunction for SoftFormatReward {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn score(&self, batch: &RewardBatch) -> RewardResult<Vec<f64>> {
        batch
            .completions
            .iter()
            .map(|c| c.text().map(|text| self.reward(text)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{Completion, Turn};
    use crate::error::RewardError;

    #[test]
    fn test_strict_exact_template() {
        let strict = StrictFormatReward::new(1.0);
        assert_eq!(strict.reward("<think>\nx\n</think>\n<answer>\ny\n</answer>"), 1.0);
        assert_eq!(
            strict.reward("<think>\na\nb\n</think>\n<answer>\nc\nd\n</answer>"),
            1.0
        );
    }

    #[test]
    fn test_strict_rejects_deviations() {
        let strict = StrictFormatReward::new(1.0);
        let rejected = [
            "<think>x</think><answer>y</answer>",
            "<think>\nx\n</think>\n\n<answer>\ny\n</answer>",
            "preamble<think>\nx\n</think>\n<answer>\ny\n</answer>",
            "<think>\nx\n</think>\n<answer>\ny\n</answer> trailing",
            "<think>\nx\n</think>\n<answer>\ny\n</answer>\n",
            "<think>\nx\n</think>",
            "<answer>\ny\n</answer>",
            "",
        ];
        for text in rejected {
            assert_eq!(strict.reward(text), 0.0, "accepted: {:?}", text);
        }
    }

    #[test]
    fn test_soft_accepts_inline_blocks() {
        let soft = SoftFormatReward::new(1.0);
        assert_eq!(soft.reward("<think>x</think><answer>y</answer>"), 1.0);
        assert_eq!(soft.reward("x</think>\n\n<answer>y</answer>"), 1.0);
    }

    #[test]
    fn test_soft_without_prefix() {
        let soft = SoftFormatReward::new(1.0).with_add_think(false);
        assert_eq!(soft.reward("x</think><answer>y</answer>"), 0.0);
        assert_eq!(soft.reward("<think>x</think> <answer>y</answer>"), 1.0);
    }

    #[test]
    fn test_soft_rejects_text_between_or_after_blocks() {
        let soft = SoftFormatReward::new(1.0).with_add_think(false);
        assert_eq!(soft.reward("<think>x</think> so <answer>y</answer>"), 0.0);
        assert_eq!(soft.reward("<think>x</think><answer>y</answer> done"), 0.0);
        assert_eq!(soft.reward("<think>x</think>"), 0.0);
    }

    #[test]
    fn test_soft_tolerates_embedded_tags() {
        let soft = SoftFormatReward::new(1.0).with_add_think(false);
        assert_eq!(
            soft.reward("<think>a<think>b</think>c</think><answer>d</answer>"),
            1.0
        );
    }

    #[test]
    fn test_default_scale() {
        assert_eq!(StrictFormatReward::default().scale(), 0.5);
        let soft = SoftFormatReward::default();
        assert_eq!(soft.scale(), 0.5);
        assert!(soft.add_think());
    }

    #[test]
    fn test_score_batch_in_order() {
        let batch = RewardBatch::new(vec![
            Completion::from("<think>\nx\n</think>\n<answer>\ny\n</answer>"),
            Completion::from("nope"),
            Completion::from(vec![Turn::assistant(
                "<think>\nx\n</think>\n<answer>\ny\n</answer>",
            )]),
        ]);

        let rewards = StrictFormatReward::default().score(&batch).unwrap();
        assert_eq!(rewards, vec![0.5, 0.0, 0.5]);
    }

    #[test]
    fn test_score_surfaces_malformed_completion() {
        let batch = RewardBatch::new(vec![Completion::from("ok"), Completion::Turns(vec![])]);
        let result = SoftFormatReward::default().score(&batch);
        assert!(matches!(result, Err(RewardError::MalformedCompletion(_))));
    }
}

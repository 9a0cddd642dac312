//! Countdown reward
//!
//! Scores arithmetic puzzles: the completion must put an equation in an
//! `<answer>` block that uses exactly the given numbers, contains nothing but
//! arithmetic, and evaluates to the target. Any failure scores zero for that
//! candidate alone.

mod expr;

pub use expr::{EvalError, MAX_NESTING, Token, evaluate, tokenize};

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

use crate::batch::RewardBatch;
use crate::error::{RewardError, RewardResult};
use crate::function::RewardFunction;

/// Default reward for a correct equation
pub const DEFAULT_COUNTDOWN_SCALE: f64 = 1.0;

/// Maximum absolute difference between result and target
pub const TOLERANCE: f64 = 1e-5;

/// First answer block, body may span lines
static ANSWER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<answer>(.*?)</answer>").unwrap());

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Digits, operators, parentheses, decimal points and whitespace only
static EQUATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[0-9+\-*/().\s]+\z").unwrap());

/// Why a countdown candidate scored zero
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("completion has no <answer> block")]
    MissingAnswer,

    #[error("number {0} is out of range")]
    NumberOutOfRange(String),

    #[error("numbers used {used:?} do not match required {required:?}")]
    NumberMismatch { used: Vec<i64>, required: Vec<i64> },

    #[error("equation contains non-arithmetic characters")]
    DisallowedSyntax,

    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvalError),

    #[error("result {result} does not match target {target}")]
    WrongResult { result: f64, target: f64 },

    #[error("target is not numeric")]
    InvalidTarget,

    #[error("{0}")]
    Completion(String),
}

/// Reward for correct countdown equations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountdownReward {
    scale: f64,
}

impl CountdownReward {
    /// Registry name
    pub const NAME: &'static str = "countdown";

    /// Create a countdown reward paying `scale` for a correct equation
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Reward on success
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Score a single completion text
    pub fn reward(&self, text: &str, target: f64, nums: &[i64]) -> f64 {
        self.check(text, target, nums).unwrap_or(0.0)
    }

    /// Score a single completion text, reporting why it failed
    pub fn check(&self, text: &str, target: f64, nums: &[i64]) -> Result<f64, Rejection> {
        let equation = extract_equation(text).ok_or(Rejection::MissingAnswer)?;

        let mut used = used_numbers(equation)?;
        let mut required = nums.to_vec();
        used.sort_unstable();
        required.sort_unstable();
        if used != required {
            return Err(Rejection::NumberMismatch { used, required });
        }

        if !EQUATION_PATTERN.is_match(equation) {
            return Err(Rejection::DisallowedSyntax);
        }

        let result = evaluate(equation)?;
        if (result - target).abs() < TOLERANCE {
            Ok(self.scale)
        } else {
            Err(Rejection::WrongResult { result, target })
        }
    }
}

impl Default for CountdownReward {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SCALE)
    }
}

impl RewardFunction for CountdownReward {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn score(&self, batch: &RewardBatch) -> RewardResult<Vec<f64>> {
        let answer = batch
            .answer
            .as_ref()
            .ok_or_else(|| RewardError::missing_field(Self::NAME, "answer"))?;
        let nums = batch
            .nums
            .as_ref()
            .ok_or_else(|| RewardError::missing_field(Self::NAME, "nums"))?;
        batch.validate()?;

        let rewards = batch
            .completions
            .iter()
            .zip(answer)
            .zip(nums)
            .enumerate()
            .map(|(index, ((completion, target), nums))| {
                let outcome = completion
                    .text()
                    .map_err(|e| Rejection::Completion(e.to_string()))
                    .and_then(|text| {
                        let target = target.value().ok_or(Rejection::InvalidTarget)?;
                        self.check(text, target, nums)
                    });

                outcome.unwrap_or_else(|rejection| {
                    debug!(index, %rejection, "countdown candidate rejected");
                    0.0
                })
            })
            .collect();

        Ok(rewards)
    }
}

/// Trimmed body of the first `<answer>` block
fn extract_equation(text: &str) -> Option<&str> {
    ANSWER_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Every maximal digit run, in order of appearance
fn used_numbers(equation: &str) -> Result<Vec<i64>, Rejection> {
    NUMBER_PATTERN
        .find_iter(equation)
        .map(|m| {
            m.as_str()
                .parse::<i64>()
                .map_err(|_| Rejection::NumberOutOfRange(m.as_str().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{Completion, Turn};

    fn answer(equation: &str) -> String {
        format!("<think>\nworking\n</think>\n<answer>{}</answer>", equation)
    }

    #[test]
    fn test_correct_equation() {
        let reward = CountdownReward::new(1.0);
        assert_eq!(reward.reward(&answer("1+2+3"), 6.0, &[1, 2, 3]), 1.0);
        assert_eq!(reward.reward(&answer(" (3 * 2) + 1 \n"), 7.0, &[1, 2, 3]), 1.0);
    }

    #[test]
    fn test_order_independent() {
        let reward = CountdownReward::default();
        assert_eq!(reward.reward(&answer("3+1+2"), 6.0, &[1, 2, 3]), 1.0);
        assert_eq!(reward.reward(&answer("2*3*1"), 6.0, &[3, 1, 2]), 1.0);
        assert_eq!(reward.reward(&answer("(4 - 1) * 3"), 9.0, &[3, 4, 1]), 1.0);
    }

    #[test]
    fn test_missing_answer_block() {
        let reward = CountdownReward::default();
        assert_eq!(
            reward.check("the answer is 1+2+3", 6.0, &[1, 2, 3]),
            Err(Rejection::MissingAnswer)
        );
        assert_eq!(
            reward.check("<answer>1+2+3", 6.0, &[1, 2, 3]),
            Err(Rejection::MissingAnswer)
        );
    }

    #[test]
    fn test_first_answer_block_wins() {
        let reward = CountdownReward::default();
        let text = "<answer>1+2*3</answer> or maybe <answer>1+2+3</answer>";
        assert!(matches!(
            reward.check(text, 6.0, &[1, 2, 3]),
            Err(Rejection::WrongResult { .. })
        ));
    }

    #[test]
    fn test_multiline_answer_block() {
        let reward = CountdownReward::default();
        assert_eq!(reward.reward("<answer>\n1 +\n2 + 3\n</answer>", 6.0, &[1, 2, 3]), 1.0);
    }

    #[test]
    fn test_number_multiset_mismatch() {
        let reward = CountdownReward::default();
        for (equation, target) in [
            ("2+3*4-5", 9.0),
            ("2+3", 5.0),
            ("2+3+4+4", 13.0),
            ("23+4", 27.0),
        ] {
            assert!(
                matches!(
                    reward.check(&answer(equation), target, &[2, 3, 4]),
                    Err(Rejection::NumberMismatch { .. })
                ),
                "accepted {:?}",
                equation
            );
        }
    }

    #[test]
    fn test_repeated_numbers_respect_multiplicity() {
        let reward = CountdownReward::default();
        assert_eq!(reward.reward(&answer("3*3"), 9.0, &[3, 3]), 1.0);
        assert_eq!(reward.reward(&answer("3*3*3"), 27.0, &[3, 3]), 0.0);
    }

    #[test]
    fn test_rejects_names() {
        let reward = CountdownReward::default();
        assert_eq!(
            reward.check(&answer("abs(1-2)+3"), 4.0, &[1, 2, 3]),
            Err(Rejection::DisallowedSyntax)
        );
        assert_eq!(
            reward.check(&answer("1+2+3 == 6"), 1.0, &[1, 2, 3, 6]),
            Err(Rejection::DisallowedSyntax)
        );
    }

    #[test]
    fn test_division_by_zero_scores_zero() {
        let reward = CountdownReward::default();
        assert_eq!(
            reward.check(&answer("2/0"), 0.0, &[2, 0]),
            Err(Rejection::Evaluation(EvalError::DivisionByZero))
        );
    }

    #[test]
    fn test_tolerance() {
        let reward = CountdownReward::default();
        assert_eq!(reward.reward(&answer("1/3"), 0.333333, &[1, 3]), 1.0);
        assert_eq!(reward.reward(&answer("1/3"), 0.3333, &[1, 3]), 0.0);
        assert_eq!(reward.reward(&answer("1+2+3"), 7.0, &[1, 2, 3]), 0.0);
    }

    #[test]
    fn test_huge_number_is_rejected() {
        let reward = CountdownReward::default();
        assert!(matches!(
            reward.check(&answer("99999999999999999999+1"), 1.0, &[1]),
            Err(Rejection::NumberOutOfRange(_))
        ));
    }

    #[test]
    fn test_score_batch_isolated_failures() {
        let batch = RewardBatch::new(vec![
            Completion::from(answer("1+2+3")),
            Completion::from(answer("2/0")),
            Completion::from("no answer here"),
            Completion::from(vec![Turn::assistant(answer("4*2"))]),
            Completion::Turns(vec![]),
        ])
        .with_answer([6i64, 0, 6, 8, 1])
        .with_nums(vec![vec![1, 2, 3], vec![2, 0], vec![1, 2, 3], vec![2, 4], vec![1]]);

        let rewards = CountdownReward::new(2.0).score(&batch).unwrap();
        assert_eq!(rewards, vec![2.0, 0.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_score_string_targets() {
        let batch = RewardBatch::new([answer("1+2+3"), answer("1+2+3")])
            .with_answer([
                crate::batch::Target::Text("6".to_string()),
                crate::batch::Target::Text("six".to_string()),
            ])
            .with_nums(vec![vec![1, 2, 3], vec![1, 2, 3]]);

        let rewards = CountdownReward::default().score(&batch).unwrap();
        assert_eq!(rewards, vec![1.0, 0.0]);
    }

    #[test]
    fn test_score_requires_columns() {
        let batch = RewardBatch::new([answer("1+2")]).with_answer([3i64]);
        assert_eq!(
            CountdownReward::default().score(&batch),
            Err(RewardError::missing_field("countdown", "nums"))
        );

        let batch = RewardBatch::new([answer("1+2")])
            .with_answer([3i64])
            .with_nums(vec![vec![1, 2], vec![1, 2]]);
        assert!(matches!(
            CountdownReward::default().score(&batch),
            Err(RewardError::LengthMismatch { field: "nums", .. })
        ));
    }
}

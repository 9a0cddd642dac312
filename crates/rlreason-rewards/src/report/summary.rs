//! Reward aggregation over a batch
//!
//! Runs several reward functions over one batch and collects per-function
//! columns and per-candidate totals.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::batch::RewardBatch;
use crate::error::{RewardError, RewardResult};
use crate::function::RewardFunction;

/// Rewards assigned by one function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionScores {
    /// Reward function name
    pub name: String,
    /// One reward per candidate, in input order
    pub rewards: Vec<f64>,
    /// Mean reward over the batch
    pub mean: f64,
    /// Candidates that earned a non-zero reward
    pub hits: usize,
}

impl FunctionScores {
    /// Summarize one reward column
    pub fn new(name: impl Into<String>, rewards: Vec<f64>) -> Self {
        let hits = rewards.iter().filter(|r| **r > 0.0).count();
        let mean = mean(&rewards);
        Self {
            name: name.into(),
            rewards,
            mean,
            hits,
        }
    }

    /// Fraction of candidates with a non-zero reward
    pub fn hit_rate(&self) -> f64 {
        if self.rewards.is_empty() {
            0.0
        } else {
            self.hits as f64 / self.rewards.len() as f64
        }
    }
}

/// Rewards of a whole batch across every configured function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardReport {
    /// Number of candidates scored
    pub candidates: usize,
    /// One entry per reward function, in configuration order
    pub functions: Vec<FunctionScores>,
    /// Summed reward per candidate
    pub totals: Vec<f64>,
    /// Mean of the totals
    pub mean_total: f64,
}

impl RewardReport {
    /// Score a batch with every function
    ///
    /// A function that does not return exactly one reward per candidate
    /// fails the whole report with [`RewardError::LengthMismatch`].
    pub fn compute(
        functions: &[Arc<dyn RewardFunction>],
        batch: &RewardBatch,
    ) -> RewardResult<Self> {
        batch.validate()?;

        let mut scores = Vec::with_capacity(functions.len());
        let mut totals = vec![0.0; batch.len()];

        for function in functions {
            let rewards = function.score(batch)?;
            if rewards.len() != batch.len() {
                return Err(RewardError::LengthMismatch {
                    field: function.name(),
                    expected: batch.len(),
                    actual: rewards.len(),
                });
            }
            for (total, reward) in totals.iter_mut().zip(&rewards) {
                *total += reward;
            }
            tracing::debug!(
                function = function.name(),
                candidates = rewards.len(),
                "scored batch"
            );
            scores.push(FunctionScores::new(function.name(), rewards));
        }

        Ok(Self {
            candidates: batch.len(),
            mean_total: mean(&totals),
            functions: scores,
            totals,
        })
    }

    /// Scores of one function by name
    pub fn function(&self, name: &str) -> Option<&FunctionScores> {
        self.functions.iter().find(|f| f.name == name)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

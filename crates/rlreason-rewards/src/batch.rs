//! Reward batches
//!
//! A batch is columnar: `completions` plus optional per-candidate columns,
//! all aligned by index. Columns a reward function does not recognize end up
//! in `extra` and are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::completion::Completion;
use crate::error::{RewardError, RewardResult};

/// Target value of an arithmetic task
///
/// Datasets store targets either as numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Number(f64),
    Text(String),
}

impl Target {
    /// Numeric value of the target, if it has one
    pub fn value(&self) -> Option<f64> {
        match self {
            Target::Number(n) => Some(*n),
            Target::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for Target {
    fn from(n: f64) -> Self {
        Target::Number(n)
    }
}

impl From<i64> for Target {
    fn from(n: i64) -> Self {
        Target::Number(n as f64)
    }
}

/// A batch of candidates and their per-candidate data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBatch {
    /// Candidates to score
    pub completions: Vec<Completion>,

    /// Target value per candidate (countdown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Vec<Target>>,

    /// Required numbers per candidate (countdown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nums: Option<Vec<Vec<i64>>>,

    /// Unrecognized columns, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RewardBatch {
    /// Create a batch from completions alone
    pub fn new<I, C>(completions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Completion>,
    {
        Self {
            completions: completions.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Set the target column
    pub fn with_answer<I, T>(mut self, answer: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Target>,
    {
        self.answer = Some(answer.into_iter().map(Into::into).collect());
        self
    }

    /// Set the required-numbers column
    pub fn with_nums(mut self, nums: Vec<Vec<i64>>) -> Self {
        self.nums = Some(nums);
        self
    }

    /// Add an extra column
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.completions.len()
    }

    /// Whether the batch has no candidates
    pub fn is_empty(&self) -> bool {
        self.completions.is_empty()
    }

    /// Check that every present column is aligned with the completions
    pub fn validate(&self) -> RewardResult<()> {
        let expected = self.len();
        if let Some(answer) = &self.answer {
            check_len("answer", expected, answer.len())?;
        }
        if let Some(nums) = &self.nums {
            check_len("nums", expected, nums.len())?;
        }
        Ok(())
    }

    /// Assemble a batch from row-oriented records
    ///
    /// A column is present only if every record carries it; a column present
    /// on some records but not others cannot be aligned and is rejected.
    pub fn from_records(records: Vec<RewardRecord>) -> RewardResult<Self> {
        let total = records.len();
        let answers = records.iter().filter(|r| r.answer.is_some()).count();
        let nums_count = records.iter().filter(|r| r.nums.is_some()).count();
        if answers != 0 {
            check_len("answer", total, answers)?;
        }
        if nums_count != 0 {
            check_len("nums", total, nums_count)?;
        }

        let mut extra_keys: Vec<String> = Vec::new();
        for record in &records {
            for key in record.extra.keys() {
                if !extra_keys.contains(key) {
                    extra_keys.push(key.clone());
                }
            }
        }

        let mut batch = RewardBatch::default();
        let mut answer = Vec::with_capacity(answers);
        let mut nums = Vec::with_capacity(nums_count);
        let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(total); extra_keys.len()];

        for mut record in records {
            batch.completions.push(record.completion);
            if let Some(a) = record.answer {
                answer.push(a);
            }
            if let Some(n) = record.nums {
                nums.push(n);
            }
            for (key, column) in extra_keys.iter().zip(columns.iter_mut()) {
                column.push(record.extra.remove(key).unwrap_or(Value::Null));
            }
        }

        if answers != 0 {
            batch.answer = Some(answer);
        }
        if nums_count != 0 {
            batch.nums = Some(nums);
        }
        for (key, column) in extra_keys.into_iter().zip(columns) {
            batch.extra.insert(key, Value::Array(column));
        }

        Ok(batch)
    }
}

/// One row of a batch, as stored in a JSON Lines file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardRecord {
    /// The candidate
    pub completion: Completion,

    /// Target value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Target>,

    /// Required numbers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nums: Option<Vec<i64>>,

    /// Any other fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn check_len(field: &'static str, expected: usize, actual: usize) -> RewardResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(RewardError::LengthMismatch {
            field,
            expected,
            actual,
        })
    }
}

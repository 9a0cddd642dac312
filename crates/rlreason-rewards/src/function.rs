//! The reward function contract

use std::fmt;

use crate::batch::RewardBatch;
use crate::error::RewardResult;

/// A configured reward function
///
/// Implementations are immutable after construction, so one instance may be
/// shared across threads and invoked on disjoint batches concurrently.
pub trait RewardFunction: Send + Sync + fmt::Debug {
    /// Registry name of this reward function
    fn name(&self) -> &'static str;

    /// Score every candidate in the batch
    ///
    /// Returns exactly one reward per completion, in input order.
    fn score(&self, batch: &RewardBatch) -> RewardResult<Vec<f64>>;
}

//! Rule-based reward functions for reasoning RL
//!
//! This crate scores generated completions for an external training or
//! evaluation loop. Every reward function takes a batch of candidates and
//! returns one reward per candidate, in order.
//!
//! # Reward functions
//!
//! - **`strict_format`**: exact `<think>`/`<answer>` template
//! - **`soft_format`**: both blocks in order, loosely formatted
//! - **`countdown`**: the `<answer>` block holds an equation that uses the
//!   given numbers exactly and evaluates to the target
//!
//! # Example
//!
//! ```rust,ignore
//! use rlreason_rewards::{RewardBatch, RewardConfig, RewardOptions, create_reward_functions};
//!
//! let config = RewardConfig::new()
//!     .with("strict_format", RewardOptions::new().with_scale(1.0))
//!     .with("countdown", RewardOptions::new());
//! let functions = create_reward_functions(&config)?;
//!
//! let batch = RewardBatch::new(["<answer>1+2+3</answer>"])
//!     .with_answer([6i64])
//!     .with_nums(vec![vec![1, 2, 3]]);
//! for function in &functions {
//!     println!("{}: {:?}", function.name(), function.score(&batch)?);
//! }
//! ```

pub mod batch;
pub mod completion;
pub mod config;
pub mod countdown;
pub mod error;
pub mod format;
pub mod function;
pub mod loader;
pub mod registry;
pub mod report;

// Re-exports for convenience
pub use batch::{RewardBatch, RewardRecord, Target};
pub use completion::{Completion, Turn};
pub use config::{RewardConfig, RewardOptions};
pub use countdown::{CountdownReward, EvalError, Rejection, evaluate};
pub use error::{RewardError, RewardResult};
pub use format::{SoftFormatReward, StrictFormatReward};
pub use function::RewardFunction;
pub use loader::{load_batch, load_config};
pub use registry::{RewardConstructor, RewardRegistry, create_reward_functions};
pub use report::{ReportFormat, RewardReport, generate_report};

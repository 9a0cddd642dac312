//! Single-completion check command

use std::io::Read;

use anyhow::{Context, Result};
use rlreason_rewards::{RewardBatch, RewardOptions, RewardRegistry};

/// Arguments of the check command
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    pub name: String,
    pub text: String,
    pub scale: Option<f64>,
    pub add_think: Option<bool>,
    pub answer: Option<f64>,
    pub nums: Option<Vec<i64>>,
}

/// Score one completion and print its reward
pub fn run(args: CheckArgs) -> Result<()> {
    let reward = score(args)?;
    println!("{}", reward);
    Ok(())
}

/// Score one completion with one reward function
pub fn score(args: CheckArgs) -> Result<f64> {
    let text = if args.text == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read completion from stdin")?;
        buf
    } else {
        args.text
    };

    let options = RewardOptions {
        scale: args.scale,
        add_think: args.add_think,
    };
    let function = RewardRegistry::builtin().create(&args.name, &options)?;

    let mut batch = RewardBatch::new([text]);
    if let Some(answer) = args.answer {
        batch = batch.with_answer([answer]);
    }
    if let Some(nums) = args.nums {
        batch = batch.with_nums(vec![nums]);
    }

    let rewards = function.score(&batch)?;
    rewards
        .first()
        .copied()
        .context("Reward function returned no reward")
}

//! List command implementation

use anyhow::Result;
use rlreason_rewards::RewardRegistry;

/// Print the registered reward function names
pub fn list() -> Result<()> {
    let registry = RewardRegistry::builtin();
    for name in registry.names() {
        println!("{}", name);
    }
    Ok(())
}

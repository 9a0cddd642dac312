//! Reward function registry
//!
//! Maps configuration names to constructors. The built-in set is closed;
//! callers that need more register their own constructors on a registry
//! instance.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::{RewardConfig, RewardOptions};
use crate::countdown::{CountdownReward, DEFAULT_COUNTDOWN_SCALE};
use crate::error::{RewardError, RewardResult};
use crate::format::{DEFAULT_FORMAT_SCALE, SoftFormatReward, StrictFormatReward};
use crate::function::RewardFunction;

/// Builds a reward function from its options
pub type RewardConstructor = fn(&RewardOptions) -> RewardResult<Arc<dyn RewardFunction>>;

/// Registry of reward function constructors keyed by name
#[derive(Debug, Clone)]
pub struct RewardRegistry {
    constructors: HashMap<&'static str, RewardConstructor>,
}

impl RewardRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create a registry with the built-in reward functions
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(StrictFormatReward::NAME, strict_format);
        registry.register(SoftFormatReward::NAME, soft_format);
        registry.register(CountdownReward::NAME, countdown);
        registry
    }

    /// Register a constructor, returning the one it replaced
    pub fn register(
        &mut self,
        name: &'static str,
        constructor: RewardConstructor,
    ) -> Option<RewardConstructor> {
        self.constructors.insert(name, constructor)
    }

    /// Whether a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.constructors.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Build one reward function
    pub fn create(
        &self,
        name: &str,
        options: &RewardOptions,
    ) -> RewardResult<Arc<dyn RewardFunction>> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| RewardError::unknown(name))?;
        let function = constructor(options)?;
        debug!(name, ?options, "created reward function");
        Ok(function)
    }

    /// Build every reward function in the configuration, in order
    ///
    /// Fails on the first unknown name or invalid option set, before any
    /// candidate is scored.
    pub fn create_all(&self, config: &RewardConfig) -> RewardResult<Vec<Arc<dyn RewardFunction>>> {
        config
            .iter()
            .map(|(name, options)| self.create(name, options))
            .collect()
    }
}

impl Default for RewardRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Build the configured reward functions from the built-in registry
pub fn create_reward_functions(
    config: &RewardConfig,
) -> RewardResult<Vec<Arc<dyn RewardFunction>>> {
    RewardRegistry::builtin().create_all(config)
}

fn strict_format(options: &RewardOptions) -> RewardResult<Arc<dyn RewardFunction>> {
    options.reject_add_think(StrictFormatReward::NAME)?;
    let scale = options.scale_or(DEFAULT_FORMAT_SCALE)?;
    Ok(Arc::new(StrictFormatReward::new(scale)))
}

fn soft_format(options: &RewardOptions) -> RewardResult<Arc<dyn RewardFunction>> {
    let scale = options.scale_or(DEFAULT_FORMAT_SCALE)?;
    let add_think = options.add_think.unwrap_or(true);
    Ok(Arc::new(
        SoftFormatReward::new(scale).with_add_think(add_think),
    ))
}

fn countdown(options: &RewardOptions) -> RewardResult<Arc<dyn RewardFunction>> {
    options.reject_add_think(CountdownReward::NAME)?;
    let scale = options.scale_or(DEFAULT_COUNTDOWN_SCALE)?;
    Ok(Arc::new(CountdownReward::new(scale)))
}

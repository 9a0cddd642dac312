//! Reward configuration
//!
//! A configuration is an ordered mapping from reward function name to its
//! options. Order matters: reward functions are built, run and reported in
//! the order they appear in the document.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{RewardError, RewardResult};

/// Construction options for one reward function
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RewardOptions {
    /// Reward paid on success (function default if absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    /// Prepend `<think>` before matching (soft format only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_think: Option<bool>,
}

impl RewardOptions {
    /// Create options with every value left at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the success reward
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Set whether `<think>` is prepended
    pub fn with_add_think(mut self, add_think: bool) -> Self {
        self.add_think = Some(add_think);
        self
    }

    /// Effective success reward, validated
    pub fn scale_or(&self, default: f64) -> RewardResult<f64> {
        let scale = self.scale.unwrap_or(default);
        if !scale.is_finite() || scale < 0.0 {
            return Err(RewardError::config(format!(
                "scale must be a finite non-negative number, got {}",
                scale
            )));
        }
        Ok(scale)
    }

    /// Fail if `add_think` was given to a function that does not take it
    pub fn reject_add_think(&self, function: &str) -> RewardResult<()> {
        match self.add_think {
            Some(_) => Err(RewardError::config(format!(
                "'{}' does not accept option 'add_think'",
                function
            ))),
            None => Ok(()),
        }
    }
}

/// Ordered reward function configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardConfig {
    entries: Vec<(String, RewardOptions)>,
}

impl RewardConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reward function, replacing options of an existing entry
    pub fn with(mut self, name: impl Into<String>, options: RewardOptions) -> Self {
        self.insert(name, options);
        self
    }

    /// Insert or replace an entry, keeping the original position on replace
    pub fn insert(&mut self, name: impl Into<String>, options: RewardOptions) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = options,
            None => self.entries.push((name, options)),
        }
    }

    /// Options for a named entry
    pub fn get(&self, name: &str) -> Option<&RewardOptions> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, options)| options)
    }

    /// Iterate entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RewardOptions)> {
        self.entries.iter().map(|(n, o)| (n.as_str(), o))
    }

    /// Entry names in order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RewardConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, options) in &self.entries {
            map.serialize_entry(name, options)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RewardConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RewardConfigVisitor)
    }
}

struct RewardConfigVisitor;

impl<'de> Visitor<'de> for RewardConfigVisitor {
    type Value = RewardConfig;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of reward function names to options")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut config = RewardConfig::new();
        while let Some(name) = access.next_key::<String>()? {
            // `countdown:` with no body in YAML means all defaults
            let options = access.next_value::<Option<RewardOptions>>()?;
            if config.get(&name).is_some() {
                return Err(de::Error::custom(format!(
                    "duplicate reward function '{}'",
                    name
                )));
            }
            config.insert(name, options.unwrap_or_default());
        }
        Ok(config)
    }
}

use std::collections::BTreeSet;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Capability advertised by Litani versions that support job pools
pub const POOLS_CAPABILITY: &str = "pools";

/// Name of the pool that expensive proof jobs are assigned to
pub const EXPENSIVE_POOL: &str = "expensive";

/// Features reported by the downstream build tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    features: BTreeSet<String>,
}

impl CapabilitySet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from `print-capabilities` output.
    ///
    /// Accepts a JSON array of strings or a JSON object whose keys are the
    /// feature names. Anything else yields `None`.
    pub fn from_json(text: &str) -> Option<Self> {
        let features = match serde_json::from_str::<Value>(text).ok()? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            Value::Object(map) => map.into_iter().map(|(key, _)| key).collect(),
            _ => return None,
        };
        Some(Self { features })
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Whether to limit the parallelism of expensive proof jobs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestrictMode {
    Yes,
    No,
    #[default]
    Auto,
}

impl fmt::Display for RestrictMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestrictMode::Yes => write!(f, "yes"),
            RestrictMode::No => write!(f, "no"),
            RestrictMode::Auto => write!(f, "auto"),
        }
    }
}

/// A named pool declared to the build tool at init time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolDeclaration {
    pub name: String,
    pub size: usize,
}

impl PoolDeclaration {
    pub fn expensive(size: usize) -> Self {
        Self {
            name: EXPENSIVE_POOL.to_string(),
            size,
        }
    }
}

impl fmt::Display for PoolDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.size)
    }
}

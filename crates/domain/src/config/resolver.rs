use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a query is resolved: race the public resolver pool, or walk the
/// delegation hierarchy from the root servers down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveMode {
    Recursive,
    Iterative,
}

impl Default for ResolveMode {
    fn default() -> Self {
        ResolveMode::Recursive
    }
}

impl FromStr for ResolveMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recursive" => Ok(ResolveMode::Recursive),
            "iterative" => Ok(ResolveMode::Iterative),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveMode::Recursive => write!(f, "recursive"),
            ResolveMode::Iterative => write!(f, "iterative"),
        }
    }
}

/// Resolution settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub mode: ResolveMode,

    /// Per-attempt UDP send/receive timeout in milliseconds
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// How long the fan-out caller waits for a winner, independent of the
    /// number of racing attempts
    #[serde(default = "default_fanout_wait_ms")]
    pub fanout_wait_ms: u64,

    /// Hops allowed per root-server attempt before the walk is a dead end
    #[serde(default = "default_max_depth")]
    pub max_depth: u8,

    /// Upper bound on the public resolver pool loaded from file
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            mode: ResolveMode::default(),
            query_timeout_ms: default_query_timeout_ms(),
            fanout_wait_ms: default_fanout_wait_ms(),
            max_depth: default_max_depth(),
            max_candidates: default_max_candidates(),
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    3000
}

fn default_fanout_wait_ms() -> u64 {
    3000
}

fn default_max_depth() -> u8 {
    8
}

fn default_max_candidates() -> usize {
    50
}

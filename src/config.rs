//! Runtime configuration
//!
//! Plain structs with sensible defaults; the CLI maps its flags onto them.

use crate::dimacs::ParsePolicy;
use serde::{Deserialize, Serialize};

/// Graph loading configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Handling of malformed edge lines
    pub policy: ParsePolicy,
}

impl LoadConfig {
    pub fn lenient() -> Self {
        Self {
            policy: ParsePolicy::Lenient,
        }
    }
}

/// Benchmark configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Number of timed repetitions
    pub runs: usize,
    /// Run repetitions on the rayon pool instead of sequentially
    pub parallel: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            runs: 5,
            parallel: false,
        }
    }
}

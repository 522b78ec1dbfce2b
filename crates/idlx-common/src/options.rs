//! Merge configuration.
//!
//! Options are plain data so they can be embedded in a generator's own config
//! file. Missing fields take their defaults:
//!
//! ```json
//! { "strict_unions": true, "max_alias_depth": 16 }
//! ```

use crate::limits;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Abort on operations with more than one union parameter instead of
    /// degrading with a warning.
    pub strict_unions: bool,

    /// Emit `DuplicateProperty` warnings when merged properties share a name.
    pub warn_duplicate_properties: bool,

    /// ALIAS hops followed before a chain is reported as non-terminating.
    ///
    /// Values above `limits::MAX_ALIAS_DEPTH` are clamped to it; the
    /// classifier never follows a longer chain.
    pub max_alias_depth: u32,

    /// Union expansions allowed per operation group.
    pub max_decomposition_steps: u32,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            strict_unions: false,
            warn_duplicate_properties: true,
            max_alias_depth: limits::MAX_ALIAS_DEPTH,
            max_decomposition_steps: limits::MAX_DECOMPOSITION_STEPS,
        }
    }
}

impl MergeOptions {
    /// Parse options from a JSON document.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Alias depth validation enforces, never beyond what the classifier resolves.
    pub fn alias_depth(&self) -> u32 {
        self.max_alias_depth.min(limits::MAX_ALIAS_DEPTH)
    }

    pub fn strict() -> Self {
        Self {
            strict_unions: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;

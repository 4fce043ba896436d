use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RefError, Result};

/// Policy the batch engine enforces on every command it executes.
///
/// The default is fully permissive; [`BatchPolicy::strict`] matches what a
/// server accepting pushes typically enforces.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchPolicy {
    /// Reject commands that create a ref.
    pub deny_creates: bool,
    /// Reject commands that delete a ref.
    pub deny_deletes: bool,
    /// Reject updates whose new commit does not descend from the old one.
    pub deny_non_fast_forwards: bool,
    /// Reject changes to the branch `HEAD` points at.
    pub deny_current_branch: bool,
}

impl BatchPolicy {
    /// A policy that rejects deletes, rewinds and current-branch changes.
    pub fn strict() -> Self {
        Self {
            deny_creates: false,
            deny_deletes: true,
            deny_non_fast_forwards: true,
            deny_current_branch: true,
        }
    }

    /// Parse a policy from TOML. Missing keys take their default.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| RefError::Config(e.to_string()))
    }

    /// Load a policy from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

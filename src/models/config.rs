//! Session configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::IndexPolicy;
use crate::error::{Error, Result};

/// Default search depth requested from the analysis engine
pub const DEFAULT_ANALYSIS_DEPTH: u32 = 20;

/// Number of principal variations to request from the analysis engine
pub const DEFAULT_MULTI_PV: u32 = 3;

/// What `undo` does when the pointer is not on the last ply
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UndoPolicy {
    /// Refuse: `undo` returns `None` and nothing changes
    #[default]
    RequireEnd,
    /// Jump to the last ply first, then undo
    SnapToEnd,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub index_policy: IndexPolicy,
    pub undo_policy: UndoPolicy,
    /// Promote to a queen when a pawn reaches the last rank without a piece given
    pub auto_queen: bool,
    pub analysis_depth: u32,
    pub multipv: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            index_policy: IndexPolicy::Strict,
            undo_policy: UndoPolicy::RequireEnd,
            auto_queen: true,
            analysis_depth: DEFAULT_ANALYSIS_DEPTH,
            multipv: DEFAULT_MULTI_PV,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.analysis_depth == 0 {
            return Err(Error::Config("analysis_depth must be at least 1".to_string()));
        }
        if self.multipv == 0 {
            return Err(Error::Config("multipv must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.index_policy, IndexPolicy::Strict);
        assert_eq!(config.undo_policy, UndoPolicy::RequireEnd);
        assert!(config.auto_queen);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = SessionConfig::from_json(r#"{"index_policy": "clamp", "multipv": 1}"#).unwrap();
        assert_eq!(config.index_policy, IndexPolicy::Clamp);
        assert_eq!(config.multipv, 1);
        assert_eq!(config.analysis_depth, DEFAULT_ANALYSIS_DEPTH);
        assert_eq!(config.undo_policy, UndoPolicy::RequireEnd);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            SessionConfig::from_json(r#"{"multipv": 0}"#),
            Err(Error::Config(_))
        ));
        assert!(SessionConfig::from_json(r#"{"undo_policy": "sometimes"}"#).is_err());
        assert!(SessionConfig::from_json(r#"{"colour": "blue"}"#).is_err());
    }
}

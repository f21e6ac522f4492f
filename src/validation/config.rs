//! Validator configuration

use serde::{Deserialize, Serialize};

/// Default bound on structure nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Settings shared by the type and item validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Deepest nested structure level accepted in a type (root is 0)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Emit lifecycle events through the observability logger
    #[serde(default)]
    pub emit_events: bool,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            emit_events: false,
        }
    }
}

impl ValidatorConfig {
    /// Default settings with event logging switched on.
    pub fn with_events() -> Self {
        Self {
            emit_events: true,
            ..Self::default()
        }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Checks the settings are usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("max_depth must be >= 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ValidatorConfig::default();
        assert_eq!(config.max_depth, 32);
        assert!(!config.emit_events);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ValidatorConfig = serde_json::from_value(json!({ "emit_events": true })).unwrap();
        assert!(config.emit_events);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = ValidatorConfig::default().max_depth(0);
        assert!(config.validate().unwrap_err().contains("max_depth"));
    }
}

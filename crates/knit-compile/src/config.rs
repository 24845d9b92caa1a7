//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, CompileResult};

/// Which reset cleanup passes a [`PassManagerBuilder`](crate::PassManagerBuilder)
/// schedules.
///
/// Missing fields take their default, so `{}` is a valid configuration.
///
/// ```
/// use knit_compile::PassConfig;
///
/// let config = PassConfig::from_json(r#"{ "remove_final_reset": false }"#).unwrap();
/// assert!(config.consolidate_resets);
/// assert!(!config.remove_final_reset);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PassConfig {
    /// Schedule [`ConsolidateResets`](crate::passes::ConsolidateResets).
    pub consolidate_resets: bool,
    /// Schedule [`RemoveFinalReset`](crate::passes::RemoveFinalReset).
    pub remove_final_reset: bool,
    /// Check DAG integrity after every pass.
    pub verify_integrity: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            consolidate_resets: true,
            remove_final_reset: true,
            verify_integrity: false,
        }
    }
}

impl PassConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> CompileResult<Self> {
        serde_json::from_str(json).map_err(|e| CompileError::InvalidConfiguration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(PassConfig::from_json("{}").unwrap(), PassConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = PassConfig::from_json(r#"{ "optimize": true }"#).unwrap_err();
        assert!(matches!(err, CompileError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = PassConfig {
            consolidate_resets: false,
            remove_final_reset: true,
            verify_integrity: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PassConfig::from_json(&json).unwrap(), config);
    }
}

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProverError;

/// Externally-imposed resource ceilings on the search loop (spec.md §5).
/// Loadable from a YAML file, mirroring the teacher's `serde` +
/// `serde_yaml` pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverConfig {
    /// Maximum number of resolution steps before aborting. `None` means
    /// unbounded.
    #[serde(default)]
    pub max_steps: Option<u64>,

    /// Maximum derivation depth (number of ancestor resolution steps
    /// feeding any one clause) before aborting. `None` means unbounded.
    #[serde(default)]
    pub max_depth: Option<u32>,
}

impl Default for ProverConfig {
    fn default() -> ProverConfig {
        ProverConfig {
            max_steps: None,
            max_depth: None,
        }
    }
}

impl ProverConfig {
    pub fn from_yaml_str(text: &str) -> Result<ProverConfig, ProverError> {
        serde_yaml::from_str(text)
            .map_err(|e| ProverError::Malformed(format!("invalid config: {}", e)))
    }

    pub fn from_yaml_file(path: &Path) -> Result<ProverConfig, ProverError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ProverError::Malformed(format!("cannot read config {:?}: {}", path, e)))?;
        ProverConfig::from_yaml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let config = ProverConfig::default();
        assert_eq!(config.max_steps, None);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_parses_yaml() {
        let config = ProverConfig::from_yaml_str("max_steps: 100\nmax_depth: 10\n").unwrap();
        assert_eq!(config.max_steps, Some(100));
        assert_eq!(config.max_depth, Some(10));
    }

    #[test]
    fn test_partial_yaml_defaults_rest() {
        let config = ProverConfig::from_yaml_str("max_steps: 50\n").unwrap();
        assert_eq!(config.max_steps, Some(50));
        assert_eq!(config.max_depth, None);
    }
}

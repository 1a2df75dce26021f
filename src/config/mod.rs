//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Listing configuration shared by every paginated query
///
/// # Example
/// ```yaml
/// max_page_size: 50
/// default_page_size: 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Upper bound for a client-requested page size
    pub max_page_size: usize,

    /// Page size used when the client does not request one
    pub default_page_size: usize,
}

impl QueryConfig {
    pub const DEFAULT_MAX_PAGE_SIZE: usize = 50;
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Default page size, kept within `[1, max_page_size]`
    pub fn default_page_size(&self) -> usize {
        self.default_page_size.clamp(1, self.max_page_size.max(1))
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_page_size: Self::DEFAULT_MAX_PAGE_SIZE,
            default_page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = QueryConfig::default();

        assert_eq!(config.max_page_size, 50);
        assert_eq!(config.default_page_size(), 10);
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let config = QueryConfig::from_yaml_str("max_page_size: 100").unwrap();

        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.default_page_size, 10);
    }

    #[test]
    fn test_default_page_size_is_clamped() {
        let config = QueryConfig {
            max_page_size: 5,
            default_page_size: 10,
        };
        assert_eq!(config.default_page_size(), 5);

        let config = QueryConfig {
            max_page_size: 5,
            default_page_size: 0,
        };
        assert_eq!(config.default_page_size(), 1);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = QueryConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        // Should be able to parse it back
        let parsed = QueryConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_page_size: 30\ndefault_page_size: 15").unwrap();

        let config = QueryConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.max_page_size, 30);
        assert_eq!(config.default_page_size(), 15);
    }

    #[test]
    fn test_from_yaml_file_missing() {
        assert!(QueryConfig::from_yaml_file("/nonexistent/query.yaml").is_err());
    }
}

//! TOML configuration file support.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "https://cs.example.edu"
//!
//! [timeouts]
//! primary_secs = 12
//! backup_secs = 5
//! list_secs = 10
//! bulk_detail_secs = 8
//!
//! [retry]
//! max_manual_retries = 3
//!
//! [pagination]
//! faculty_page_size = 9
//! publication_page_size = 5
//! lecture_page_size = 5
//!
//! [publications]
//! default_year = 2023
//! default_keyword = "Computer Science"
//! ```

use std::path::Path;

use super::Config;

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Configuration file error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_config_file_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cs-department.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "https://cs.example.edu"

[retry]
max_manual_retries = 5

[publications]
default_keyword = "Informatics"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "https://cs.example.edu");
        assert_eq!(config.retry.max_manual_retries, 5);
        assert_eq!(config.publications.default_keyword, "Informatics");
        assert_eq!(config.publications.default_year, 2023);
        assert_eq!(config.timeouts.list_secs, 10);
    }

    #[test]
    fn test_config_file_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cs-department.toml");

        let mut config = Config::default();
        config.api.user_agent = Some("dept-bot/1.0".to_string());
        config.timeouts.primary_secs = 3;

        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_file_nonexistent() {
        let path = PathBuf::from("/nonexistent/cs-department.toml");
        assert!(matches!(Config::load(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_config_file_invalid_toml() {
        let result = Config::from_toml_str("invalid = toml = content");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

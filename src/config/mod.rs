//! Configuration management.

mod file_config;

pub use file_config::ConfigError;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the configuration file looked up by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "cs-department.toml";

/// Prefix for environment variable overrides, e.g. `CS_DEPARTMENT_API__BASE_URL`
pub const ENV_PREFIX: &str = "CS_DEPARTMENT";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Faculty profile API
    #[serde(default)]
    pub api: ApiConfig,

    /// Per-request timeouts
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Manual retry limits for detail fetches
    #[serde(default)]
    pub retry: RetryConfig,

    /// Page sizes for the listing views
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Publication aggregation defaults
    #[serde(default)]
    pub publications: PublicationsConfig,
}

/// Faculty profile API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/api/faculty` routes are served from
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Override for the User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

/// Request timeouts, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Primary detail endpoint
    #[serde(default = "default_primary_secs")]
    pub primary_secs: u64,

    /// Backup detail endpoint
    #[serde(default = "default_backup_secs")]
    pub backup_secs: u64,

    /// Faculty list endpoint
    #[serde(default = "default_list_secs")]
    pub list_secs: u64,

    /// Each detail fetch issued while loading the publications directory
    #[serde(default = "default_bulk_detail_secs")]
    pub bulk_detail_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            primary_secs: default_primary_secs(),
            backup_secs: default_backup_secs(),
            list_secs: default_list_secs(),
            bulk_detail_secs: default_bulk_detail_secs(),
        }
    }
}

impl TimeoutConfig {
    pub fn primary(&self) -> Duration {
        Duration::from_secs(self.primary_secs)
    }

    pub fn backup(&self) -> Duration {
        Duration::from_secs(self.backup_secs)
    }

    pub fn list(&self) -> Duration {
        Duration::from_secs(self.list_secs)
    }

    pub fn bulk_detail(&self) -> Duration {
        Duration::from_secs(self.bulk_detail_secs)
    }
}

fn default_primary_secs() -> u64 {
    12
}

fn default_backup_secs() -> u64 {
    5
}

fn default_list_secs() -> u64 {
    10
}

fn default_bulk_detail_secs() -> u64 {
    8
}

/// Manual retry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// How many times the retry action is offered after a terminal error
    #[serde(default = "default_max_manual_retries")]
    pub max_manual_retries: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_manual_retries: default_max_manual_retries(),
        }
    }
}

fn default_max_manual_retries() -> u32 {
    3
}

/// Page sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_faculty_page_size")]
    pub faculty_page_size: usize,

    #[serde(default = "default_list_page_size")]
    pub publication_page_size: usize,

    #[serde(default = "default_list_page_size")]
    pub lecture_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            faculty_page_size: default_faculty_page_size(),
            publication_page_size: default_list_page_size(),
            lecture_page_size: default_list_page_size(),
        }
    }
}

fn default_faculty_page_size() -> usize {
    9
}

fn default_list_page_size() -> usize {
    5
}

/// Defaults applied while aggregating publications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationsConfig {
    /// Year used when a citation has none
    #[serde(default = "default_year")]
    pub default_year: i32,

    /// Keyword used when the faculty record lists no teaching areas
    #[serde(default = "default_keyword")]
    pub default_keyword: String,
}

impl Default for PublicationsConfig {
    fn default() -> Self {
        Self {
            default_year: default_year(),
            default_keyword: default_keyword(),
        }
    }
}

fn default_year() -> i32 {
    2023
}

fn default_keyword() -> String {
    "Computer Science".to_string()
}

/// Load configuration from a file, with `CS_DEPARTMENT_*` environment overrides
///
/// Nested keys use a double underscore: `CS_DEPARTMENT_TIMEOUTS__PRIMARY_SECS=3`.
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize()
}

/// Locate a configuration file: `./cs-department.toml`, then the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("cs-department").join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

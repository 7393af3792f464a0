//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-copilot.toml` in current directory
//! 4. `~/.config/sql-copilot/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [copilot]
//! api_key = "vn-..."            # or use COPILOT_API_KEY env var
//! base_url = "https://copilot.internal.example"
//! model = "flaunt-v1"
//! llm_api_key = "sk-..."        # forwarded to the service at connect time
//!
//! [warehouse]
//! project_id = "flaunt-v1"
//! dataset = "barefaced2"
//! credentials_path = "bigquery_credentials.json"
//!
//! [cache]
//! handle_ttl_secs = 3600
//! max_entries = 1000
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `COPILOT_API_KEY` | API key for the copilot service |
//! | `COPILOT_BASE_URL` | Service endpoint |
//! | `COPILOT_MODEL` | Trained model (workspace) name |
//! | `LLM_API_KEY` | API key for the underlying LLM provider |
//! | `WAREHOUSE_PROJECT_ID` | BigQuery project to query |
//! | `WAREHOUSE_DATASET` | Dataset whose schema is used for training |
//! | `WAREHOUSE_CREDENTIALS` | Path to the warehouse credentials file |

use std::{env, fs, path::PathBuf};

use serde::Deserialize;

use crate::error::{AppResult, config_error};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub copilot:   CopilotConfig,
    #[serde(default)]
    pub warehouse: WarehouseConfig,
    #[serde(default)]
    pub cache:     CacheConfig
}

/// Copilot service configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CopilotConfig {
    pub api_key:     Option<String>,
    pub base_url:    Option<String>,
    pub model:       Option<String>,
    pub llm_api_key: Option<String>
}

/// Warehouse connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    pub project_id:       Option<String>,
    pub dataset:          Option<String>,
    pub credentials_path: Option<String>
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            project_id:       None,
            dataset:          None,
            credentials_path: Some(String::from("bigquery_credentials.json"))
        }
    }
}

/// Cache sizing and lifetime configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub handle_ttl_secs: u64,
    pub max_entries:     usize
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            handle_ttl_secs: 3600,
            max_entries:     1000
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-copilot.toml)
    /// 3. Config file in home directory (~/.config/sql-copilot/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        // Try to load from home directory config
        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-copilot")
                .join("config.toml");

            if home_config.exists() {
                let content = fs::read_to_string(&home_config)
                    .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
                config = toml::from_str(&content)
                    .map_err(|e| config_error(format!("Invalid config file: {}", e)))?;
            }
        }

        // Try to load from current directory config (overrides home config)
        let local_config = PathBuf::from(".sql-copilot.toml");
        if local_config.exists() {
            let content = fs::read_to_string(&local_config)
                .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
            config = toml::from_str(&content)
                .map_err(|e| config_error(format!("Invalid config file: {}", e)))?;
        }

        // Override with environment variables
        if let Ok(api_key) = env::var("COPILOT_API_KEY") {
            config.copilot.api_key = Some(api_key);
        }

        if let Ok(base_url) = env::var("COPILOT_BASE_URL") {
            config.copilot.base_url = Some(base_url);
        }

        if let Ok(model) = env::var("COPILOT_MODEL") {
            config.copilot.model = Some(model);
        }

        if let Ok(llm_api_key) = env::var("LLM_API_KEY") {
            config.copilot.llm_api_key = Some(llm_api_key);
        }

        if let Ok(project_id) = env::var("WAREHOUSE_PROJECT_ID") {
            config.warehouse.project_id = Some(project_id);
        }

        if let Ok(dataset) = env::var("WAREHOUSE_DATASET") {
            config.warehouse.dataset = Some(dataset);
        }

        if let Ok(path) = env::var("WAREHOUSE_CREDENTIALS") {
            config.warehouse.credentials_path = Some(path);
        }

        Ok(config)
    }
}

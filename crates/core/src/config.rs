//! Console configuration
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! environment overrides:
//!
//! - `SCHEMAPORT_CONFIG`: path of the TOML file (default `schemaport.toml`
//!   in the working directory, skipped when absent)
//! - `SCHEMAPORT_SERVER_URL`: overrides `server.base_url`
//! - `SCHEMAPORT_INITIAL_TAB`: overrides `window.initial_tab`
//!
//! ```toml
//! [server]
//! base_url = "http://127.0.0.1:5000"
//!
//! [notifications]
//! default_duration_ms = 4000
//!
//! [ai]
//! auto_regenerate = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConsoleError, ConsoleResult};
use crate::traits::Validatable;
use crate::types::Tab;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "SCHEMAPORT_CONFIG";

/// Environment variable overriding the server base URL
pub const SERVER_URL_ENV: &str = "SCHEMAPORT_SERVER_URL";

/// Environment variable overriding the initial tab
pub const INITIAL_TAB_ENV: &str = "SCHEMAPORT_INITIAL_TAB";

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "schemaport.toml";

// ============================================================================
// Sections
// ============================================================================

/// Where the migration server lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
        }
    }
}

/// Notification timings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Lifetime of ordinary notifications
    pub default_duration_ms: u64,
    /// Lifetime of the "Processing ..." notice shown when an AI action starts
    pub processing_duration_ms: u64,
    /// Lifetime of AI answers shown as notifications
    pub ai_response_duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 4000,
            processing_duration_ms: 2000,
            ai_response_duration_ms: 8000,
        }
    }
}

impl NotificationConfig {
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    pub fn processing_duration(&self) -> Duration {
        Duration::from_millis(self.processing_duration_ms)
    }

    pub fn ai_response_duration(&self) -> Duration {
        Duration::from_millis(self.ai_response_duration_ms)
    }
}

/// AI augmentation behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Regenerate the DDL right after an AI-updated schema arrives; when
    /// false the schema is only staged for a manual regenerate
    pub auto_regenerate: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            auto_regenerate: true,
        }
    }
}

/// Desktop window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub initial_tab: Tab,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Schemaport - Schema Migration Console".to_string(),
            width: 1280.0,
            height: 860.0,
            initial_tab: Tab::Manual,
        }
    }
}

// ============================================================================
// Console Config
// ============================================================================

/// Complete console configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub server: ServerConfig,
    pub notifications: NotificationConfig,
    pub ai: AiConfig,
    pub window: WindowConfig,
}

impl ConsoleConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> ConsoleResult<Self> {
        let config: ConsoleConfig =
            toml::from_str(text).map_err(|e| ConsoleError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit file
    pub fn from_file(path: &Path) -> ConsoleResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ConsoleError::InvalidConfig(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Load using the standard lookup order and apply environment overrides
    pub fn load() -> ConsoleResult<Self> {
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let mut config = match explicit {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    tracing::info!("Loading configuration from {}", path.display());
                    Self::from_file(path)?
                } else {
                    tracing::debug!("No configuration file found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_overrides(
            std::env::var(SERVER_URL_ENV).ok(),
            std::env::var(INITIAL_TAB_ENV).ok(),
        )?;
        Ok(config)
    }

    /// Apply override values (normally read from the environment)
    pub fn apply_overrides(
        &mut self,
        server_url: Option<String>,
        initial_tab: Option<String>,
    ) -> ConsoleResult<()> {
        if let Some(url) = server_url.filter(|u| !u.trim().is_empty()) {
            self.server.base_url = url.trim().to_string();
        }
        if let Some(tab) = initial_tab {
            self.window.initial_tab = Tab::parse(&tab).ok_or_else(|| {
                ConsoleError::InvalidConfig(format!("unknown initial tab '{}'", tab))
            })?;
        }
        self.validate()
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.server.base_url.trim_end_matches('/')
    }
}

impl Validatable for ConsoleConfig {
    fn validate(&self) -> ConsoleResult<()> {
        let parsed = url::Url::parse(&self.server.base_url).map_err(|e| {
            ConsoleError::InvalidConfig(format!(
                "server.base_url '{}' is not a valid URL: {}",
                self.server.base_url, e
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConsoleError::InvalidConfig(format!(
                "server.base_url must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if self.notifications.default_duration_ms == 0 {
            return Err(ConsoleError::InvalidConfig(
                "notifications.default_duration_ms must be greater than zero".to_string(),
            ));
        }
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConsoleError::InvalidConfig(
                "window size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

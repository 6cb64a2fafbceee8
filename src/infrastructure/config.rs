//! Configuration management

use crate::error::{DaybookError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_BUCKET: &str = "entry-images";
pub const DEFAULT_MAX_IMAGES: usize = 5;
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;
/// One year
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Object storage bucket for entry images
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Base address used to build public image URLs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url_base: Option<String>,
    #[serde(default = "default_max_images")]
    pub max_images_per_entry: usize,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: i64,
    pub editor: String,
    pub created: DateTime<Utc>,
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_max_images() -> usize {
    DEFAULT_MAX_IMAGES
}

fn default_session_ttl() -> i64 {
    DEFAULT_SESSION_TTL_MINUTES
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            bucket: default_bucket(),
            public_url_base: None,
            max_images_per_entry: DEFAULT_MAX_IMAGES,
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            editor: Self::detect_default_editor(),
            created: Utc::now(),
        }
    }

    /// Load config from .daybook/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".daybook").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DaybookError::NotDaybookDirectory(path.to_path_buf())
            } else {
                DaybookError::Io(e)
            }
        })?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| DaybookError::Config(format!("Failed to parse config.toml: {}", e)))?;

        let ttl = config.session_ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES);
        if ttl != config.session_ttl_minutes {
            tracing::warn!(
                configured = config.session_ttl_minutes,
                used = ttl,
                "session_ttl_minutes out of range"
            );
            config.session_ttl_minutes = ttl;
        }
        Ok(config)
    }

    /// Session lifetimes must be between one minute and one year
    pub fn check_session_ttl(minutes: i64) -> Result<i64> {
        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&minutes) {
            return Err(DaybookError::Config(format!(
                "session_ttl_minutes must be between 1 and {}, got {}",
                MAX_SESSION_TTL_MINUTES, minutes
            )));
        }
        Ok(minutes)
    }

    /// Save config to .daybook/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let daybook_dir = path.join(".daybook");
        let config_path = daybook_dir.join("config.toml");

        if !daybook_dir.exists() {
            fs::create_dir(&daybook_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| DaybookError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the editor command, checking environment variables first
    pub fn get_editor(&self) -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| self.editor.clone())
    }

    /// Detect default editor from environment or system
    fn detect_default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(windows) {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }
}

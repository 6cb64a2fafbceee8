//! Config management use case

use crate::error::{DaybookError, Result};
use crate::infrastructure::{Config, Workspace};

pub const CONFIG_KEYS: &str =
    "bucket, public_url_base, max_images_per_entry, session_ttl_minutes, editor, created";

/// Service for managing daybook configuration
pub struct ConfigService {
    workspace: Workspace,
}

impl ConfigService {
    pub fn new(workspace: Workspace) -> Self {
        ConfigService { workspace }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.workspace.load_config()?;

        match key {
            "bucket" => Ok(config.bucket),
            "public_url_base" => Ok(config.public_url_base.unwrap_or_default()),
            "max_images_per_entry" => Ok(config.max_images_per_entry.to_string()),
            "session_ttl_minutes" => Ok(config.session_ttl_minutes.to_string()),
            "editor" => Ok(config.editor),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.workspace.load_config()?;

        match key {
            "bucket" => {
                let bucket = value.trim();
                if bucket.is_empty() || bucket.contains(['/', '\\']) || bucket.starts_with('.') {
                    return Err(DaybookError::Config(format!(
                        "Invalid bucket name: '{}'",
                        value
                    )));
                }
                config.bucket = bucket.to_string();
            }
            "public_url_base" => {
                let base = value.trim();
                config.public_url_base = if base.is_empty() {
                    None
                } else {
                    Some(base.trim_end_matches('/').to_string())
                };
            }
            "max_images_per_entry" => {
                config.max_images_per_entry = parse_number(key, value)?;
            }
            "session_ttl_minutes" => {
                let minutes = parse_number(key, value)?;
                config.session_ttl_minutes = Config::check_session_ttl(minutes)?;
            }
            "editor" => {
                config.editor = value.to_string();
            }
            "created" => {
                return Err(DaybookError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => return Err(unknown_key(key)),
        }

        self.workspace.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.workspace.load_config()
    }
}

fn unknown_key(key: &str) -> DaybookError {
    DaybookError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, CONFIG_KEYS
    ))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DaybookError::Config(format!("{} expects a number, got '{}'", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> ConfigService {
        let workspace = Workspace::new(temp.path().to_path_buf());
        workspace.initialize(&Config::new()).unwrap();
        ConfigService::new(workspace)
    }

    #[test]
    fn test_get_defaults() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert_eq!(service.get("bucket").unwrap(), "entry-images");
        assert_eq!(service.get("max_images_per_entry").unwrap(), "5");
        assert_eq!(service.get("public_url_base").unwrap(), "");
    }

    #[test]
    fn test_set_and_get() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.set("max_images_per_entry", "3").unwrap();
        service
            .set("public_url_base", "https://cdn.example.com/")
            .unwrap();

        assert_eq!(service.get("max_images_per_entry").unwrap(), "3");
        assert_eq!(
            service.get("public_url_base").unwrap(),
            "https://cdn.example.com"
        );
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(service.set("max_images_per_entry", "many").is_err());
        assert!(service.set("session_ttl_minutes", "0").is_err());
        assert!(service.set("bucket", "../escape").is_err());
        assert!(service.set("created", "2020-01-01").is_err());
    }

    #[test]
    fn test_set_caps_session_ttl() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        let err = service
            .set("session_ttl_minutes", "100000000000000")
            .unwrap_err();
        assert!(err.to_string().contains("must be between 1 and 525600"));
        assert_eq!(service.get("session_ttl_minutes").unwrap(), "60");

        service.set("session_ttl_minutes", "525600").unwrap();
        assert_eq!(service.get("session_ttl_minutes").unwrap(), "525600");
    }

    #[test]
    fn test_unknown_key() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        let err = service.get("colour").unwrap_err();
        assert!(err.to_string().contains("Valid keys are"));
    }
}

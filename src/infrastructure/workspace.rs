//! Location and layout of the local `.daybook` backend directory

use crate::error::{DaybookError, Result};
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

pub const ROOT_ENV: &str = "DAYBOOK_ROOT";
const DAYBOOK_DIR: &str = ".daybook";

/// A directory holding a `.daybook` backend
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
}

impl Workspace {
    pub fn new(root: PathBuf) -> Self {
        Workspace { root }
    }

    /// Discover the workspace root.
    /// First checks DAYBOOK_ROOT, then walks up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_daybook_dir(&path) {
                return Ok(Workspace::new(path));
            } else {
                return Err(DaybookError::Config(format!(
                    "{} is set to '{}' but no .daybook directory found. \
                    Run 'daybook init' in that directory or unset {}.",
                    ROOT_ENV,
                    path.display(),
                    ROOT_ENV
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the workspace root by walking up from `start`
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_daybook_dir(&current) {
                return Ok(Workspace::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(DaybookError::NotDaybookDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_daybook_dir(path: &Path) -> bool {
        path.join(DAYBOOK_DIR).is_dir()
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_daybook_dir(&self.root)
    }

    /// Create the `.daybook` layout with the given config
    pub fn initialize(&self, config: &Config) -> Result<()> {
        if self.is_initialized() {
            return Err(DaybookError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(self.daybook_dir())?;
        fs::create_dir_all(self.auth_dir())?;
        fs::create_dir_all(self.tables_dir())?;
        fs::create_dir_all(self.storage_dir().join(&config.bucket))?;
        config.save_to_dir(&self.root)
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    pub fn daybook_dir(&self) -> PathBuf {
        self.root.join(DAYBOOK_DIR)
    }

    pub fn auth_dir(&self) -> PathBuf {
        self.daybook_dir().join("auth")
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.daybook_dir().join("tables")
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.daybook_dir().join("storage")
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.daybook_dir().join("drafts")
    }
}

/// Replace a file by writing a sibling temp file and renaming it into place.
///
/// On Windows, `rename` does not overwrite existing files, so the destination
/// is removed first.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_name = format!(
        "{}.daybook-tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("table.toml"),
        std::process::id()
    );
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents)?;

    if cfg!(windows) && path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}

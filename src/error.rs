//! Error types for daybook

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for daybook application
#[derive(Debug, Error)]
pub enum DaybookError {
    #[error("Not a daybook directory: {0}")]
    NotDaybookDirectory(PathBuf),

    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("User already registered")]
    AccountExists,

    #[error("{0}")]
    InvalidSignUp(String),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Entry id '{0}' is ambiguous")]
    AmbiguousId(String),

    #[error("Invalid mood: {0}")]
    InvalidMood(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("{0}")]
    Validation(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl DaybookError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DaybookError::NotDaybookDirectory(_) => 2,
            DaybookError::InvalidMood(_) | DaybookError::InvalidDate(_) => 3,
            DaybookError::EntryNotFound(_) | DaybookError::AmbiguousId(_) => 4,
            DaybookError::InvalidCredentials
            | DaybookError::AccountExists
            | DaybookError::InvalidSignUp(_)
            | DaybookError::NotSignedIn => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DaybookError::NotDaybookDirectory(path) => {
                format!(
                    "Not a daybook directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'daybook init' in this directory to create a new journal\n\
                    • Navigate to an existing daybook directory\n\
                    • Set DAYBOOK_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            DaybookError::NotSignedIn => "Not signed in\n\n\
                Suggestions:\n\
                • Sign in with 'daybook signin <email>'\n\
                • Create an account with 'daybook signup <email>'"
                .to_string(),
            DaybookError::InvalidMood(value) => {
                format!(
                    "Invalid mood: '{}'\n\n\
                    Valid moods: excellent, good, okay, bad, terrible\n\
                    Example: daybook new --title \"Morning Run\" --mood good",
                    value
                )
            }
            DaybookError::InvalidDate(value) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Expected format: YYYY-MM-DD\n\
                    Example: daybook new --title \"Trip\" --date 2024-03-15",
                    value
                )
            }
            DaybookError::EntryNotFound(id) | DaybookError::AmbiguousId(id) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Use 'daybook list' to see entry ids\n\
                    • Provide more characters of the id than '{}'",
                    self, id
                )
            }
            DaybookError::Editor(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=nano)\n\
                    • Configure editor: daybook config editor 'vim'\n\
                    • Pass the text directly with --content",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DaybookError
pub type Result<T> = std::result::Result<T, DaybookError>;

//! Editor integration for composing entry content

use crate::error::{DaybookError, Result};
use std::fs;
use std::path::Path;
use std::process::Command;

/// Session for writing text in an external editor
pub struct EditorSession {
    command: String,
}

impl EditorSession {
    /// Create a new editor session with the given command
    pub fn new(editor_command: String) -> Self {
        EditorSession {
            command: editor_command,
        }
    }

    /// Open a draft seeded with `initial` in the editor, wait for it to
    /// exit, and return what was saved. The draft file is removed afterwards.
    pub fn compose(&self, drafts_dir: &Path, initial: &str) -> Result<String> {
        fs::create_dir_all(drafts_dir)?;
        let draft = drafts_dir.join(format!("draft-{}.md", std::process::id()));
        fs::write(&draft, initial)?;

        let result = self
            .wait_for(&draft)
            .and_then(|()| fs::read_to_string(&draft).map_err(DaybookError::from));
        let _ = fs::remove_file(&draft);

        result.map(|text| text.trim_end().to_string())
    }

    fn wait_for(&self, file_path: &Path) -> Result<()> {
        let (program, mut args) = self.parse_command();
        args.push(file_path.to_string_lossy().to_string());

        // On Windows, use cmd /c to ensure .bat and .cmd files are found
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&program);
            cmd
        } else {
            Command::new(&program)
        };

        let status = cmd.args(&args).status().map_err(|e| {
            DaybookError::Editor(format!("Failed to launch editor '{}': {}", program, e))
        })?;

        if !status.success() {
            return Err(DaybookError::Editor(format!(
                "Editor '{}' exited with {}",
                program, status
            )));
        }
        Ok(())
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> (String, Vec<String>) {
        let parts: Vec<&str> = self.command.split_whitespace().collect();

        if parts.is_empty() {
            let fallback = if cfg!(windows) { "notepad" } else { "nano" };
            return (fallback.to_string(), vec![]);
        }

        let program = parts[0].to_string();
        let args = parts[1..].iter().map(|s| s.to_string()).collect();

        (program, args)
    }
}

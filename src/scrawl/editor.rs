use crate::error::{Result, ScrawlError};
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Interactive editing capability.
///
/// Implementations open `path`, block until the user is done and report
/// whether the session succeeded. The file at `path` holds the result.
pub trait Editor {
    fn edit(&self, path: &Path) -> Result<()>;
}

/// Runs an external editor process.
///
/// The command is resolved lazily so commands that never edit do not need an
/// editor configured.
#[derive(Debug, Clone, Default)]
pub struct ExternalEditor {
    command: Option<String>,
}

impl ExternalEditor {
    /// `command` overrides `$VISUAL` / `$EDITOR` when set.
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    fn resolve_command(&self) -> Result<String> {
        if let Some(cmd) = self.command.as_ref().filter(|c| !c.trim().is_empty()) {
            return Ok(cmd.clone());
        }
        get_editor()
    }
}

impl Editor for ExternalEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        let command = self.resolve_command()?;
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| ScrawlError::Editor("Editor command is empty".to_string()))?;

        debug!(editor = %command, path = %path.display(), "launching editor");

        let status = Command::new(program)
            .args(parts)
            .arg(path)
            .status()
            .map_err(|e| ScrawlError::Editor(format!("Failed to launch '{}': {}", command, e)))?;

        if !status.success() {
            return Err(ScrawlError::Editor(format!(
                "'{}' exited with non-zero status",
                command
            )));
        }
        Ok(())
    }
}

/// Gets the editor command from environment.
/// Checks $VISUAL, then $EDITOR, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["VISUAL", "EDITOR"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in ["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok(fallback.to_string());
        }
    }

    Err(ScrawlError::Editor(
        "No editor found. Set $EDITOR or SCRAWL_EDITOR.".to_string(),
    ))
}

/// Opens `initial` in the editor via a scratch file and returns the result.
///
/// The scratch file is removed when this returns, whether or not editing
/// succeeded.
pub fn edit_bytes<E: Editor + ?Sized>(editor: &E, initial: &[u8]) -> Result<Vec<u8>> {
    let mut scratch = tempfile::Builder::new().prefix("scrawl-").tempfile()?;
    scratch.write_all(initial)?;
    scratch.flush()?;

    editor.edit(scratch.path())?;

    Ok(fs::read(scratch.path())?)
}

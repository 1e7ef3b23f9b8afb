use crate::duration;
use crate::error::{Result, ScrawlError};
use directories::BaseDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DIR_NAME: &str = ".scrawl";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub const ENV_DIR: &str = "SCRAWL_DIR";
pub const ENV_DATE_FORMAT: &str = "SCRAWL_DATE_FORMAT";
pub const ENV_EDITOR: &str = "SCRAWL_EDITOR";
pub const ENV_GPG_KEY: &str = "SCRAWL_GPG_KEY";

/// Settings read from `config.json` inside the store directory.
///
/// Every field is optional; missing fields fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub date_format: Option<String>,

    /// Editor command, overriding `$VISUAL` / `$EDITOR`
    #[serde(default)]
    pub editor: Option<String>,

    /// Key id or recipient passed to gpg for encrypted entries
    #[serde(default)]
    pub gpg_key: Option<String>,
}

impl FileConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let config_path = dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: FileConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// Resolved configuration handed to the API at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrawlConfig {
    pub dir: PathBuf,
    pub date_format: String,
    pub editor: Option<String>,
    pub gpg_key: Option<String>,
}

impl ScrawlConfig {
    /// Defaults for a store rooted at `dir`.
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            editor: None,
            gpg_key: None,
        }
    }

    /// Resolves configuration from the process environment.
    ///
    /// Precedence, lowest first: defaults, `config.json` in the store
    /// directory, `SCRAWL_*` variables, then `dir_override`.
    pub fn resolve(dir_override: Option<PathBuf>) -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::resolve_with(dir_override, &env)
    }

    /// Same as [`ScrawlConfig::resolve`] with an explicit environment map.
    pub fn resolve_with(
        dir_override: Option<PathBuf>,
        env: &HashMap<String, String>,
    ) -> Result<Self> {
        let non_empty = |key: &str| env.get(key).filter(|v| !v.is_empty()).cloned();

        let dir = match dir_override.or_else(|| non_empty(ENV_DIR).map(PathBuf::from)) {
            Some(dir) => dir,
            None => default_dir()?,
        };

        let file = FileConfig::load(&dir)?;
        let mut config = Self::new(dir);

        if let Some(fmt) = file.date_format {
            config.date_format = fmt;
        }
        config.editor = file.editor;
        config.gpg_key = file.gpg_key;

        if let Some(fmt) = non_empty(ENV_DATE_FORMAT) {
            config.date_format = fmt;
        }
        if let Some(editor) = non_empty(ENV_EDITOR) {
            config.editor = Some(editor);
        }
        if let Some(key) = non_empty(ENV_GPG_KEY) {
            config.gpg_key = Some(key);
        }

        if duration::render_timestamp(0, &config.date_format).is_err() {
            return Err(ScrawlError::Setup(format!(
                "Invalid date format: {}",
                config.date_format
            )));
        }

        Ok(config)
    }
}

fn default_dir() -> Result<PathBuf> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(DEFAULT_DIR_NAME))
        .ok_or_else(|| ScrawlError::Setup("Could not determine home directory".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_without_file_or_env() {
        let dir = TempDir::new().unwrap();
        let config =
            ScrawlConfig::resolve_with(Some(dir.path().to_path_buf()), &env(&[])).unwrap();
        assert_eq!(config.dir, dir.path());
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(config.editor, None);
        assert_eq!(config.gpg_key, None);
    }

    #[test]
    fn env_dir_is_used_without_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_str().unwrap();
        let config = ScrawlConfig::resolve_with(None, &env(&[(ENV_DIR, path)])).unwrap();
        assert_eq!(config.dir, dir.path());
    }

    #[test]
    fn override_beats_env_dir() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let config = ScrawlConfig::resolve_with(
            Some(b.path().to_path_buf()),
            &env(&[(ENV_DIR, a.path().to_str().unwrap())]),
        )
        .unwrap();
        assert_eq!(config.dir, b.path());
    }

    #[test]
    fn file_config_is_layered_under_env() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"date_format": "%d/%m/%Y", "editor": "nano", "gpg_key": "me@example.com"}"#,
        )
        .unwrap();

        let config = ScrawlConfig::resolve_with(
            Some(dir.path().to_path_buf()),
            &env(&[(ENV_EDITOR, "vim"), (ENV_DATE_FORMAT, "")]),
        )
        .unwrap();

        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.editor.as_deref(), Some("vim"));
        assert_eq!(config.gpg_key.as_deref(), Some("me@example.com"));
    }

    #[test]
    fn invalid_date_format_is_a_setup_error() {
        let dir = TempDir::new().unwrap();
        let err = ScrawlConfig::resolve_with(
            Some(dir.path().to_path_buf()),
            &env(&[(ENV_DATE_FORMAT, "%Q")]),
        )
        .unwrap_err();
        assert!(matches!(err, ScrawlError::Setup(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{ not json").unwrap();
        let err = ScrawlConfig::resolve_with(Some(dir.path().to_path_buf()), &env(&[]))
            .unwrap_err();
        assert!(matches!(err, ScrawlError::Serialization(_)));
        assert_eq!(err.exit_code(), 1);
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Default directory name for promptdoc data.
const PROMPTDOC_DIR: &str = ".promptdoc";
/// Config filename.
const CONFIG_FILE: &str = "config.toml";
/// Failure log filename.
const FAILURE_LOG_FILE: &str = "failures.log";

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Project-level configuration resolved from a working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the tool was started in.
    pub project_root: PathBuf,
    /// Path to the `.promptdoc/` directory.
    pub promptdoc_dir: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Default path of the failure log.
    pub failure_log_path: PathBuf,
    /// User settings loaded from config.toml.
    pub settings: UserSettings,
}

/// User-configurable settings from .promptdoc/config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub ingest: IngestSettings,
    pub output: OutputSettings,
    pub failures: FailureSettings,
}

/// Ingestion limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Maximum accepted upload size in MiB.
    pub max_file_size_mb: u32,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: 10,
        }
    }
}

/// Output-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format: "minified" (default) or "pretty".
    pub format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "minified".into(),
        }
    }
}

/// Failure log settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FailureSettings {
    /// Append every failed ingestion to a JSONL log.
    pub enabled: bool,
    /// Custom log file path (relative to .promptdoc/).
    pub log_file: Option<String>,
}

/// The knobs the pipeline itself needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub max_file_size_bytes: u64,
}

impl PipelineOptions {
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * BYTES_PER_MB;

    #[must_use]
    pub fn with_max_file_size_mb(mb: u32) -> Self {
        Self {
            max_file_size_bytes: u64::from(mb) * BYTES_PER_MB,
        }
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            max_file_size_bytes: Self::DEFAULT_MAX_FILE_SIZE_BYTES,
        }
    }
}

impl Config {
    /// Create config for a given project root.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let promptdoc_dir = project_root.join(PROMPTDOC_DIR);
        let config_path = promptdoc_dir.join(CONFIG_FILE);
        let failure_log_path = promptdoc_dir.join(FAILURE_LOG_FILE);

        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            project_root,
            promptdoc_dir,
            config_path,
            failure_log_path,
            settings,
        }
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| IngestError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    /// Load settings from config.toml if it exists.
    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), "ignoring invalid config: {e}");
                None
            }
        }
    }

    #[must_use]
    pub fn max_file_size_bytes(&self) -> u64 {
        u64::from(self.settings.ingest.max_file_size_mb) * BYTES_PER_MB
    }

    #[must_use]
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions::with_max_file_size_mb(self.settings.ingest.max_file_size_mb)
    }

    #[must_use]
    pub fn pretty_output(&self) -> bool {
        self.settings.output.format == "pretty"
    }

    /// Get the effective failure log path.
    #[must_use]
    pub fn get_failure_log_path(&self) -> PathBuf {
        if let Some(custom) = &self.settings.failures.log_file {
            self.promptdoc_dir.join(custom)
        } else {
            self.failure_log_path.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_new_sets_paths() {
        let cfg = Config::new("/tmp/project");
        assert_eq!(cfg.project_root, PathBuf::from("/tmp/project"));
        assert_eq!(cfg.promptdoc_dir, PathBuf::from("/tmp/project/.promptdoc"));
        assert_eq!(
            cfg.config_path,
            PathBuf::from("/tmp/project/.promptdoc/config.toml")
        );
    }

    #[test]
    fn load_full_settings() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".promptdoc");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            "[ingest]\nmax_file_size_mb = 25\n\n[output]\nformat = \"pretty\"\n\n[failures]\nenabled = true\nlog_file = \"ingest.log\"\n",
        )
        .unwrap();

        let cfg = Config::new(tmp.path());
        assert_eq!(cfg.settings.ingest.max_file_size_mb, 25);
        assert_eq!(cfg.max_file_size_bytes(), 25 * 1024 * 1024);
        assert!(cfg.pretty_output());
        assert!(cfg.settings.failures.enabled);
        assert_eq!(cfg.get_failure_log_path(), dir.join("ingest.log"));
    }

    #[test]
    fn default_settings() {
        let settings = UserSettings::default();
        assert_eq!(settings.ingest.max_file_size_mb, 10);
        assert_eq!(settings.output.format, "minified");
        assert!(!settings.failures.enabled);
        assert!(settings.failures.log_file.is_none());
    }

    #[test]
    fn pipeline_options_follow_settings() {
        let mut cfg = Config::new("/tmp/project");
        assert_eq!(cfg.pipeline_options(), PipelineOptions::default());
        cfg.settings.ingest.max_file_size_mb = 1;
        assert_eq!(cfg.pipeline_options().max_file_size_bytes, 1024 * 1024);
    }

    #[test]
    fn custom_failure_log_path() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = Config::new(tmp.path());
        assert_eq!(cfg.get_failure_log_path(), cfg.failure_log_path);

        cfg.settings.failures.log_file = Some("custom.log".to_string());
        assert_eq!(
            cfg.get_failure_log_path(),
            cfg.promptdoc_dir.join("custom.log")
        );
    }

    #[test]
    fn load_invalid_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".promptdoc");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "invalid toml {{{{").unwrap();

        let cfg = Config::new(tmp.path());
        assert_eq!(cfg.settings.ingest.max_file_size_mb, 10);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".promptdoc");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[ingest]\nmax_file_size_mb = 2\n").unwrap();

        let cfg = Config::new(tmp.path());
        assert_eq!(cfg.max_file_size_bytes(), 2 * 1024 * 1024);
        assert_eq!(cfg.settings.output.format, "minified");
    }
}

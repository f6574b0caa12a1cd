use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the forms backend. All endpoints hang off this one
    /// value; there is no per-call override.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Form behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Quiet window in milliseconds before an edited answer autosaves
    #[serde(default = "default_autosave_quiet_ms")]
    pub autosave_quiet_ms: u64,

    /// Seconds a user-visible error stays on screen before it clears
    #[serde(default = "default_error_display_secs")]
    pub error_display_secs: u64,
}

fn default_autosave_quiet_ms() -> u64 {
    1000
}

fn default_error_display_secs() -> u64 {
    5
}

impl FormConfig {
    pub fn quiet_window(&self) -> Duration {
        Duration::from_millis(self.autosave_quiet_ms)
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_secs(self.error_display_secs)
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            autosave_quiet_ms: default_autosave_quiet_ms(),
            error_display_secs: default_error_display_secs(),
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll timeout / redraw interval in milliseconds
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
}

fn default_refresh_rate_ms() -> u64 {
    250
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for intake's own state (logs live under it)
    #[serde(default = "default_state_path")]
    pub state: String,
}

fn default_state_path() -> String {
    ".intake".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

impl Config {
    /// Path to the intake config file within the state directory
    pub fn state_config_path() -> PathBuf {
        PathBuf::from(".intake/config.toml")
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so intake works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // State-dir config next to where the form is run from
        let state_config = Self::state_config_path();
        if state_config.exists() {
            builder = builder.add_source(config::File::from(state_config));
        }

        // User config in ~/.config/intake/ (optional global overrides)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("intake").join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables with INTAKE_ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("INTAKE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Get absolute path to the state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to the logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_documented_contract() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.form.autosave_quiet_ms, 1000);
        assert_eq!(config.form.error_display_secs, 5);
        assert_eq!(config.ui.refresh_rate_ms, 250);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.to_file);
    }

    #[test]
    fn test_duration_helpers() {
        let form = FormConfig::default();

        assert_eq!(form.quiet_window(), Duration::from_millis(1000));
        assert_eq!(form.error_display(), Duration::from_secs(5));
    }

    #[test]
    fn test_logs_path_hangs_off_the_state_dir() {
        let mut config = Config::default();
        config.paths.state = "/tmp/intake-test-state".to_string();

        assert_eq!(
            config.logs_path(),
            PathBuf::from("/tmp/intake-test-state/logs")
        );
    }

    #[test]
    fn test_relative_state_path_is_anchored_to_cwd() {
        let config = Config::default();
        let state = config.state_path();

        assert!(state.is_absolute());
        assert!(state.ends_with(".intake"));
    }
}

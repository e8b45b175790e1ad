use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::tui::theme::ThemeConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub timers: TimerConfig,

    /// Colour overrides for the terminal UI.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Seed the three example tasks when nothing valid is persisted. Default: true
    #[serde(default = "default_true")]
    pub seed_on_empty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timers: TimerConfig::default(),
            theme: ThemeConfig::default(),
            seed_on_empty: true,
        }
    }
}

/// Delays for the deferred follow-ups the dashboard schedules.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    /// How long a toast stays up. Default: 2000
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,

    /// How long the dark-mode ring stays lit. Default: 1000
    #[serde(default = "default_flourish_ms")]
    pub flourish_ms: u64,

    /// Pulse shown on a row before it flips to done. Default: 250
    #[serde(default = "default_completion_ms")]
    pub completion_ms: u64,

    /// Delay before quick-create closes after a successful submit. Default: 400
    #[serde(default = "default_quick_create_close_ms")]
    pub quick_create_close_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            toast_ms: default_toast_ms(),
            flourish_ms: default_flourish_ms(),
            completion_ms: default_completion_ms(),
            quick_create_close_ms: default_quick_create_close_ms(),
        }
    }
}

impl TimerConfig {
    pub fn toast(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn flourish(&self) -> Duration {
        Duration::from_millis(self.flourish_ms)
    }

    pub fn completion(&self) -> Duration {
        Duration::from_millis(self.completion_ms)
    }

    pub fn quick_create_close(&self) -> Duration {
        Duration::from_millis(self.quick_create_close_ms)
    }
}

fn default_true() -> bool {
    true
}

fn default_toast_ms() -> u64 {
    2000
}

fn default_flourish_ms() -> u64 {
    1000
}

fn default_completion_ms() -> u64 {
    250
}

fn default_quick_create_close_ms() -> u64 {
    400
}

/// Returns the base digital8 directory: ~/.digital8/
pub fn base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(".digital8"))
}

/// Returns the path to the `SQLite` database backing the task bundle
pub fn db_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("digital8.db"))
}

/// Returns the path to the log file
pub fn log_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("digital8.log"))
}

/// Returns the path to config.toml
pub fn config_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("config.toml"))
}

/// Ensure all required directories exist
pub fn ensure_dirs() -> Result<()> {
    let base = base_dir()?;
    fs::create_dir_all(&base).context("failed to create ~/.digital8/")?;
    Ok(())
}

/// Load config from ~/.digital8/config.toml (or return defaults if it doesn't exist)
pub fn load() -> Result<Config> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    } else {
        Ok(Config::default())
    }
}

//! Configuration resolution for modbrand.
//!
//! Implements hierarchical config resolution:
//! 1. Built-in defaults
//! 2. Global config (`<config dir>/modbrand/settings.json`)
//! 3. Environment variables
//! 4. CLI arguments (highest priority, applied by the binary)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Complete modbrand configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root URL of the branding service (e.g. "<https://brand.example.org>").
    pub base_url: String,
    /// Value of the service's `session_id` cookie, obtained after signing in
    /// through the browser.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
    pub request_timeout_secs: u64,
    pub log_json: bool,
    /// How long a notification stays on screen.
    pub notice_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            session_cookie: None,
            request_timeout_secs: 30,
            log_json: false,
            notice_ttl_secs: 6,
        }
    }
}

impl Config {
    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Load configuration with hierarchical resolution.
///
/// `file` overrides the global config location when given.
pub fn load_config(file: Option<&Path>) -> Result<Config> {
    let mut config = load_file_layer(file)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Defaults plus the config file, with no environment overrides.
///
/// This is what gets written back when a command persists something.
pub fn load_file_layer(file: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();
    if let Some(path) = config_path(file).filter(|p| p.exists()) {
        let stored = load_config_file(&path)?;
        merge_config(&mut config, stored);
    }
    Ok(config)
}

/// Replace the stored session cookie (`None` forgets it), leaving every
/// other stored value untouched.
pub fn store_session(file: Option<&Path>, session: Option<&str>) -> Result<()> {
    let path = config_path(file)
        .ok_or_else(|| Error::Config("Cannot determine config directory".into()))?;
    let mut stored = load_file_layer(Some(&path))?;
    stored.session_cookie = session.map(str::to_string);
    stored.save_to(&path)
}

fn config_path(file: Option<&Path>) -> Option<PathBuf> {
    file.map(Path::to_path_buf).or_else(global_config_path)
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("modbrand").join("settings.json"))
}

/// Default log file for the TUI.
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("modbrand").join("modbrand.log"))
}

fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

fn merge_config(base: &mut Config, overlay: Config) {
    if overlay.session_cookie.is_some() {
        base.session_cookie = overlay.session_cookie;
    }
    base.base_url = overlay.base_url;
    base.request_timeout_secs = overlay.request_timeout_secs;
    base.log_json = overlay.log_json;
    base.notice_ttl_secs = overlay.notice_ttl_secs;
}

fn apply_env_overrides(config: &mut Config) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Apply `MODBRAND_*` overrides using `lookup` to read variables.
pub fn apply_overrides_from(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("MODBRAND_URL") {
        config.base_url = val;
    }
    if let Some(val) = lookup("MODBRAND_SESSION").filter(|v| !v.is_empty()) {
        config.session_cookie = Some(val);
    }
    if let Some(n) = lookup("MODBRAND_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        config.request_timeout_secs = n;
    }
    if let Some(val) = lookup("MODBRAND_LOG_JSON") {
        config.log_json = matches!(val.as_str(), "1" | "true" | "yes");
    }
}

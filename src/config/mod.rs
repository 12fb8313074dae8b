use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
    /// Request timeout; 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureConfig {
    pub path: Option<String>,
    #[serde(default)]
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_profile_name")]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            email: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactConfig {
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub fixture: FixtureConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub contact: ContactConfig,
}

const CONFIG_ENV: &str = "DELLIV_CONFIG";

fn default_timeout_secs() -> u64 {
    10
}

fn default_profile_name() -> String {
    "Operador".to_string()
}

/// Load configuration.
///
/// A path named by `--config` or `DELLIV_CONFIG` must exist. The default
/// location is optional and a missing file there yields defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    load_with(explicit, from_env.as_deref())
}

fn load_with(explicit: Option<&Path>, from_env: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_from(path);
    }
    if let Some(path) = from_env {
        return load_from(path).with_context(|| format!("{CONFIG_ENV} is set"));
    }
    match config_path() {
        Some(path) if path.exists() => load_from(&path),
        _ => Ok(Config::default()),
    }
}

pub fn load_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str::<Config>(&content).with_context(|| format!("parse config {}", path.display()))
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("delliv").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("delliv").join("config.toml"));
    }

    directories::ProjectDirs::from("app", "delliv", "delliv")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("delliv"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("delliv"));
    }
    directories::ProjectDirs::from("app", "delliv", "delliv")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Log file location; the terminal itself belongs to the UI
pub fn log_path(config: &Config) -> Option<PathBuf> {
    if let Some(file) = config.log.file.as_deref().and_then(expand_path) {
        return Some(file);
    }
    data_dir().map(|dir| dir.join("delliv.log"))
}

pub fn export_dir() -> PathBuf {
    data_dir()
        .map(|dir| dir.join("exports"))
        .unwrap_or_else(|| PathBuf::from(".delliv").join("exports"))
}

/// Expand `~/` and make relative paths absolute
pub fn expand_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            return Some(home.join(rest));
        }
    }

    let mut buf = PathBuf::from(trimmed);
    if buf.is_relative() {
        if let Ok(cwd) = std::env::current_dir() {
            buf = cwd.join(buf);
        }
    }
    Some(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.api.base_url.is_none());
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.fixture.latency_ms, 0);
        assert_eq!(config.profile.name, "Operador");
    }

    #[test]
    fn test_full_file() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://api.delliv.app"
            token = "secret"
            timeout_secs = 3

            [fixture]
            path = "orders.json"
            latency_ms = 250

            [log]
            level = "debug"

            [profile]
            name = "Diego"
            email = "diego@delliv.app"

            [contact]
            phone = "+55 11 4000-0000"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://api.delliv.app"));
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.fixture.latency_ms, 250);
        assert_eq!(config.log.level.as_deref(), Some("debug"));
        assert_eq!(config.profile.email, "diego@delliv.app");
        assert!(config.contact.email.is_none());
    }

    #[test]
    fn test_load_from_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\nbase_url = 1").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parse config"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_env_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = load_with(None, Some(&missing)).unwrap_err();
        assert!(format!("{err:#}").contains("DELLIV_CONFIG"));

        let present = dir.path().join("config.toml");
        fs::write(&present, "[profile]\nname = \"Lia\"").unwrap();
        assert_eq!(load_with(None, Some(&present)).unwrap().profile.name, "Lia");
    }

    #[test]
    fn test_explicit_path_wins_over_env() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, "[profile]\nname = \"Rui\"").unwrap();
        let config = load_with(Some(&explicit), Some(&dir.path().join("missing.toml"))).unwrap();
        assert_eq!(config.profile.name, "Rui");
    }

    #[test]
    fn test_expand_path() {
        assert!(expand_path("   ").is_none());
        assert!(expand_path("orders.json").unwrap().is_absolute());
    }
}

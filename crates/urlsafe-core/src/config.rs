use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides `api_base`. Read once, by the loader.
pub const API_BASE_ENV: &str = "URLSAFE_API_BASE";

/// Toast timing (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastConfig {
    /// How long a toast stays fully visible, in milliseconds.
    pub visible_ms: u64,
    /// Exit phase before the toast is hidden, in milliseconds.
    pub exit_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            visible_ms: 3000,
            exit_ms: 300,
        }
    }
}

/// Global configuration loaded from `~/.config/urlsafe/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlsafeConfig {
    /// Base URL of the safety-check service; `/check-url` is appended.
    pub api_base: String,
    /// Total request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Optional toast timing; if missing, built-in defaults are used.
    #[serde(default)]
    pub toast: Option<ToastConfig>,
}

impl Default for UrlsafeConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
            toast: None,
        }
    }
}

impl UrlsafeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }

    pub fn toast(&self) -> ToastConfig {
        self.toast.clone().unwrap_or_default()
    }

    /// Replace `api_base` when `value` is set and non-empty.
    pub fn apply_api_base_override(&mut self, value: Option<&str>) {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.api_base = v.to_string();
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlsafe")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists,
/// then apply the `URLSAFE_API_BASE` override.
pub fn load_or_init() -> Result<UrlsafeConfig> {
    let path = config_path()?;
    let mut cfg = load_or_init_at(&path)?;
    cfg.apply_api_base_override(std::env::var(API_BASE_ENV).ok().as_deref());
    Ok(cfg)
}

/// Like [`load_or_init`] for an explicit path, without the environment override.
pub fn load_or_init_at(path: &Path) -> Result<UrlsafeConfig> {
    if !path.exists() {
        let default_cfg = UrlsafeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("writing default config to {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: UrlsafeConfig =
        toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = UrlsafeConfig::default();
        assert_eq!(cfg.api_base, "http://localhost:8080");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.connect_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.toast(), ToastConfig::default());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = UrlsafeConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: UrlsafeConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.api_base, cfg.api_base);
        assert_eq!(parsed.request_timeout_secs, cfg.request_timeout_secs);
        assert_eq!(parsed.connect_timeout_secs, cfg.connect_timeout_secs);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            api_base = "https://checker.example.com/api"
            request_timeout_secs = 3
            connect_timeout_secs = 1

            [toast]
            visible_ms = 5000
            exit_ms = 0
        "#;
        let cfg: UrlsafeConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.api_base, "https://checker.example.com/api");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(3));
        let toast = cfg.toast();
        assert_eq!(toast.visible_ms, 5000);
        assert_eq!(toast.exit_ms, 0);
    }

    #[test]
    fn zero_timeouts_are_clamped() {
        let toml = r#"
            api_base = "http://x"
            request_timeout_secs = 0
            connect_timeout_secs = 0
        "#;
        let cfg: UrlsafeConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.request_timeout(), Duration::from_secs(1));
        assert_eq!(cfg.connect_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn api_base_override() {
        let mut cfg = UrlsafeConfig::default();
        cfg.apply_api_base_override(None);
        assert_eq!(cfg.api_base, "http://localhost:8080");
        cfg.apply_api_base_override(Some("   "));
        assert_eq!(cfg.api_base, "http://localhost:8080");
        cfg.apply_api_base_override(Some(" http://10.0.0.2:9000 "));
        assert_eq!(cfg.api_base, "http://10.0.0.2:9000");
    }

    #[test]
    fn load_or_init_creates_then_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.api_base, "http://localhost:8080");

        fs::write(&path, "api_base = \"http://other\"\nrequest_timeout_secs = 2\nconnect_timeout_secs = 2\n").unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(loaded.api_base, "http://other");
        assert!(loaded.toast.is_none());
    }

    #[test]
    fn load_or_init_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_base = 42").unwrap();
        let err = load_or_init_at(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing"));
    }
}

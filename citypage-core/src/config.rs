use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    fetch::HttpFetcher,
    locator::{DEFAULT_BASE_URL, Endpoints},
    resolver::CityPageClient,
};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "https://dd.weather.gc.ca/citypage_weather/xml"
/// timeout_secs = 30
/// default_province = "AB"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Feed base URL; the public feed when unset.
    pub base_url: Option<String>,

    /// HTTP request timeout in seconds; no timeout when unset.
    pub timeout_secs: Option<u64>,

    /// Province code used when a command doesn't name one.
    pub default_province: Option<String>,

    /// Skip TLS certificate validation (some mirrors serve self-signed certificates).
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citypage", "citypage-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        if let Some(url) = &cfg.base_url {
            validate_base_url(url)?;
        }
        Ok(cfg)
    }

    /// Set the feed base URL after checking it looks like an HTTP(S) URL.
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        validate_base_url(url)?;
        self.base_url = Some(url.to_string());
        Ok(())
    }

    /// Store a province code, upper-cased; blank clears the default.
    pub fn set_default_province(&mut self, province: &str) {
        let province = province.trim();
        self.default_province = (!province.is_empty()).then(|| province.to_uppercase());
    }

    /// `explicit` when given, otherwise the configured default.
    pub fn province_or_default(&self, explicit: Option<String>) -> Option<String> {
        explicit
            .filter(|p| !p.trim().is_empty())
            .or_else(|| self.default_province.clone())
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Build a client for the configured feed.
    pub fn client(&self) -> Result<CityPageClient<HttpFetcher>> {
        let fetcher = HttpFetcher::with_options(self.timeout(), self.accept_invalid_certs)
            .context("Failed to initialize HTTP client")?;

        Ok(CityPageClient::new(fetcher, self.endpoints()))
    }
}

fn validate_base_url(url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("Invalid base URL '{url}': expected an http:// or https:// URL.");
    }
    Ok(())
}

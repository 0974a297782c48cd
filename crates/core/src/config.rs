//! # Site Configuration
//!
//! Layered configuration: built-in defaults, then `.cafe/config.json`, then
//! `CAFE_*` environment variables, then command-line flags. Every layer is a
//! [`PersistedConfig`] with optional fields; later layers win field by field.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://gourimenon-portfolio.vercel.app/";
pub const DEFAULT_TITLE: &str = "Gouri’s Café";
pub const DEFAULT_DESCRIPTION: &str = "Fresh data brews, warm models, and cozy analytics.";
pub const DEFAULT_PORT: u16 = 8080;
/// Directory holding photos and the résumé, relative to the working directory
pub const DEFAULT_STATIC_DIR: &str = "public";

const CONFIG_FILE: &str = "config.json";

/// Get the runtime directory path (.cafe)
pub fn get_runtime_path() -> PathBuf {
    if let Ok(path) = std::env::var("CAFE_RUNTIME_PATH") {
        return PathBuf::from(path);
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".cafe")
}

/// One configuration layer
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PersistedConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON catalog replacing the built-in menu
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// On-disk assets served alongside the embedded ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

impl PersistedConfig {
    /// Load `config.json` from the runtime directory. A missing file is an
    /// empty layer.
    pub async fn load() -> Result<Self> {
        Self::load_from(get_runtime_path().join(CONFIG_FILE)).await
    }

    pub async fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if tokio::fs::metadata(path).await.is_err() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        serde_json::from_str(&content).with_context(|| format!("Invalid config: {:?}", path))
    }

    /// Layer built from `CAFE_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Layer built from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("CAFE_PORT").and_then(|raw| match raw.trim().parse() {
            Ok(port) => Some(port),
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "Invalid CAFE_PORT, ignoring");
                None
            }
        });

        Self {
            base_url: lookup("CAFE_BASE_URL"),
            title: lookup("CAFE_TITLE"),
            description: lookup("CAFE_DESCRIPTION"),
            catalog_path: lookup("CAFE_CATALOG").map(PathBuf::from),
            port,
            static_dir: lookup("CAFE_STATIC_DIR").map(PathBuf::from),
        }
    }

    pub fn merge(&mut self, other: PersistedConfig) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.title.is_some() {
            self.title = other.title;
        }
        if other.description.is_some() {
            self.description = other.description;
        }
        if other.catalog_path.is_some() {
            self.catalog_path = other.catalog_path;
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.static_dir.is_some() {
            self.static_dir = other.static_dir;
        }
    }

    /// Fill unset fields with defaults
    pub fn resolve(self) -> SiteConfig {
        SiteConfig {
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            title: self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: self
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            catalog_path: self.catalog_path,
            port: self.port.unwrap_or(DEFAULT_PORT),
            static_dir: self
                .static_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        }
    }
}

/// Effective configuration the site runs with
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SiteConfig {
    pub base_url: String,
    pub title: String,
    pub description: String,
    pub catalog_path: Option<PathBuf>,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        PersistedConfig::default().resolve()
    }
}

//! Configuration handling for the TUI

use crate::state::tag_filter::default_dictionary;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the backend address
pub const API_URL_ENV: &str = "FORMSHARE_API_URL";

/// Backend address used when nothing is configured
const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Base URL of the form sharing backend
    pub api_base_url: Option<String>,
    /// Replaces the built-in tag suggestions
    pub recommended_tags: Option<Vec<String>>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "formshare", "formshare-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file means defaults
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: TuiConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Backend base URL: environment, then config file, then default
    pub fn api_base_url(&self) -> String {
        Self::resolve_api_base_url(std::env::var(API_URL_ENV).ok(), self.api_base_url.clone())
    }

    fn resolve_api_base_url(env: Option<String>, configured: Option<String>) -> String {
        env.filter(|v| !v.trim().is_empty())
            .or(configured)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Tag dictionary for suggestions
    pub fn recommended_tags(&self) -> Vec<String> {
        self.recommended_tags
            .clone()
            .unwrap_or_else(default_dictionary)
    }
}

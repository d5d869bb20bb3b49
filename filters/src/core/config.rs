use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::filters::FilterLimits;
use crate::utils::file::expand_home;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME};

// =============================================================================
// File Configuration
// =============================================================================

/// Limits section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LimitsFileConfig {
    pub max_depth: Option<u32>,
    pub max_filter_bytes: Option<usize>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub limits: Option<LimitsFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(limits) = other.limits {
            let current = self.limits.get_or_insert_with(LimitsFileConfig::default);
            if limits.max_depth.is_some() {
                tracing::trace!(max_depth = ?limits.max_depth, "Merging limits.max_depth");
                current.max_depth = limits.max_depth;
            }
            if limits.max_filter_bytes.is_some() {
                tracing::trace!(
                    max_filter_bytes = ?limits.max_filter_bytes,
                    "Merging limits.max_filter_bytes"
                );
                current.max_filter_bytes = limits.max_filter_bytes;
            }
        }
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Resolved application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub limits: FilterLimits,
}

impl AppConfig {
    /// Load configuration: defaults -> profile file -> local/CLI file -> CLI/env
    pub fn load(cli: &CliConfig) -> Result<Self> {
        Self::load_with_profile(cli, get_profile_config_path())
    }

    fn load_with_profile(cli: &CliConfig, profile_path: Option<PathBuf>) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Load from profile dir (~/.vespa-filters/vespa-filters.json) - skip if not exists
        if let Some(profile_path) = profile_path
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Load from CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_home(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        // 3. Layer configs: defaults -> file config -> CLI/env overrides
        let defaults = FilterLimits::default();
        let file_limits = file_config.limits.unwrap_or_default();

        let limits = FilterLimits {
            max_depth: cli
                .max_depth
                .or(file_limits.max_depth)
                .unwrap_or(defaults.max_depth),
            max_filter_bytes: cli
                .max_bytes
                .or(file_limits.max_filter_bytes)
                .unwrap_or(defaults.max_filter_bytes),
        };

        let config = Self { limits };
        config.validate()?;

        tracing::debug!(
            max_depth = config.limits.max_depth,
            max_filter_bytes = config.limits.max_filter_bytes,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.limits.max_depth == 0 {
            anyhow::bail!("Configuration error: limits.max_depth must be greater than 0");
        }
        if self.limits.max_filter_bytes == 0 {
            anyhow::bail!("Configuration error: limits.max_filter_bytes must be greater than 0");
        }
        Ok(())
    }
}

/// Get the profile config path (~/.vespa-filters/vespa-filters.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

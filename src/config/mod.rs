mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    expand_paths(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./photoforged.toml",
        "~/.config/photoforged/config.toml",
        "/etc/photoforged/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

fn expand_paths(config: &mut Config) {
    let raw = config.storage.path.to_string_lossy().into_owned();
    let expanded = shellexpand::tilde(&raw);
    config.storage.path = expanded.as_ref().into();
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    // Validate server config
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }
    if config.server.request_timeout_secs == 0 {
        anyhow::bail!("Request timeout must be at least 1 second");
    }
    if config.server.max_upload_bytes == 0 {
        anyhow::bail!("Upload limit cannot be 0");
    }

    // Validate storage config
    if config.storage.output_prefix.is_empty() || config.storage.upload_prefix.is_empty() {
        anyhow::bail!("Storage name prefixes cannot be empty");
    }
    if !(1..=100).contains(&config.storage.jpeg_quality) {
        anyhow::bail!(
            "JPEG quality must be between 1 and 100, got {}",
            config.storage.jpeg_quality
        );
    }

    Ok(())
}

/// Problems worth reporting that do not stop the config from loading.
///
/// Config is loaded before logging is set up, so callers log these once
/// the subscriber is installed.
pub fn config_warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    if !config.storage.create_if_missing && !config.storage.path.is_dir() {
        warnings.push(format!(
            "Storage path does not exist: {:?}",
            config.storage.path
        ));
    }
    warnings
}

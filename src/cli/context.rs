//! Configuration and credential management for the CLI.

use std::error::Error;
use std::path::PathBuf;

use crate::config::{ApiKey, BaseUrl, Config};
use crate::Handwrytten;

/// Immutable per-invocation context, built once from global flags and the
/// environment and passed by reference into every command handler.
#[derive(Debug, Clone)]
pub struct CliContext {
    /// API key from `--api-key`, `HANDWRYTTEN_API_KEY`, or the saved
    /// credentials file.
    pub api_key: Option<String>,
    /// Base URL override.
    pub base_url: Option<String>,
    /// Output raw JSON instead of tables.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl CliContext {
    /// Builds an API client, or fails with guidance when no key is
    /// available.
    ///
    /// # Errors
    ///
    /// Returns an error when no API key is configured or configuration
    /// validation fails.
    pub fn client(&self) -> Result<Handwrytten, Box<dyn Error>> {
        let api_key = self.api_key.clone().ok_or(
            "No API key found.\n\n\
             Set it with one of:\n\
             \x20 1. handwrytten account login\n\
             \x20 2. export HANDWRYTTEN_API_KEY=your_key\n\
             \x20 3. handwrytten --api-key your_key ...",
        )?;

        let mut builder = Config::builder().api_key(ApiKey::new(api_key)?);
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(BaseUrl::new(base_url.clone())?);
        }
        Ok(Handwrytten::with_config(builder.build()?))
    }
}

/// Path of the saved credentials file
/// (`~/.config/handwrytten/config.json`).
#[must_use]
pub fn config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("handwrytten").join("config.json"))
}

/// Loads the saved API key, if any.
#[must_use]
pub fn load_api_key() -> Option<String> {
    let path = config_file()?;
    let text = std::fs::read_to_string(path).ok()?;
    let data: serde_json::Value = serde_json::from_str(&text).ok()?;
    data.get("api_key")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

/// Persists the API key to the credentials file with owner-only
/// permissions, returning the path written.
///
/// # Errors
///
/// Returns an error when the config directory cannot be determined or the
/// file cannot be written.
pub fn save_api_key(api_key: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = config_file().ok_or("cannot determine the user config directory")?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Preserve any other settings already in the file.
    let mut data: serde_json::Value = std::fs::read_to_string(&path)
        .ok()
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or_else(|| serde_json::json!({}));
    data["api_key"] = serde_json::Value::String(api_key.to_string());

    std::fs::write(&path, serde_json::to_string_pretty(&data)?)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(path)
}

/// Removes the credentials file. Returns `true` if one existed.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be removed.
pub fn delete_api_key() -> Result<bool, Box<dyn Error>> {
    let Some(path) = config_file() else {
        return Ok(false);
    };
    if path.exists() {
        std::fs::remove_file(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

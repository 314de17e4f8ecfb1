//! Configuration file loading with environment variable overrides.

use std::fmt;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::EditError;

/// Environment variables checked for the API key, in priority order.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Default values used when the matching CLI flag is absent.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Gemini API key.
    pub gemini: Option<String>,
}

/// Default parameter values from config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default model name or alias.
    pub model: String,
    /// Default output format. `None` keeps whatever the model returned.
    pub format: Option<String>,
    /// Request timeout in seconds. `0` disables the timeout.
    pub timeout_secs: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { model: "nano-banana".to_string(), format: None, timeout_secs: 120 }
    }
}

/// A non-empty API key, redacted in debug output.
pub struct ApiCredential(SecretString);

impl ApiCredential {
    /// Wrap a raw key.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Config`] if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, EditError> {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(EditError::Config("API key is empty".to_string()));
        }
        Ok(Self(SecretString::new(trimmed.to_string())))
    }

    /// The raw key, for the request header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential([REDACTED])")
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Resolve the Gemini credential from the process environment, falling
    /// back to the config file.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Config`] if no non-empty key is configured.
    pub fn credential(&self) -> Result<ApiCredential, EditError> {
        self.credential_with(|name| std::env::var(name).ok())
    }

    /// Resolve the credential using `lookup` in place of the environment.
    ///
    /// Blank values are skipped so an exported-but-empty variable does not
    /// shadow the config file.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Config`] if no non-empty key is found.
    pub fn credential_with<F>(&self, lookup: F) -> Result<ApiCredential, EditError>
    where
        F: Fn(&str) -> Option<String>,
    {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .chain(self.keys.gemini.clone())
            .find_map(|key| ApiCredential::new(key).ok())
            .ok_or_else(|| {
                EditError::Config(format!(
                    "No Gemini API key. Set {} or add [keys] gemini to the config file.",
                    API_KEY_ENV_VARS.join(" or ")
                ))
            })
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `PIXELART_CONFIG` environment variable
/// 3. `~/.config/pixelart/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("PIXELART_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/pixelart/config.toml")
    } else {
        PathBuf::from("pixelart.toml")
    }
}

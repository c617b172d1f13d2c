use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GaiError, Result};

/// Environment variable holding the Gemini credential
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GaiConfig {
   /// Base URL of the Gemini API (overridden by `GAI_API_URL` env var)
   pub api_base_url: String,

   /// Model used for commit message generation (overridden by `GAI_MODEL`)
   pub model: String,

   /// HTTP request timeout in seconds; unset waits for the server indefinitely
   pub request_timeout_secs: Option<u64>,

   /// HTTP connection timeout in seconds
   pub connect_timeout_secs: u64,

   /// Print git commands and request details (set by `GAI_VERBOSE`)
   #[serde(skip)]
   pub verbose: bool,
}

impl Default for GaiConfig {
   fn default() -> Self {
      Self {
         api_base_url:         "https://generativelanguage.googleapis.com".to_string(),
         model:                "gemini-1.5-flash".to_string(),
         request_timeout_secs: None,
         connect_timeout_secs: 30,
         verbose:              false,
      }
   }
}

impl GaiConfig {
   /// Load config from default location (~/.config/gai/config.toml), or from
   /// `GAI_CONFIG` when set. Falls back to Default if the file doesn't exist.
   /// Environment variables override config file values:
   /// - `GAI_API_URL` overrides `api_base_url`
   /// - `GAI_MODEL` overrides `model`
   pub fn load() -> Result<Self> {
      let config_path = if let Ok(custom_path) = std::env::var("GAI_CONFIG") {
         PathBuf::from(custom_path)
      } else {
         Self::default_config_path().unwrap_or_default()
      };

      let mut config = if config_path.is_file() {
         Self::read_file(&config_path)?
      } else {
         Self::default()
      };

      config.apply_env_overrides();
      Ok(config)
   }

   /// Load config from specific file
   pub fn from_file(path: &Path) -> Result<Self> {
      let mut config = Self::read_file(path)?;
      config.apply_env_overrides();
      Ok(config)
   }

   fn read_file(path: &Path) -> Result<Self> {
      let contents = std::fs::read_to_string(path).map_err(|e| {
         GaiError::ConfigError(format!("Failed to read {}: {e}", path.display()))
      })?;
      Self::from_toml_str(&contents)
         .map_err(|e| GaiError::ConfigError(format!("Failed to parse {}: {e}", path.display())))
   }

   fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
      toml::from_str(contents)
   }

   fn apply_env_overrides(&mut self) {
      if let Ok(api_url) = std::env::var("GAI_API_URL") {
         self.api_base_url = api_url;
      }

      if let Ok(model) = std::env::var("GAI_MODEL") {
         self.model = model;
      }

      self.verbose = std::env::var_os("GAI_VERBOSE").is_some();
   }

   /// Get default config path (platform-safe)
   /// Tries HOME (Unix/Linux/macOS) then USERPROFILE (Windows)
   pub fn default_config_path() -> Result<PathBuf> {
      if let Ok(home) = std::env::var("HOME") {
         return Ok(PathBuf::from(home).join(".config/gai/config.toml"));
      }

      if let Ok(home) = std::env::var("USERPROFILE") {
         return Ok(PathBuf::from(home).join(".config/gai/config.toml"));
      }

      Err(GaiError::ConfigError(
         "No home directory found (tried HOME and USERPROFILE)".to_string(),
      ))
   }
}

/// Read the Gemini credential. An empty value counts as missing.
pub fn api_key_from_env() -> Result<String> {
   match std::env::var(API_KEY_VAR) {
      Ok(key) if !key.trim().is_empty() => Ok(key),
      _ => Err(GaiError::MissingApiKey(API_KEY_VAR)),
   }
}

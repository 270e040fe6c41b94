//! Configuration management for reply-pro
//!
//! Stores settings in ~/.config/reply-pro/config.json. The API key lives in
//! the system keychain; the config file only holds non-secret settings.

use crate::reply::client::{DEFAULT_API_BASE, DEFAULT_MODEL};
use keyring::Entry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini model id used for generation
    #[serde(default = "default_model")]
    pub model: String,
    /// API root, overridable for proxies and local testing
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Whole-request timeout for the generation call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

const KEYRING_SERVICE: &str = "reply-pro";
const KEYRING_USERNAME: &str = "gemini_api_key";

/// Checked in order before the keychain.
const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    90
}

fn keyring_entry() -> Result<Entry, keyring::Error> {
    Entry::new(KEYRING_SERVICE, KEYRING_USERNAME)
}

fn read_keyring_key() -> Result<Option<String>, keyring::Error> {
    let entry = keyring_entry()?;
    match entry.get_password() {
        Ok(key) => Ok(Some(key)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(err) => Err(err),
    }
}

fn write_keyring_key(key: &str) -> Result<(), keyring::Error> {
    let entry = keyring_entry()?;
    entry.set_password(key)
}

fn env_api_key() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|key| !key.trim().is_empty())
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reply-pro"))
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.json"))
    }

    /// Default location of the diagnostics log
    pub fn default_log_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("reply-pro.log"))
    }

    /// Load config from disk, or return default
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path. A corrupt file is moved aside and
    /// defaults are returned.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                preserve_corrupt_config(path, &content);
                warn!(
                    path = %path.display(),
                    error = %err,
                    "config file was corrupted; a backup was saved and defaults were loaded"
                );
                Self::default()
            }
        }
    }

    /// Save config to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::config_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        let dir = path
            .parent()
            .ok_or_else(|| format!("Invalid config path: {}", path.display()))?;

        fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(dir, fs::Permissions::from_mode(0o700)) {
                warn!("Failed to set config directory permissions: {}", e);
            }
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        #[cfg(unix)]
        {
            write_config_atomic(path, &content)
                .map_err(|e| format!("Failed to write config: {}", e))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))?;
        }

        Ok(())
    }

    /// Get the Gemini API key (from environment or keychain)
    pub fn get_api_key(&self) -> Option<String> {
        // Environment variable takes precedence
        if let Some(key) = env_api_key() {
            return Some(key);
        }

        match read_keyring_key() {
            Ok(key) => key,
            Err(err) => {
                warn!("Failed to read API key from system keychain: {}", err);
                None
            }
        }
    }

    /// Set and save the API key
    pub fn set_api_key(&self, key: &str) -> Result<(), String> {
        if let Err(write_err) = write_keyring_key(key) {
            return Err(format!(
                "Failed to store API key in system keychain: {}. \
                 You can set the GEMINI_API_KEY environment variable instead.",
                write_err
            ));
        }

        // Verify the write succeeded by reading it back
        match read_keyring_key() {
            Ok(Some(stored_key)) if stored_key == key => {
                info!("API key stored in system keychain");
                self.save()
            }
            Ok(Some(_)) => Err("API key verification failed: stored key doesn't match. \
                 You can set the GEMINI_API_KEY environment variable instead."
                .to_string()),
            Ok(None) => Err(
                "API key verification failed: key was not persisted to keychain. \
                 You can set the GEMINI_API_KEY environment variable instead."
                    .to_string(),
            ),
            Err(read_err) => Err(format!(
                "API key verification failed: couldn't read back from keychain ({}). \
                 You can set the GEMINI_API_KEY environment variable instead.",
                read_err
            )),
        }
    }

    /// Google AI Studio keys start with "AIza"
    pub fn validate_api_key_format(key: &str) -> bool {
        key.starts_with("AIza") && key.len() > 20
    }

    /// Get the config file location for display
    pub fn config_location() -> String {
        Self::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "~/.config/reply-pro/config.json".to_string())
    }
}

/// Interactive prompt to set up API key
pub fn setup_api_key_interactive() -> Result<String, String> {
    use std::io;

    println!();
    println!("  ┌─────────────────────────────────────────────────────────┐");
    println!("  │  GEMINI SETUP                                           │");
    println!("  └─────────────────────────────────────────────────────────┘");
    println!();
    println!("  reply-pro drafts replies with the Google Gemini API.");
    println!();
    println!("  1. Create an API key at: https://aistudio.google.com/apikey");
    println!("  2. Paste it below (saved in your system keychain when available)");
    println!();
    print!("  API Key: ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut key = String::new();
    io::stdin().read_line(&mut key).map_err(|e| e.to_string())?;
    let key = key.trim().to_string();

    if key.is_empty() {
        return Err("No API key provided".to_string());
    }

    if !Config::validate_api_key_format(&key) {
        println!();
        println!("  Warning: Key doesn't look like a Google AI key (should start with AIza)");
        println!("     Saving anyway...");
    }

    let config = Config::load();
    config.set_api_key(&key)?;

    println!();
    println!("  + API key saved. Settings live in {}", Config::config_location());
    println!();

    Ok(key)
}

fn preserve_corrupt_config(path: &Path, content: &str) {
    let corrupt_path = path.with_extension("json.corrupt");
    if fs::rename(path, &corrupt_path).is_err() {
        let _ = fs::write(&corrupt_path, content);
    }
}

#[cfg(unix)]
fn write_config_atomic(path: &Path, content: &str) -> Result<(), String> {
    use std::fs::OpenOptions;
    use std::os::unix::fs::PermissionsExt;

    let tmp_path = path.with_extension("tmp");
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp_path)
        .map_err(|e| e.to_string())?;

    if let Err(e) = file.set_permissions(fs::Permissions::from_mode(0o600)) {
        warn!("Failed to set temp config file permissions: {}", e);
    }

    file.write_all(content.as_bytes())
        .map_err(|e| e.to_string())?;

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err.to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE);
        assert_eq!(config.request_timeout_secs, 90);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"model": "gemini-2.5-pro"}"#).unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            model: "gemini-2.5-pro".to_string(),
            request_timeout_secs: 30,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.model, "gemini-2.5-pro");
        assert_eq!(loaded.request_timeout_secs, 30);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_corrupt_config_is_preserved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.model, DEFAULT_MODEL);
        assert!(!path.exists());
        let backup = fs::read_to_string(path.with_extension("json.corrupt")).unwrap();
        assert_eq!(backup, "{ not json");
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.json"));
        assert_eq!(loaded.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_config_file_never_holds_api_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"gemini_api_key": "AIzaSyD-0123456789abcdefghijklmnop", "model": "gemini-2.5-pro"}"#,
        )
        .unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.model, "gemini-2.5-pro");
        assert!(!path.with_extension("json.corrupt").exists());

        loaded.save_to(&path).unwrap();
        let saved = fs::read_to_string(&path).unwrap();
        assert!(!saved.contains("gemini_api_key"));
        assert!(!saved.contains("AIza"));
    }

    #[test]
    fn test_validate_api_key_format() {
        assert!(Config::validate_api_key_format(
            "AIzaSyD-0123456789abcdefghijklmnop"
        ));
        assert!(!Config::validate_api_key_format("sk-or-123"));
    }
}

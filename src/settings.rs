//! User settings
//!
//! Recognized keys use the camelCase names of the browser storage record so
//! the same file can be shared. Missing keys and blank strings take defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_VAULT_NAME: &str = "SessionVault";
pub const DEFAULT_FOLDER_PATH: &str = "SessionVault-logs";
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "gemma3:1b";
pub const DEFAULT_VAULT_ENDPOINT: &str = "http://127.0.0.1:27123";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub vault_name: String,
    /// Folder inside the vault that receives notes
    pub folder_path: String,
    pub ollama_endpoint: String,
    pub ollama_model: String,
    pub obsidian_api_key: String,
    pub include_summary: bool,
    pub include_mermaid: bool,
    pub show_preview: bool,
    /// Base address of the vault REST API
    pub vault_endpoint: String,
    /// Upper bound for each HTTP call. Unset leaves it to the connection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_name: DEFAULT_VAULT_NAME.to_string(),
            folder_path: DEFAULT_FOLDER_PATH.to_string(),
            ollama_endpoint: DEFAULT_OLLAMA_ENDPOINT.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            obsidian_api_key: String::new(),
            include_summary: true,
            include_mermaid: false,
            show_preview: true,
            vault_endpoint: DEFAULT_VAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(raw)?;
        Ok(settings.normalized())
    }

    /// Write settings as TOML
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Replace blank text fields with their defaults
    pub fn normalized(mut self) -> Self {
        let defaults = Settings::default();
        fill_blank(&mut self.vault_name, defaults.vault_name);
        fill_blank(&mut self.folder_path, defaults.folder_path);
        fill_blank(&mut self.ollama_endpoint, defaults.ollama_endpoint);
        fill_blank(&mut self.ollama_model, defaults.ollama_model);
        fill_blank(&mut self.vault_endpoint, defaults.vault_endpoint);
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn fill_blank(field: &mut String, default: String) {
    if field.trim().is_empty() {
        *field = default;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            folderPath = "AI/Chats"
            includeMermaid = true
            ollamaModel = ""
            "#,
        )
        .unwrap();

        assert_eq!(settings.folder_path, "AI/Chats");
        assert!(settings.include_mermaid);
        assert!(settings.include_summary);
        assert_eq!(settings.ollama_model, DEFAULT_OLLAMA_MODEL);
        assert_eq!(settings.vault_endpoint, DEFAULT_VAULT_ENDPOINT);
        assert_eq!(settings.request_timeout(), None);
    }

    #[test]
    fn test_storage_json_shape() {
        let settings: Settings = serde_json::from_str(
            r#"{"vaultName":"notes","obsidianApiKey":"secret","showPreview":false,"requestTimeoutSecs":30}"#,
        )
        .unwrap();

        assert_eq!(settings.vault_name, "notes");
        assert_eq!(settings.obsidian_api_key, "secret");
        assert!(!settings.show_preview);
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Settings::from_toml("includeSummary = \"yes\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let settings = Settings {
            folder_path: "Logs".to_string(),
            include_mermaid: true,
            ..Settings::default()
        };
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
        assert!(matches!(
            Settings::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}

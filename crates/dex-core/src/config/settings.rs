//! Application configuration loaded from a TOML file.
//!
//! The default configuration matches the values shown in `config/default.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{read_error, CoreError, CoreResult};
use crate::nav::favorites::FAVORITES_FILE;

/// Top-level application configuration.
///
/// All fields have sensible defaults so dex works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Number of entries requested from the collection listing.
    #[serde(default = "default_catalog_size")]
    pub catalog_size: usize,
    /// Language code for localized names and texts.
    #[serde(default = "default_language")]
    pub language: String,
    /// Entries resolved per background batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            catalog_size: default_catalog_size(),
            language: default_language(),
            batch_size: default_batch_size(),
        }
    }
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Sizes cycled through by the page-size action.
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    /// Show the primary name next to the localized one.
    #[serde(default = "default_true")]
    pub show_primary_name: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            show_primary_name: true,
        }
    }
}

impl UiConfig {
    /// The option after `current`, wrapping around. Falls back to the first
    /// option when `current` is not one of them.
    pub fn next_page_size(&self, current: usize) -> usize {
        let options = &self.page_size_options;
        match options.iter().position(|s| *s == current) {
            Some(pos) => options[(pos + 1) % options.len()],
            None => options.first().copied().unwrap_or(current),
        }
    }
}

/// Local persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Favorites file; relative paths resolve against the config directory.
    #[serde(default)]
    pub favorites_file: Option<PathBuf>,
}

impl StorageConfig {
    pub fn favorites_path(&self, config_dir: &Path) -> PathBuf {
        match &self.favorites_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => config_dir.join(path),
            None => config_dir.join(FAVORITES_FILE),
        }
    }
}

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}

fn default_catalog_size() -> usize {
    1025
}

fn default_language() -> String {
    "ja".to_string()
}

fn default_batch_size() -> usize {
    100
}

fn default_page_size() -> usize {
    20
}

fn default_page_size_options() -> Vec<usize> {
    vec![20, 50, 100]
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_api() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.api.catalog_size, 1025);
        assert_eq!(config.api.language, "ja");
        assert_eq!(config.api.batch_size, 100);
    }

    #[test]
    fn default_config_ui() {
        let config = Config::default();

        assert_eq!(config.ui.page_size, 20);
        assert_eq!(config.ui.page_size_options, vec![20, 50, 100]);
        assert!(config.ui.show_primary_name);
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("default.toml");
        fs::write(
            &path,
            r#"
[api]
base_url = "http://localhost:8000/api/v2"
catalog_size = 151
language = "en"
batch_size = 25

[ui]
page_size = 50
page_size_options = [10, 50]
show_primary_name = false

[storage]
favorites_file = "/var/lib/dex/favs.json"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8000/api/v2");
        assert_eq!(config.api.catalog_size, 151);
        assert_eq!(config.api.language, "en");
        assert_eq!(config.api.batch_size, 25);

        assert_eq!(config.ui.page_size, 50);
        assert_eq!(config.ui.page_size_options, vec![10, 50]);
        assert!(!config.ui.show_primary_name);

        assert_eq!(
            config.storage.favorites_path(tmp.path()),
            PathBuf::from("/var/lib/dex/favs.json")
        );
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("default.toml");
        fs::write(&path, "[api]\nlanguage = \"en\"\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.api.language, "en");
        assert_eq!(config.api.catalog_size, 1025);
        assert_eq!(config.ui.page_size, 20);
        assert!(config.storage.favorites_file.is_none());
    }

    #[test]
    fn load_empty_toml_uses_all_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("default.toml");
        fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, Config::default().api.base_url);
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("default.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }

    #[test]
    fn favorites_path_resolution() {
        let dir = Path::new("/home/u/.config/dex");
        let mut storage = StorageConfig::default();
        assert_eq!(storage.favorites_path(dir), dir.join("favorites.json"));

        storage.favorites_file = Some(PathBuf::from("mine.json"));
        assert_eq!(storage.favorites_path(dir), dir.join("mine.json"));
    }

    #[test]
    fn next_page_size_cycles() {
        let ui = UiConfig::default();
        assert_eq!(ui.next_page_size(20), 50);
        assert_eq!(ui.next_page_size(50), 100);
        assert_eq!(ui.next_page_size(100), 20);
        assert_eq!(ui.next_page_size(33), 20);

        let empty = UiConfig {
            page_size_options: Vec::new(),
            ..UiConfig::default()
        };
        assert_eq!(empty.next_page_size(33), 33);
    }

    #[test]
    fn shipped_default_toml_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        let config = Config::load(&path).unwrap();
        let defaults = Config::default();
        assert_eq!(config.api.base_url, defaults.api.base_url);
        assert_eq!(config.api.catalog_size, defaults.api.catalog_size);
        assert_eq!(config.ui.page_size_options, defaults.ui.page_size_options);
        assert_eq!(config.storage.favorites_file, None);
    }
}

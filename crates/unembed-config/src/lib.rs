use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use unembed_engine::{DEFAULT_IMAGE_EXTENSIONS, ExtensionSet, Rewriter};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Quiet period after the last edit before a rewrite pass runs.
pub const DEFAULT_SCAN_DELAY_MS: u64 = 500;

/// User settings. Fields missing from the file keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scan_delay_ms: u64,
    /// Comma-separated extensions whose embeds are left alone.
    pub image_extensions: String,
    /// Fill empty alt text of demoted inline embeds with the file name.
    pub auto_fill_alt_text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_delay_ms: DEFAULT_SCAN_DELAY_MS,
            image_extensions: DEFAULT_IMAGE_EXTENSIONS.to_string(),
            auto_fill_alt_text: true,
            vault_path: None,
        }
    }
}

impl Settings {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the vault path
        settings.vault_path = settings
            .vault_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(settings))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads settings from `config_path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        Ok(Self::load_from_path(config_path)?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = self.to_toml()?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/unembed");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Sets the scan delay from user input.
    ///
    /// Only non-negative integers are accepted; anything else leaves the
    /// current value in place and returns false.
    pub fn set_scan_delay_ms(&mut self, value: &str) -> bool {
        match value.trim().parse::<u64>() {
            Ok(delay) => {
                self.scan_delay_ms = delay;
                true
            }
            Err(_) => false,
        }
    }

    /// Builds the image extension set. Call again whenever
    /// `image_extensions` changes.
    pub fn extension_set(&self) -> ExtensionSet {
        ExtensionSet::parse(&self.image_extensions)
    }

    pub fn rewriter(&self) -> Rewriter {
        Rewriter::new(self.extension_set(), self.auto_fill_alt_text)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Settings::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/unembed/config.toml"));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.scan_delay_ms, 500);
        assert_eq!(settings.image_extensions, "png,jpg,jpeg,gif,bmp,svg,webp,ico");
        assert!(settings.auto_fill_alt_text);
        assert_eq!(settings.vault_path, None);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let settings: Settings = toml::from_str("auto_fill_alt_text = false\n").unwrap();
        assert!(!settings.auto_fill_alt_text);
        assert_eq!(settings.scan_delay_ms, DEFAULT_SCAN_DELAY_MS);
        assert_eq!(settings.image_extensions, DEFAULT_IMAGE_EXTENSIONS);
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let original = Settings {
            scan_delay_ms: 250,
            image_extensions: "png,avif".to_string(),
            auto_fill_alt_text: false,
            vault_path: Some(PathBuf::from("/tmp/vault")),
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Settings = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_negative_scan_delay_is_rejected_by_parser() {
        let result: Result<Settings, _> = toml::from_str("scan_delay_ms = -1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_set_scan_delay_ms() {
        let mut settings = Settings::default();
        assert!(settings.set_scan_delay_ms(" 750 "));
        assert_eq!(settings.scan_delay_ms, 750);
        assert!(settings.set_scan_delay_ms("0"));
        assert_eq!(settings.scan_delay_ms, 0);

        for bad in ["-5", "abc", "", "1.5"] {
            assert!(!settings.set_scan_delay_ms(bad), "accepted {bad:?}");
            assert_eq!(settings.scan_delay_ms, 0);
        }
    }

    #[test]
    fn test_extension_set_follows_settings() {
        let mut settings = Settings::default();
        assert!(settings.extension_set().contains("webp"));

        settings.image_extensions = "PDF, tiff".to_string();
        let set = settings.extension_set();
        assert!(set.contains("pdf"));
        assert!(set.contains("TIFF"));
        assert!(!set.contains("png"));
    }

    #[test]
    fn test_rewriter_uses_settings() {
        let settings = Settings {
            auto_fill_alt_text: false,
            ..Settings::default()
        };
        let rewriter = settings.rewriter();
        assert!(!rewriter.auto_fill_alt_text());
        assert_eq!(rewriter.image_extensions(), &ExtensionSet::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nonexistent.toml");

        assert!(Settings::load_from_path(&missing).unwrap().is_none());
        assert_eq!(Settings::load_or_default(&missing).unwrap(), Settings::default());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "scan_delay_ms = \"soon\"").unwrap();

        let err = Settings::load_from_path(&config_file).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let settings = Settings {
            scan_delay_ms: 100,
            ..Settings::default()
        };

        settings.save_to_path(&config_file).unwrap();
        let loaded = Settings::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_vault_path_with_env_var() {
        unsafe {
            env::set_var("UNEMBED_TEST_VAULT", "/custom/vault");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "vault_path = \"$UNEMBED_TEST_VAULT/notes\"\n").unwrap();

        let loaded = Settings::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(loaded.vault_path, Some(PathBuf::from("/custom/vault/notes")));

        unsafe {
            env::remove_var("UNEMBED_TEST_VAULT");
        }
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Settings::expand_path(Path::new("~/vault")).unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("vault"));
    }
}

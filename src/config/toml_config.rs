use crate::app::commands::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_log_level, validate_path, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub catalog: CatalogSection,
    pub logging: Option<LoggingSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    pub path: Option<String>,
    pub seed_defaults: bool,
    pub autosave: bool,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            path: None,
            seed_defaults: false,
            autosave: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub format: Option<OutputFormat>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CatalogError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                CatalogError::IoError(e)
            }
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable.
    ///
    /// Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_path(&self) -> Option<&str> {
        self.catalog.path.as_deref()
    }

    fn seed_defaults(&self) -> bool {
        self.catalog.seed_defaults
    }

    fn autosave(&self) -> bool {
        self.catalog.autosave
    }

    fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = self.catalog_path() {
            validate_path("catalog.path", path)?;
        }
        if let Some(level) = self.log_level() {
            validate_log_level("logging.level", level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[catalog]
path = "books.csv"
seed_defaults = true
autosave = false

[logging]
level = "debug"

[output]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.catalog_path(), Some("books.csv"));
        assert!(config.seed_defaults());
        assert!(!config.autosave());
        assert_eq!(config.log_level(), Some("debug"));
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.catalog_path(), None);
        assert!(!config.seed_defaults());
        assert!(config.autosave());
        assert_eq!(config.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BOOK_CATALOG_TEST_PATH", "/tmp/library.csv");

        let toml_content = r#"
[catalog]
path = "${BOOK_CATALOG_TEST_PATH}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.catalog_path(), Some("/tmp/library.csv"));

        std::env::remove_var("BOOK_CATALOG_TEST_PATH");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[logging]
level = "chatty"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[catalog\npath = 1").unwrap_err();
        assert!(matches!(err, CatalogError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[catalog]\npath = \"from-file.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.catalog_path(), Some("from-file.csv"));
    }
}

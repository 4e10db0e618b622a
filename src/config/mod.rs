#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::app::commands::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_log_level, validate_path, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::{CliCommand, CliConfig};

/// Effective settings after layering command-line flags over the file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub catalog_path: Option<String>,
    pub seed_defaults: bool,
    pub autosave: bool,
    pub log_level: Option<String>,
    pub output_format: OutputFormat,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            seed_defaults: false,
            autosave: true,
            log_level: None,
            output_format: OutputFormat::Text,
        }
    }
}

impl ResolvedConfig {
    pub fn from_file(file: &TomlConfig) -> Self {
        Self {
            catalog_path: file.catalog_path().map(str::to_string),
            seed_defaults: file.seed_defaults(),
            autosave: file.autosave(),
            log_level: file.log_level().map(str::to_string),
            output_format: file.output_format(),
        }
    }
}

impl ConfigProvider for ResolvedConfig {
    fn catalog_path(&self) -> Option<&str> {
        self.catalog_path.as_deref()
    }

    fn seed_defaults(&self) -> bool {
        self.seed_defaults
    }

    fn autosave(&self) -> bool {
        self.autosave
    }

    fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}

impl Validate for ResolvedConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.catalog_path {
            validate_path("catalog", path)?;
        }
        if let Some(level) = &self.log_level {
            validate_log_level("log_level", level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_copies_every_setting() {
        let file = TomlConfig::from_toml_str(
            "[catalog]\npath = \"books.csv\"\nseed_defaults = true\n[output]\nformat = \"json\"\n",
        )
        .unwrap();

        let resolved = ResolvedConfig::from_file(&file);
        assert_eq!(resolved.catalog_path.as_deref(), Some("books.csv"));
        assert!(resolved.seed_defaults);
        assert!(resolved.autosave);
        assert_eq!(resolved.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_validate_rejects_empty_catalog_path() {
        let resolved = ResolvedConfig {
            catalog_path: Some(String::new()),
            ..ResolvedConfig::default()
        };
        assert!(resolved.validate().is_err());
    }
}

use crate::app::commands::{Action, OutputFormat};
use crate::config::toml_config::TomlConfig;
use crate::config::ResolvedConfig;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "book-catalog")]
#[command(about = "Keep a catalog of books and their reader ratings")]
pub struct CliConfig {
    /// Catalog file to load at start and save after changes
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Start from the built-in sample books when no catalog file exists
    #[arg(long, global = true)]
    pub seed: bool,

    /// Do not write the catalog file back after changes
    #[arg(long, global = true)]
    pub no_autosave: bool,

    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Show every book
    List,
    /// Show one book by title
    Find { title: String },
    /// Add a new book
    Add {
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, allow_negative_numbers = true)]
        year: i32,
        /// Initial ratings, comma separated
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        ratings: Vec<i64>,
    },
    /// Remove a book
    Remove { title: String },
    /// Add one rating (1-5) to a book
    Rate {
        title: String,
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Books published after the given year
    AfterYear { year: i32 },
    /// Books whose average rating is above the threshold
    AboveRating { min_rating: f64 },
    /// Write the catalog to a file
    Export { destination: String },
    /// Add the books listed in a file
    Import { source: String },
}

impl From<CliCommand> for Action {
    fn from(command: CliCommand) -> Self {
        match command {
            CliCommand::List => Action::List,
            CliCommand::Find { title } => Action::Find { title },
            CliCommand::Add {
                title,
                author,
                year,
                ratings,
            } => Action::Add {
                title,
                author,
                year,
                ratings,
            },
            CliCommand::Remove { title } => Action::Remove { title },
            CliCommand::Rate { title, value } => Action::Rate { title, value },
            CliCommand::AfterYear { year } => Action::AfterYear { year },
            CliCommand::AboveRating { min_rating } => Action::AboveRating { min_rating },
            CliCommand::Export { destination } => Action::Export { destination },
            CliCommand::Import { source } => Action::Import { source },
        }
    }
}

impl CliConfig {
    /// Layers the flags over `file`; a flag that was given always wins.
    pub fn resolve(&self, file: Option<&TomlConfig>) -> ResolvedConfig {
        let mut resolved = file.map(ResolvedConfig::from_file).unwrap_or_default();

        if let Some(path) = &self.catalog {
            resolved.catalog_path = Some(path.clone());
        }
        if self.seed {
            resolved.seed_defaults = true;
        }
        if self.no_autosave {
            resolved.autosave = false;
        }
        if let Some(format) = self.format {
            resolved.output_format = format;
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_command() {
        let cli = CliConfig::try_parse_from([
            "book-catalog",
            "--catalog",
            "books.csv",
            "add",
            "Dune",
            "--author",
            "F. Herbert",
            "--year",
            "1965",
            "--ratings",
            "5,4",
        ])
        .unwrap();

        assert_eq!(cli.catalog.as_deref(), Some("books.csv"));
        assert_eq!(
            Action::from(cli.command),
            Action::Add {
                title: "Dune".to_string(),
                author: "F. Herbert".to_string(),
                year: 1965,
                ratings: vec![5, 4],
            }
        );
    }

    #[test]
    fn test_flags_override_file_settings() {
        let file = TomlConfig::from_toml_str(
            "[catalog]\npath = \"from-file.csv\"\nautosave = true\n[logging]\nlevel = \"warn\"\n",
        )
        .unwrap();
        let cli = CliConfig::try_parse_from([
            "book-catalog",
            "list",
            "--catalog",
            "override.csv",
            "--no-autosave",
            "--format",
            "json",
        ])
        .unwrap();

        let resolved = cli.resolve(Some(&file));
        assert_eq!(resolved.catalog_path.as_deref(), Some("override.csv"));
        assert!(!resolved.autosave);
        assert_eq!(resolved.log_level.as_deref(), Some("warn"));
        assert_eq!(resolved.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_resolve_without_file_uses_defaults() {
        let cli = CliConfig::try_parse_from(["book-catalog", "rate", "Dune", "4"]).unwrap();
        let resolved = cli.resolve(None);
        assert_eq!(resolved, ResolvedConfig::default());
    }
}

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliCommand, CliConfig};

pub use app::commands::{render, run_action, Action, Outcome, OutputFormat};
pub use app::session::CatalogSession;
pub use config::{toml_config::TomlConfig, ResolvedConfig};
pub use core::catalog::{Books, Catalog};
pub use domain::model::{BookRecord, BookView, ImportSummary, SkipReason, SkippedRow};
pub use domain::ports::ConfigProvider;
pub use utils::error::{CatalogError, Result};

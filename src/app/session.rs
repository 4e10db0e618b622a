use crate::app::commands::{run_action, Action, Outcome};
use crate::core::catalog::Catalog;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CatalogError, Result};

/// A catalog bound to an optional backing file.
///
/// The file is read once when the session opens and written back after
/// every successful mutating action while autosave is on.
pub struct CatalogSession<C: ConfigProvider> {
    config: C,
    catalog: Catalog,
}

impl<C: ConfigProvider> CatalogSession<C> {
    pub fn open(config: C) -> Result<Self> {
        let catalog = match config.catalog_path() {
            Some(path) => {
                let mut catalog = Catalog::new();
                match catalog.import(path) {
                    Ok(summary) => {
                        tracing::debug!(
                            "Loaded {} books from {} ({} rejected rows)",
                            summary.added,
                            path,
                            summary.rejected().count()
                        );
                        catalog
                    }
                    Err(CatalogError::FileNotFound { .. }) => {
                        tracing::info!("Catalog file {} does not exist yet", path);
                        Self::fresh(&config)
                    }
                    Err(e) => return Err(e),
                }
            }
            None => Self::fresh(&config),
        };

        Ok(Self { config, catalog })
    }

    fn fresh(config: &C) -> Catalog {
        if config.seed_defaults() {
            Catalog::seeded()
        } else {
            Catalog::new()
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn execute(&mut self, action: Action) -> Result<Outcome> {
        let mutates = action.mutates();
        let outcome = run_action(&mut self.catalog, action)?;

        if mutates && self.config.autosave() {
            if let Some(path) = self.config.catalog_path() {
                self.catalog.export(path)?;
            }
        }

        Ok(outcome)
    }
}

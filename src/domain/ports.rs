use crate::domain::model::OutputFormat;

/// Settings the command runner needs, whatever their source.
pub trait ConfigProvider {
    fn catalog_path(&self) -> Option<&str>;
    fn seed_defaults(&self) -> bool;
    fn autosave(&self) -> bool;
    fn log_level(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Rating must be between 1 and 5, got {value}")]
    InvalidRating { value: i64 },

    #[error("A book titled '{title}' already exists")]
    DuplicateTitle { title: String },

    #[error("No book titled '{title}' was found")]
    NotFound { title: String },

    #[error("File '{path}' not found")]
    FileNotFound { path: String },

    #[error("Export to '{path}' failed: {source}")]
    ExportError {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Import from '{path}' failed: {source}")]
    ImportError {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// Short message suitable for printing straight to the terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidRating { value } => {
                format!("Rating {} is out of range (allowed: 1-5)", value)
            }
            Self::DuplicateTitle { title } => format!("'{}' is already in the catalog", title),
            Self::NotFound { title } => format!("'{}' is not in the catalog", title),
            Self::FileNotFound { path } => format!("File '{}' does not exist", path),
            Self::ExportError { path, .. } => format!("Could not write catalog to '{}'", path),
            Self::ImportError { path, .. } => format!("Could not read catalog from '{}'", path),
            Self::IoError(e) => format!("File system error: {}", e),
            Self::SerializationError(e) => format!("Could not render output: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidInput { field, reason, .. } => format!("{}: {}", field, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidRating { .. } => "Use a whole number from 1 to 5",
            Self::DuplicateTitle { .. } => "Pick another title or remove the existing book first",
            Self::NotFound { .. } => "Run `list` to see the titles in the catalog",
            Self::FileNotFound { .. } => "Check the path and try again",
            Self::ExportError { .. } | Self::IoError(_) => {
                "Check that the destination directory exists and is writable"
            }
            Self::ImportError { .. } => "Check that the file is readable UTF-8 text",
            Self::SerializationError(_) => "Try the text output format instead",
            Self::ConfigError { .. } => "Fix the configuration file and run again",
            Self::InvalidInput { .. } => "Correct the argument and run again",
        }
    }

    /// Process exit code for the command line.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidRating { .. }
            | Self::DuplicateTitle { .. }
            | Self::NotFound { .. }
            | Self::InvalidInput { .. } => 2,
            Self::ConfigError { .. } => 3,
            _ => 1,
        }
    }
}

use super::config::ConfigError;
use crate::core::energy::catalog::CatalogLoadError;
use crate::core::io::cif::CifError;
use crate::core::io::document::TableError;
use thiserror::Error;

/// Failures that abort a session before any check runs.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CIF error for '{path}': {source}")]
    Cif { path: String, source: CifError },

    #[error("Missing block '{block}' in '{path}'")]
    MissingBlock { path: String, block: String },

    #[error("Malformed component file '{path}': {reason}")]
    MalformedComponent { path: String, reason: String },

    #[error("Table error in block '{block}' of '{path}': {source}")]
    Table {
        path: String,
        block: String,
        source: TableError,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to load the dictionary: {0}")]
    Load(#[from] LoadError),

    #[error("Invalid session configuration: {0}")]
    Config(#[from] ConfigError),
}

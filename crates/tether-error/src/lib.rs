pub mod association;
pub mod invalid;
pub mod policy;
pub mod result_ext;
pub mod severity;

// public exports
pub use association::AssociationError;
pub use invalid::InvalidInputError;
pub use policy::{ErrorPolicy, NoopPolicy};
#[cfg(feature = "tracing")]
pub use policy::TracingPolicy;
pub use result_ext::ResultExt;
pub use severity::Severity;

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    #[error(transparent)]
    Association(#[from] AssociationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O failure on {path:?}: {operation}: {source}")]
    FileOperation {
        operation: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Default classification used by the policies in [`policy`].
    ///
    /// Association problems are scoped to a single alias, so they rank below
    /// invalid input even when they abort the call.
    pub fn severity(&self) -> Severity {
        match self {
            Error::Association(_) => Severity::Warning,
            Error::InvalidInput(_) | Error::Serialization(_) => Severity::Error,
            Error::Config(_) | Error::FileOperation { .. } => Severity::Fatal,
        }
    }
}

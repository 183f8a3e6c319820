use crate::node_process::NodeJsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InertiaError {
    #[error("{0}")]
    SerializationError(String),
    #[error("{0}")]
    HeaderError(String),
    #[error("{0}")]
    SsrError(String),
    /// The asset version resolver failed.
    #[error("{0}")]
    VersionError(String),
    /// A prop producer (callback or lazy prop) failed.
    #[error("{0}")]
    PropError(String),
    #[error("{0}")]
    ConfigError(String),
    #[error("{0}")]
    NodeJsError(#[from] NodeJsError),
}

impl InertiaError {
    pub fn get_cause(&self) -> String {
        match self {
            Self::NodeJsError(err) => err.get_cause(),
            other => other.to_string(),
        }
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AntlrError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("HTTP Request Error: {0}")]
    Http(#[from] Arc<reqwest::Error>),

    #[error("TOML Parsing Error: {0}")]
    Toml(#[from] Arc<toml::de::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    /// The destination of a strict download is already occupied.
    #[error("File already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("DownloadError: Failed to download '{0}' from '{1}': {2}")]
    DownloadError(String, String, String),

    #[error("HttpError: {0}")]
    HttpError(String),

    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("IoError: {0}")]
    IoError(String),

    #[error("Build Configuration Error: {0}")]
    BuildConfig(String),

    #[error("Parsing Error in {0}: {1}")]
    ParseError(&'static str, String),

    #[error("Failed to execute command: {0}")]
    CommandExecError(String),
}

impl AntlrError {
    /// Failures while contacting or reading from the remote source.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::HttpError(_) | Self::DownloadError(..) | Self::ValidationError(_)
        )
    }

    /// Directory creation or file write failures.
    pub fn is_filesystem(&self) -> bool {
        matches!(self, Self::Io(_) | Self::IoError(_))
    }
}

impl From<std::io::Error> for AntlrError {
    fn from(err: std::io::Error) -> Self {
        AntlrError::Io(Arc::new(err))
    }
}

impl From<reqwest::Error> for AntlrError {
    fn from(err: reqwest::Error) -> Self {
        AntlrError::Http(Arc::new(err))
    }
}

impl From<toml::de::Error> for AntlrError {
    fn from(err: toml::de::Error) -> Self {
        AntlrError::Toml(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, AntlrError>;

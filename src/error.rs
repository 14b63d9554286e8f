use thiserror::Error;

/// Main error type for the tablemine library
#[derive(Error, Debug)]
pub enum MineError {
    #[error("table shape violation: {message}")]
    InvalidShape { message: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("file I/O error: {path}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("delimited export failed: {context}")]
    Export {
        context: String,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    General(#[from] anyhow::Error),
}

impl MineError {
    /// Create a shape violation error
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidShape {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file I/O error
    pub fn file_io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Create an export error
    pub fn export(context: impl Into<String>, source: csv::Error) -> Self {
        Self::Export {
            context: context.into(),
            source,
        }
    }
}

/// Result type alias for convenience
pub type MineResult<T> = Result<T, MineError>;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of the generate -> fit -> evaluate pipeline.
///
/// Every failure is local and synchronous: callers either get a complete
/// result or one of these, never a partial dataset or model.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("numerical error: {message}")]
    Numerical { message: String },
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn numerical(message: impl Into<String>) -> Self {
        Self::Numerical {
            message: message.into(),
        }
    }
}

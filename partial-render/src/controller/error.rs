//! Errors that can be returned by a controller.
//!
//! Conversions exist from view, HTTP and I/O errors, so `?` works inside
//! controllers. Anything else can be wrapped with [`Error::new`].
use thiserror::Error;

/// A controller error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("view error: {0}")]
    ViewError(#[from] crate::view::Error),

    #[error("http error: {0}")]
    HttpError(#[from] crate::http::Error),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    Error(#[from] Box<dyn std::error::Error + Sync + Send>),
}

impl Error {
    /// Create new error from any error implementing the standard [`std::error::Error`] trait.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::Error(Box::new(err))
    }
}

//! Global error type.
//!
//! Each module has its own error. This one wraps them so binaries can use `?`
//! all the way from `main`.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] crate::config::Error),

    #[error("http error: {0}")]
    Http(#[from] crate::http::Error),

    #[error("view error: {0}")]
    View(#[from] crate::view::Error),

    #[error("{0}")]
    Controller(#[from] crate::controller::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

//! Controllers, the **C** in MVC.
//!
//! A controller turns a request into a response. Errors returned from
//! [`Controller::handle`] are logged by the server and answered with a
//! `500 - Internal Server Error`.
//!
//! ```
//! use partial_render::prelude::*;
//!
//! struct Index;
//!
//! #[async_trait]
//! impl Controller for Index {
//!     async fn handle(&self, _request: &Request) -> Result<Response, Error> {
//!         Ok(Response::new().html("<div>Index</div>"))
//!     }
//! }
//! ```
use async_trait::async_trait;

pub mod error;

pub use error::Error;

use crate::http::{Handler, Request, Response};

/// The HTTP controller.
///
/// Handles all requests which match the path it's assigned to.
#[async_trait]
pub trait Controller: Sync + Send {
    /// Handle the request.
    async fn handle(&self, request: &Request) -> Result<Response, Error>;

    /// Serve this controller on `path`.
    fn route(self, path: &str) -> Handler
    where
        Self: Sized + 'static,
    {
        Handler::new(path, self)
    }

    /// The name of this controller. Used for logging.
    fn controller_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

//! Render views to a string, or straight into a writer, without going through
//! the usual request/response pipeline.
//!
//! The crate is split the classic MVC way. [`view`] holds the renderer and the
//! view engine it drives, [`controller`] the request entry points, and [`http`]
//! a small Tokio HTTP/1.1 server that maps paths to controllers.
//!
//! # Rendering a view
//!
//! ```
//! use std::sync::Arc;
//! use partial_render::view::{RenderMode, ViewRenderer, Views};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), partial_render::view::Error> {
//! let mut views = Views::in_memory();
//! views.add_view("Test.html", "<div>Test</div>")?;
//!
//! let renderer = ViewRenderer::with_engine(Arc::new(views));
//! let html = renderer
//!     .render_to_string("Test", None::<&()>, RenderMode::Partial)
//!     .await?;
//!
//! assert_eq!(html, "<div>Test</div>");
//! # Ok(())
//! # }
//! ```
//!
//! # Serving it
//!
//! ```rust,ignore
//! use partial_render::http::Server;
//! use partial_render::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), partial_render::Error> {
//!     Logger::init();
//!
//!     Server::new(vec![HomeController::new(renderer).route("/")])
//!         .launch("0.0.0.0:8000")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
pub mod colors;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod logging;
pub mod prelude;
pub mod view;

/// Wrapper around async traits to make them easy to use.
pub use async_trait::async_trait;
/// Serde is used for (de)serialization of view models.
pub use serde;
/// Tokio is an asynchronous runtime for Rust.
pub use tokio;

pub use error::Error;

/// Remove unsafe characters from a string printed
/// inside an HTML page.
pub fn safe_html(string: &str) -> String {
    string
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

//! Views, the **V** in MVC.
//!
//! Views are rendered by a [`ViewEngine`]. The default engine, [`Views`], uses
//! MiniJinja templates stored on disk or registered in memory. The
//! [`ViewRenderer`] drives the engine outside of the request pipeline, so a view
//! can be rendered from anywhere: a controller, a background job, a test.
//!
//! # Example
//!
//! ```
//! # use std::sync::Arc;
//! # use partial_render::view::*;
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Error> {
//! let mut views = Views::in_memory();
//! views
//!     .add_view("_ViewStart.html", r#"{% set layout = "_Layout" %}"#)?
//!     .add_view("shared/_Layout.html", "<body>{{ body }}</body>")?
//!     .add_view("Test.html", "<div>Test</div>")?;
//!
//! let renderer = ViewRenderer::with_engine(Arc::new(views));
//!
//! let full = renderer.render_to_string("Test", None::<&()>, RenderMode::Full).await?;
//! let partial = renderer.render_to_string("Test", None::<&()>, RenderMode::Partial).await?;
//!
//! assert_eq!(full, "<body><div>Test</div></body>");
//! assert_eq!(partial, "<div>Test</div>");
//! # Ok(())
//! # }
//! ```
pub mod context;
pub mod engine;
pub mod error;
pub mod renderer;
pub mod views;

pub use context::{
    HostContext, MemoryTempData, NoTempData, RenderContext, Services, TempData,
    TempDataProvider, ViewData,
};
pub use engine::{View, ViewEngine};
pub use error::Error;
pub use renderer::{ErrorPolicy, RenderMode, RenderOptions, Rendered, ViewRenderer};
pub use views::Views;

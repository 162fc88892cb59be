//! Render a view by name to a string or to a writer.
//!
//! [`ViewRenderer`] is the one place that drives a [`ViewEngine`] outside of
//! a request. Every call builds its own [`RenderContext`], finds the view,
//! executes it into a sink and throws the context away.
//!
//! All variations go through [`ViewRenderer::render`] and [`RenderOptions`]:
//!
//! ```
//! # use std::sync::Arc;
//! # use partial_render::view::*;
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Error> {
//! # let mut views = Views::in_memory();
//! # views.add_view("Test.html", "<div>Test</div>")?;
//! let renderer = ViewRenderer::with_engine(Arc::new(views));
//!
//! // Into a writer, without layouts.
//! let mut out = Vec::new();
//! renderer
//!     .render("Test", None::<&()>, RenderOptions::new().partial().sink(&mut out))
//!     .await?;
//! assert_eq!(out, b"<div>Test</div>");
//!
//! // Errors reported as a message instead.
//! let rendered = renderer
//!     .render("Missing", None::<&()>, RenderOptions::new().capture_errors())
//!     .await?;
//! assert!(rendered.error_message().is_some());
//! # Ok(())
//! # }
//! ```
use std::sync::Arc;

use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use super::{
    Error, HostContext, NoTempData, RenderContext, Services, TempDataProvider, ViewData,
    ViewEngine,
};

/// Full renders run the view start and layouts. Partial renders are just the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Full,
    Partial,
}

impl RenderMode {
    pub fn main_page(&self) -> bool {
        *self == RenderMode::Full
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Full => write!(f, "full"),
            RenderMode::Partial => write!(f, "partial"),
        }
    }
}

/// What to do when finding or executing the view fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Return the error.
    #[default]
    Propagate,
    /// Return [`Rendered::Failed`] with the root cause message.
    CaptureMessage,
}

/// How to render.
#[derive(Default)]
pub struct RenderOptions<'a> {
    sink: Option<&'a mut (dyn AsyncWrite + Unpin + Send)>,
    mode: RenderMode,
    errors: ErrorPolicy,
}

impl<'a> RenderOptions<'a> {
    /// Full render into a string, errors returned.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn partial(self) -> Self {
        self.mode(RenderMode::Partial)
    }

    pub fn full(self) -> Self {
        self.mode(RenderMode::Full)
    }

    /// Write into this instead of returning a string.
    pub fn sink(mut self, sink: &'a mut (dyn AsyncWrite + Unpin + Send)) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn capture_errors(mut self) -> Self {
        self.errors = ErrorPolicy::CaptureMessage;
        self
    }

    pub fn errors(mut self, errors: ErrorPolicy) -> Self {
        self.errors = errors;
        self
    }
}

impl std::fmt::Debug for RenderOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions")
            .field("sink", &self.sink.is_some())
            .field("mode", &self.mode)
            .field("errors", &self.errors)
            .finish()
    }
}

/// Result of a render.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// No sink was given; here's the output.
    Buffered(String),
    /// Output went to the sink.
    Streamed,
    /// Rendering failed and errors were captured.
    Failed(String),
}

impl Rendered {
    /// The output, if it was buffered.
    pub fn into_string(self) -> Option<String> {
        match self {
            Rendered::Buffered(output) => Some(output),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Rendered::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn failed(&self) -> bool {
        matches!(self, Rendered::Failed(_))
    }
}

/// Renders views through a view engine.
///
/// Cheap to clone. The engine, temp data provider and services are shared
/// and never change after construction.
#[derive(Clone)]
pub struct ViewRenderer {
    engine: Arc<dyn ViewEngine>,
    temp_data: Arc<dyn TempDataProvider>,
    services: Arc<Services>,
}

impl ViewRenderer {
    pub fn new(
        engine: Arc<dyn ViewEngine>,
        temp_data: Arc<dyn TempDataProvider>,
        services: Arc<Services>,
    ) -> Self {
        Self {
            engine,
            temp_data,
            services,
        }
    }

    /// Renderer with no temp data and no services.
    pub fn with_engine(engine: Arc<dyn ViewEngine>) -> Self {
        Self::new(engine, Arc::new(NoTempData), Arc::new(Services::new()))
    }

    /// Render a view.
    ///
    /// `model` is serialized and handed to the view. Without a sink in `options`,
    /// the output is returned as [`Rendered::Buffered`].
    pub async fn render<T: Serialize + ?Sized>(
        &self,
        name: &str,
        model: Option<&T>,
        options: RenderOptions<'_>,
    ) -> Result<Rendered, Error> {
        let RenderOptions { sink, mode, errors } = options;

        match self.render_internal(name, model, mode, sink).await {
            Ok(rendered) => Ok(rendered),
            Err(err) => match errors {
                ErrorPolicy::Propagate => Err(err),
                ErrorPolicy::CaptureMessage => {
                    let message = err.root_cause();
                    warn!("view \"{}\" failed to render: {}", name, message);
                    Ok(Rendered::Failed(message))
                }
            },
        }
    }

    /// Render a view and return the output.
    pub async fn render_to_string<T: Serialize + ?Sized>(
        &self,
        name: &str,
        model: Option<&T>,
        mode: RenderMode,
    ) -> Result<String, Error> {
        let rendered = self
            .render(name, model, RenderOptions::new().mode(mode))
            .await?;

        Ok(rendered.into_string().unwrap_or_default())
    }

    /// Render a view straight into a writer.
    pub async fn render_to_writer<T: Serialize + ?Sized>(
        &self,
        name: &str,
        model: Option<&T>,
        mode: RenderMode,
        sink: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<(), Error> {
        self.render(name, model, RenderOptions::new().mode(mode).sink(sink))
            .await?;

        Ok(())
    }

    /// Render a view to a string, never failing.
    ///
    /// Returns the output, or no output and the error message.
    pub async fn try_render_to_string<T: Serialize + ?Sized>(
        &self,
        name: &str,
        model: Option<&T>,
        mode: RenderMode,
    ) -> (Option<String>, Option<String>) {
        let options = RenderOptions::new().mode(mode).capture_errors();

        match self.render(name, model, options).await {
            Ok(Rendered::Failed(message)) => (None, Some(message)),
            Ok(rendered) => (rendered.into_string(), None),
            // Captured errors never come back as Err.
            Err(err) => (None, Some(err.root_cause())),
        }
    }

    async fn render_internal<T: Serialize + ?Sized>(
        &self,
        name: &str,
        model: Option<&T>,
        mode: RenderMode,
        sink: Option<&mut (dyn AsyncWrite + Unpin + Send)>,
    ) -> Result<Rendered, Error> {
        let host = HostContext::synthetic(self.services.clone());

        debug!(
            "rendering view \"{}\" ({}) with {} [{}]",
            name,
            mode,
            self.engine.engine_name(),
            host.trace_id()
        );

        let view = self.engine.find_view(&host, name, mode.main_page())?;
        let temp_data = self.temp_data.load(&host);
        let view_data = ViewData::new(model)?;

        match sink {
            Some(sink) => {
                let mut context = RenderContext::new(host, temp_data, view_data, &mut *sink);
                self.engine.render(&view, &mut context).await?;
                sink.flush().await?;

                Ok(Rendered::Streamed)
            }

            None => {
                let mut buffer = Vec::new();
                let mut context = RenderContext::new(host, temp_data, view_data, &mut buffer);
                self.engine.render(&view, &mut context).await?;

                Ok(Rendered::Buffered(String::from_utf8(buffer)?))
            }
        }
    }
}

impl std::fmt::Debug for ViewRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRenderer")
            .field("engine", &self.engine.engine_name())
            .field("services", &self.services)
            .finish_non_exhaustive()
    }
}

//! The view engine seam.
//!
//! The renderer doesn't know how views are written or compiled. It asks an
//! engine to find a view by name and then to execute it into the sink carried
//! by the [`RenderContext`].
use async_trait::async_trait;

use super::{Error, HostContext, RenderContext};

/// A view the engine found and knows how to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    name: String,
    path: String,
    main_page: bool,
}

impl View {
    pub fn new(name: impl ToString, path: impl ToString, main_page: bool) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            main_page,
        }
    }

    /// Name the view was requested by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the engine found it.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Was this found with a full lookup, i.e. should layouts apply?
    pub fn main_page(&self) -> bool {
        self.main_page
    }
}

#[async_trait]
pub trait ViewEngine: Send + Sync {
    /// Locate a view by name.
    ///
    /// `main_page` selects a full lookup, which runs the view start and wraps
    /// the output in a layout. Return [`Error::ViewNotFound`] if nothing matches.
    fn find_view(&self, host: &HostContext, name: &str, main_page: bool) -> Result<View, Error>;

    /// Execute the view, writing all output into the context's sink.
    async fn render(&self, view: &View, context: &mut RenderContext<'_>) -> Result<(), Error>;

    /// The name of this engine. Used for logging.
    fn engine_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

//! Types and traits used by almost every app.
//!
//! ```
//! use partial_render::prelude::*;
//! ```
pub use crate::config::Config;
pub use crate::controller::{Controller, Error};
pub use crate::http::{Method, Request, Response};
pub use crate::logging::Logger;
pub use crate::view::{RenderMode, RenderOptions, Rendered, ViewRenderer, Views};

/// A macro to easily implement async traits methods.
pub use async_trait::async_trait;

pub use serde::{Deserialize, Serialize};
pub use tokio;

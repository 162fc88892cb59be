//! A small HTTP/1.1 server that hands requests to controllers.
pub mod body;
pub mod error;
pub mod handler;
pub mod head;
pub mod headers;
pub mod request;
pub mod response;
pub mod router;
pub mod server;

pub use body::Body;
pub use error::Error;
pub use handler::Handler;
pub use head::{Head, Method, Version};
pub use headers::Headers;
pub use request::Request;
pub use response::{Response, Status};
pub use router::Router;
pub use server::Server;

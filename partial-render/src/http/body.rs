//! Response body.
//!
//! The `Content-Type` and `Content-Length` headers are derived from it.
use tokio::io::{AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// UTF-8 encoded HTML.
    Html(String),
    /// UTF-8 encoded text.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl Default for Body {
    fn default() -> Self {
        Body::Bytes(vec![])
    }
}

impl Body {
    pub fn html(text: impl ToString) -> Self {
        Self::Html(text.to_string())
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Html(html) => html.as_bytes(),
            Body::Text(text) => text.as_bytes(),
            Body::Bytes(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of the `Content-Type` header.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Body::Html(_) => "text/html",
            Body::Text(_) => "text/plain",
            Body::Bytes(_) => "application/octet-stream",
        }
    }

    /// Write the body to the stream. The stream isn't flushed.
    pub async fn send(&self, mut stream: impl AsyncWrite + Unpin) -> Result<(), std::io::Error> {
        stream.write_all(self.as_bytes()).await
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

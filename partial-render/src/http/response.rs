//! HTTP response.
use std::marker::Unpin;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::{Body, Headers, Version};

/// Response status, e.g. 404, 200, etc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    Ok,
    NotFound,
    InternalServerError,
    Code(u16),
}

impl Status {
    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
            Status::Code(code) => *code,
        }
    }

    pub fn ok(&self) -> bool {
        self.code() < 300
    }

    /// Reason phrase sent on the status line.
    pub fn reason(&self) -> &'static str {
        match self.code() {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            413 => "Payload Too Large",
            431 => "Request Header Fields Too Large",
            500 => "Internal Server Error",
            _ => "",
        }
    }
}

impl From<u16> for Status {
    fn from(code: u16) -> Status {
        match code {
            200 => Status::Ok,
            404 => Status::NotFound,
            500 => Status::InternalServerError,
            code => Status::Code(code),
        }
    }
}

/// HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    code: u16,
    headers: Headers,
    version: Version,
    body: Body,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// Create an empty `200 OK` response.
    pub fn new() -> Self {
        let mut headers = Headers::new();
        headers.insert("server", "partial-render");

        Self {
            code: 200,
            headers,
            version: Version::Http11,
            body: Body::default(),
        }
        .body(Body::default())
    }

    /// Set the body. `Content-Type` and `Content-Length` follow it.
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self.headers.insert("content-length", self.body.len());
        self.headers.insert("content-type", self.body.mime_type());
        self
    }

    /// Response with an HTML body.
    ///
    /// ```
    /// use partial_render::http::Response;
    ///
    /// let response = Response::new().html("<div>Test</div>");
    /// assert_eq!(
    ///     response.headers().get("content-type"),
    ///     Some(&String::from("text/html"))
    /// );
    /// ```
    pub fn html(self, body: impl ToString) -> Self {
        self.body(Body::Html(body.to_string()))
    }

    /// Response with a plain text body.
    pub fn text(self, body: impl ToString) -> Self {
        self.body(Body::Text(body.to_string()))
    }

    pub fn code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    pub fn status(&self) -> Status {
        self.code.into()
    }

    /// Add a header. The name is lowercased, the value is set as-is.
    pub fn header(mut self, name: impl ToString, value: impl ToString) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn get_body(&self) -> &Body {
        &self.body
    }

    /// Serialize the response to a stream. The stream isn't flushed.
    pub async fn send(&self, mut stream: impl AsyncWrite + Unpin) -> Result<(), std::io::Error> {
        let status = self.status();
        let mut head = format!("{} {} {}\r\n", self.version, status.code(), status.reason())
            .as_bytes()
            .to_vec();

        head.extend_from_slice(&self.headers.to_bytes());
        head.extend_from_slice(b"\r\n");

        stream.write_all(&head).await?;
        self.body.send(stream).await
    }

    /// Default not found (404) response.
    pub fn not_found() -> Self {
        Self::new()
            .html("<h3><center>404 - Not Found</center></h3>")
            .code(404)
    }

    /// Default error (500) response.
    pub fn internal_error(err: impl std::error::Error) -> Self {
        let message = crate::safe_html(&err.to_string());

        Self::new()
            .html(format!(
                "<h3><center>500 - Internal Server Error</center></h3>\
                <center><code style=\"padding: 25px;\">{}</code></center>",
                message
            ))
            .code(500)
    }
}

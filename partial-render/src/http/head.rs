//! Request head: method, path, HTTP version and headers.
use std::marker::Unpin;

use tokio::io::{AsyncRead, AsyncReadExt};

use super::{Error, Headers};
use crate::config::get_config;

/// HTTP method, e.g. GET, POST, etc.
#[derive(PartialEq, Clone, Debug, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
    Patch,
    /// Some other request we don't have a name for.
    Other(String),
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        match value.to_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "PATCH" => Method::Patch,
            _ => Method::Other(value.to_string()),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Method::*;

        match self {
            Get => write!(f, "GET"),
            Post => write!(f, "POST"),
            Put => write!(f, "PUT"),
            Delete => write!(f, "DELETE"),
            Head => write!(f, "HEAD"),
            Patch => write!(f, "PATCH"),
            Other(other) => write!(f, "{}", other),
        }
    }
}

/// HTTP version.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Version {
    Http10,
    #[default]
    Http11,
    Unknown,
}

impl From<&str> for Version {
    fn from(value: &str) -> Self {
        match value {
            "HTTP/1.0" => Version::Http10,
            "HTTP/1.1" => Version::Http11,
            _ => Version::Unknown,
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Version::Http10 => write!(f, "HTTP/1.0"),
            Version::Http11 | Version::Unknown => write!(f, "HTTP/1.1"),
        }
    }
}

/// Request HTTP method, path, version and headers.
#[derive(Debug, Clone, Default)]
pub struct Head {
    method: Method,
    path: String,
    version: Version,
    headers: Headers,
}

impl Head {
    /// Read the request head from a stream.
    ///
    /// The stream should be buffered, it's read one byte at a time.
    pub async fn read(mut stream: impl AsyncRead + Unpin) -> Result<Self, Error> {
        let max_size = get_config().http.header_max_size;
        let mut remaining = max_size;

        let line = Self::read_line(&mut stream, &mut remaining, max_size).await?;
        let mut parts = line.split(' ').filter(|part| !part.is_empty());

        let method = Method::from(parts.next().ok_or(Error::MalformedRequest("method"))?);
        let path = parts
            .next()
            .ok_or(Error::MalformedRequest("path"))?
            .to_string();
        let version = Version::from(parts.next().ok_or(Error::MalformedRequest("version"))?);

        let mut headers = Headers::new();

        loop {
            let line = Self::read_line(&mut stream, &mut remaining, max_size).await?;
            if line.is_empty() {
                break;
            }

            let (name, value) = line
                .split_once(':')
                .ok_or(Error::MalformedRequest("header"))?;
            headers.insert(name.trim(), value.trim());
        }

        Ok(Head {
            method,
            path,
            version,
            headers,
        })
    }

    /// Read a line terminated by `\r\n`, without the terminator.
    async fn read_line(
        mut stream: impl AsyncRead + Unpin,
        remaining: &mut usize,
        max_size: usize,
    ) -> Result<String, Error> {
        let mut buf = Vec::new();

        loop {
            if *remaining == 0 {
                return Err(Error::HeadTooLarge(max_size));
            }

            let b = stream.read_u8().await?;
            *remaining -= 1;

            match b {
                b'\n' => match buf.pop() {
                    Some(b'\r') => break,
                    _ => return Err(Error::MalformedRequest("nl before cr")),
                },
                b => buf.push(b),
            }
        }

        Ok(String::from_utf8_lossy(&buf).to_string())
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path without the query string.
    pub fn path(&self) -> &str {
        match self.path.split_once('?') {
            Some((path, _)) => path,
            None => &self.path,
        }
    }

    /// Query string, e.g. `hello=world`.
    pub fn query(&self) -> Option<&str> {
        self.path.split_once('?').map(|(_, query)| query)
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get a header value by name. Case insensitive.
    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers.get(name)
    }

    /// Size of the request body, from `Content-Length`.
    pub fn content_length(&self) -> Option<usize> {
        self.header("content-length")
            .and_then(|length| length.parse::<usize>().ok())
    }

    /// Should the connection stay open after the response?
    ///
    /// HTTP/1.1 keeps connections open unless told otherwise, HTTP/1.0 only when asked.
    pub fn keep_alive(&self) -> bool {
        let connection = self
            .header("connection")
            .map(|connection| connection.to_lowercase());

        match self.version {
            Version::Http10 => connection
                .map(|c| c.contains("keep-alive"))
                .unwrap_or(false),
            _ => !connection.map(|c| c.contains("close")).unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_read_line() {
        let line = b"Content-Type: text/html\r\n";
        let mut remaining = 4096;
        let result = Head::read_line(&line[..], &mut remaining, 4096)
            .await
            .expect("read_line");
        assert_eq!(result, "Content-Type: text/html");
        assert_eq!(remaining, 4096 - line.len());
    }

    #[tokio::test]
    async fn test_parse_head() {
        let body = ("GET /?hello=world HTTP/1.1\r\n".to_owned()
            + "Accept: */*\r\n"
            + "Content-Length: 4\r\n"
            + "Host: localhost:8000\r\n"
            + "\r\n"
            + "body")
            .as_bytes()
            .to_vec();
        let head = Head::read(&body[..]).await.expect("head");

        assert_eq!(head.method(), &Method::Get);
        assert_eq!(head.version(), &Version::Http11);
        assert_eq!(head.path(), "/");
        assert_eq!(head.query(), Some("hello=world"));
        assert_eq!(head.content_length(), Some(4));
        assert_eq!(head.header("ACCEPT"), Some(&String::from("*/*")));
        assert_eq!(
            head.header("host"),
            Some(&String::from("localhost:8000"))
        );
        assert!(head.keep_alive());
    }

    #[tokio::test]
    async fn test_connection_close() {
        let head = Head::read("GET / HTTP/1.1\r\nConnection: close\r\n\r\n".as_bytes())
            .await
            .expect("head");
        assert!(!head.keep_alive());

        let head = Head::read("GET / HTTP/1.0\r\n\r\n".as_bytes())
            .await
            .expect("head");
        assert!(!head.keep_alive());
    }

    #[tokio::test]
    async fn test_nl_before_cr() {
        let err = Head::read("GET / HTTP/1.1\n\r".as_bytes())
            .await
            .expect_err("parser should throw err");

        assert!(matches!(err, Error::MalformedRequest("nl before cr")));
    }

    #[tokio::test]
    async fn test_malformed_request_line() {
        let err = Head::read("GET\r\n\r\n".as_bytes())
            .await
            .expect_err("no path");

        assert!(matches!(err, Error::MalformedRequest("path")));
    }

    #[tokio::test]
    async fn test_head_too_large() {
        let mut remaining = 4;
        let err = Head::read_line(&b"GET / HTTP/1.1\r\n"[..], &mut remaining, 4)
            .await
            .expect_err("line is over the budget");
        assert!(matches!(err, Error::HeadTooLarge(4)));

        let max_size = get_config().http.header_max_size;
        let raw = format!(
            "GET / HTTP/1.1\r\nCookie: {}\r\n\r\n",
            "a".repeat(max_size)
        );
        let err = Head::read(raw.as_bytes())
            .await
            .expect_err("head is over the budget");
        assert!(matches!(err, Error::HeadTooLarge(size) if size == max_size));
    }
}

//! HTTP request.
use std::marker::Unpin;
use std::net::SocketAddr;
use std::ops::Deref;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};

use super::{Error, Head};
use crate::config::get_config;

/// HTTP request, fully loaded into memory.
///
/// Cheap to clone, the body is behind an [`Arc`].
#[derive(Debug, Clone, Default)]
pub struct Request {
    head: Head,
    body: Arc<Vec<u8>>,
    peer: Option<SocketAddr>,
}

impl Request {
    /// Read the whole request from a stream.
    ///
    /// The body must fit in `http.body_max_size`, checked before anything is allocated.
    pub async fn read(peer: SocketAddr, mut stream: impl AsyncRead + Unpin) -> Result<Self, Error> {
        let head = Head::read(&mut stream).await?;

        let max_size = get_config().http.body_max_size;
        let length = head.content_length().unwrap_or(0);
        if length > max_size {
            return Err(Error::BodyTooLarge(max_size));
        }

        let mut body = vec![0u8; length];
        stream
            .read_exact(&mut body)
            .await
            .map_err(|_| Error::MalformedRequest("incorrect content length"))?;

        Ok(Request {
            head,
            body: Arc::new(body),
            peer: Some(peer),
        })
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    /// Request body as bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Request body as a UTF-8 string. Invalid characters are replaced.
    pub fn string(&self) -> String {
        String::from_utf8_lossy(self.body()).to_string()
    }

    /// Address of the client, if the request came over the network.
    pub fn peer(&self) -> Option<&SocketAddr> {
        self.peer.as_ref()
    }
}

impl Deref for Request {
    type Target = Head;

    fn deref(&self) -> &Self::Target {
        &self.head
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_read_request() {
        let peer: SocketAddr = "127.0.0.1:1234".parse().unwrap();
        let raw = "POST /render HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let request = Request::read(peer, raw.as_bytes()).await.expect("request");

        assert_eq!(request.path(), "/render");
        assert_eq!(request.string(), "hello");
        assert_eq!(request.peer(), Some(&peer));
    }

    #[tokio::test]
    async fn test_short_body() {
        let peer: SocketAddr = "127.0.0.1:1234".parse().unwrap();
        let raw = "POST / HTTP/1.1\r\nContent-Length: 50\r\n\r\nhello";
        let err = Request::read(peer, raw.as_bytes())
            .await
            .expect_err("body is too short");

        assert!(matches!(err, Error::MalformedRequest(_)));
    }

    #[tokio::test]
    async fn test_body_too_large() {
        let peer: SocketAddr = "127.0.0.1:1234".parse().unwrap();
        let max_size = get_config().http.body_max_size;

        let raw = "POST / HTTP/1.1\r\nContent-Length: 18446744073709551615\r\n\r\nhi";
        let err = Request::read(peer, raw.as_bytes())
            .await
            .expect_err("length is way over the limit");
        assert!(matches!(err, Error::BodyTooLarge(size) if size == max_size));
        assert_eq!(err.status(), Some(413));

        let raw = format!("POST / HTTP/1.1\r\nContent-Length: {}\r\n\r\n", max_size + 1);
        let err = Request::read(peer, raw.as_bytes())
            .await
            .expect_err("one byte over");
        assert!(matches!(err, Error::BodyTooLarge(_)));
    }
}

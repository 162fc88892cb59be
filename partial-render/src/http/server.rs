//! Simple HTTP server.
//!
//! Listens for requests and maps them to a handler, if any exists for the specified path.
//! If no handler is matched, return `404 - Not Found`. If the controller fails,
//! the error is logged and the client gets `500 - Internal Server Error`.
//!
//! Every connection runs in its own Tokio task.
use super::{Error, Handler, Request, Response, Router};

use crate::colors::MaybeColorize;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::select;
use tokio::signal::ctrl_c;
use tracing::{debug, error, info};

/// HTTP server.
pub struct Server {
    router: Arc<Router>,
}

impl Server {
    /// Create new HTTP server.
    ///
    /// Accepts a list of routes and their handlers.
    pub fn new(handlers: Vec<Handler>) -> Self {
        Server {
            router: Arc::new(Router::new(handlers)),
        }
    }

    /// Launch the server. This blocks until the server is shut down (`SIGINT`/Ctrl-C).
    pub async fn launch(self, addr: impl ToSocketAddrs) -> Result<(), Error> {
        info!("Starting {} {}", "HTTP".purple(), "server".green());

        self.router.log_routes();

        let listener = TcpListener::bind(addr).await?;

        info!("Listening on {}", listener.local_addr()?);

        select! {
            _ = ctrl_c() => {
                info!("Shutting down...");
                Ok(())
            }

            result = self.serve(listener) => result,
        }
    }

    /// Accept connections on an already bound listener, forever.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), Error> {
        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    let router = self.router.clone();
                    tokio::spawn(async move {
                        Self::handle_connection(router, stream, peer).await;
                    });
                }

                Err(err) => {
                    error!("{} accept error: {}", "http".purple(), err);
                }
            }
        }
    }

    async fn handle_connection(router: Arc<Router>, stream: TcpStream, peer: SocketAddr) {
        let mut stream = BufReader::new(BufWriter::new(stream));
        debug!("{} new connection from {:?}", "http".purple(), peer);

        loop {
            let request = match Request::read(peer, &mut stream).await {
                Ok(request) => request,
                Err(err) => {
                    // Answer what we can, then drop the connection.
                    if let Some(code) = err.status() {
                        info!("{} {} from {:?}: {}", "http".purple(), code, peer, err);
                        let response = Response::new()
                            .text(err.to_string())
                            .code(code)
                            .header("connection", "close");
                        let _ = Self::send_response(&mut stream, &response).await;
                    } else {
                        debug!("{} client {:?} disconnected: {}", "http".purple(), peer, err);
                    }
                    return;
                }
            };

            let start = Instant::now();
            let keep_alive = request.keep_alive();

            let (controller_name, response) = match router.find(request.path()) {
                Some(handler) => {
                    let response = match handler.handle(&request).await {
                        Ok(response) => response,
                        Err(err) => {
                            error!("{}", err);
                            Response::internal_error(err)
                        }
                    };

                    (handler.controller_name(), response)
                }

                None => (std::any::type_name::<Self>(), Response::not_found()),
            };

            let response =
                response.header("connection", if keep_alive { "keep-alive" } else { "close" });

            Self::log(&request, controller_name, &response, start.elapsed());

            if let Err(err) = Self::send_response(&mut stream, &response).await {
                debug!("{} error {:?}", peer, err);
                return;
            }

            if !keep_alive {
                return;
            }
        }
    }

    fn log(request: &Request, controller_name: &str, response: &Response, duration: Duration) {
        let method = request.method().to_string();
        let code = response.status().code();
        let duration = (duration.as_secs_f64() * 1000.0) as f32;

        let code = match code {
            500.. => code.to_string().red(),
            400..=499 => code.to_string().yellow(),
            _ => code.to_string(),
        };

        info!(
            "{} {} {} {} ({:.3} ms)",
            method.purple(),
            request.path().purple(),
            controller_name.green(),
            code,
            duration,
        );
    }

    async fn send_response(
        mut stream: impl AsyncWrite + Unpin,
        response: &Response,
    ) -> Result<(), Error> {
        response.send(&mut stream).await?;
        stream.flush().await?;

        Ok(())
    }
}

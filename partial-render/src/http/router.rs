//! HTTP request routing.
//!
//! Paths are matched exactly, ignoring a trailing slash.
use std::collections::HashMap;

use super::Handler;
use crate::colors::MaybeColorize;

use tracing::info;

#[derive(Default)]
pub struct Router {
    handlers: Vec<Handler>,
    paths: HashMap<String, usize>,
}

impl Router {
    /// Build the router. A path registered twice keeps the last handler.
    pub fn new(handlers: Vec<Handler>) -> Self {
        let paths = handlers
            .iter()
            .enumerate()
            .map(|(i, handler)| (Self::normalize(handler.path()).to_string(), i))
            .collect();

        Self { handlers, paths }
    }

    pub fn find(&self, path: &str) -> Option<&Handler> {
        self.paths
            .get(Self::normalize(path))
            .and_then(|i| self.handlers.get(*i))
    }

    fn normalize(path: &str) -> &str {
        match path.trim_end_matches('/') {
            "" => "/",
            path => path,
        }
    }

    pub fn log_routes(&self) {
        let mut handlers = self.handlers.iter().collect::<Vec<_>>();
        handlers.sort_by(|a, b| a.path().cmp(b.path()));
        for handler in handlers {
            info!(
                ">> {} => {}",
                handler.path().purple(),
                handler.controller_name().green()
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::async_trait;
    use crate::controller::{Controller, Error};
    use crate::http::{Request, Response};

    struct Views;
    struct Health;

    #[async_trait]
    impl Controller for Views {
        async fn handle(&self, _request: &Request) -> Result<Response, Error> {
            Ok(Response::new().html("<div>Test</div>"))
        }
    }

    #[async_trait]
    impl Controller for Health {
        async fn handle(&self, _request: &Request) -> Result<Response, Error> {
            Ok(Response::new().text("OK"))
        }
    }

    #[tokio::test]
    async fn test_find() {
        let router = Router::new(vec![Views.route("/"), Health.route("/health/")]);

        let handler = router.find("/").expect("index");
        let response = handler.handle(&Request::default()).await.unwrap();
        assert_eq!(response.status().code(), 200);
        assert!(handler.controller_name().ends_with("Views"));

        assert!(router.find("/health").is_some());
        assert!(router.find("/nope").is_none());
    }
}

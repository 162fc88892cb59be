use partial_render::prelude::*;
use tracing::info;

/// Renders the "Test" view without a layout and returns it as the page.
pub struct HomeController {
    renderer: ViewRenderer,
}

impl HomeController {
    pub fn new(renderer: ViewRenderer) -> Self {
        Self { renderer }
    }
}

#[async_trait]
impl Controller for HomeController {
    async fn handle(&self, _request: &Request) -> Result<Response, Error> {
        let html = self
            .renderer
            .render_to_string("Test", None::<&()>, RenderMode::Partial)
            .await?;

        info!("{}", html);

        Ok(Response::new().html(html).code(200))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use partial_render::config::ViewsConfig;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn views_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("views")
    }

    fn renderer() -> ViewRenderer {
        let config = ViewsConfig {
            path: views_dir(),
            ..Default::default()
        };
        ViewRenderer::with_engine(Arc::new(Views::new(&config).expect("views")))
    }

    #[tokio::test]
    async fn test_home() {
        let controller = HomeController::new(renderer());
        let response = controller
            .handle(&Request::default())
            .await
            .expect("response");

        assert_eq!(response.status().code(), 200);
        assert_eq!(
            response.headers().get("content-type"),
            Some(&String::from("text/html"))
        );
        assert_eq!(
            response.get_body(),
            &partial_render::http::Body::Html("<div>Test</div>".into())
        );
    }

    #[tokio::test]
    async fn test_home_full_has_layout() {
        let html = renderer()
            .render_to_string("Test", None::<&()>, RenderMode::Full)
            .await
            .expect("full render");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<div>Test</div>"));
    }

    #[tokio::test]
    async fn test_missing_view_fails() {
        let mut views = Views::in_memory();
        views.add_view("Other.html", "other").expect("view");
        let controller = HomeController::new(ViewRenderer::with_engine(Arc::new(views)));

        let err = controller
            .handle(&Request::default())
            .await
            .expect_err("Test view is missing");

        assert!(matches!(
            err,
            Error::ViewError(ref err) if err.not_found()
        ));
    }
}

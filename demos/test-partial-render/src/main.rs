use std::sync::Arc;

use partial_render::http::Server;
use partial_render::prelude::*;

mod controllers;

use controllers::HomeController;

#[tokio::main]
async fn main() -> Result<(), partial_render::Error> {
    Logger::init();

    let config = Config::get();
    let views = Views::new(&config.views)?;
    let renderer = ViewRenderer::with_engine(Arc::new(views));

    Server::new(vec![HomeController::new(renderer).route("/")])
        .launch((config.general.host.as_str(), config.general.port))
        .await?;

    Ok(())
}

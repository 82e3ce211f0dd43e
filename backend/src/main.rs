mod config;
mod db;
mod error;
mod renderer;
mod serialize;
mod services;
mod state;

use std::time::Duration;

use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

use crate::config::Settings;
use crate::db::Store;
use crate::renderer::RendererClient;
use crate::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let settings = Settings::from_env();

    let store = Store::new(&settings.database_path);
    store.init_schema().map_err(std::io::Error::other)?;

    let renderer = RendererClient::new(
        &settings.renderer_url,
        Duration::from_secs(settings.renderer_timeout_secs),
    )
    .map_err(std::io::Error::other)?;

    let app_state = AppState { store, renderer };

    info!(
        "Server running at http://{}:{}",
        settings.host, settings.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(1024 * 1024)) // 1 MB
            .app_data(web::Data::new(app_state.clone()))
            .service(services::configurations::configure_routes())
            .service(services::templates::configure_routes())
            .service(services::fonts::configure_routes())
            .service(services::certificates::configure_routes())
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}

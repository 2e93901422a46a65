use actix_web::{web, App, HttpServer};
use review_roster::config::EnvConfig;
use review_roster::db::service::DbService;
use review_roster::routes::configure_routes;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let db = Arc::new(
        DbService::new(&config.db_url)
            .await
            .expect("Failed to initialize DbService"),
    );

    log::info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&db)))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}

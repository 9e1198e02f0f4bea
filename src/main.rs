//! Service entrypoint: logging, configuration, HTTP server.

use actix_web::{middleware, web, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use teamtailor_export::config::AppConfig;
use teamtailor_export::configure_app;
use teamtailor_export::teamtailor::TeamtailorClient;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Configuration error: {err}");
            std::process::exit(1);
        }
    };

    let client = match TeamtailorClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to build Teamtailor client: {err}");
            std::process::exit(1);
        }
    };
    let client = web::Data::new(client);

    let port = config.port;
    info!("Server running on http://localhost:{port}");
    info!("Download CSV at http://localhost:{port}/api/export/candidates");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(client.clone())
            .configure(configure_app)
            .service(actix_files::Files::new("/", "./public").index_file("index.html"))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

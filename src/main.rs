use actix_web::{App, HttpServer};
use clap::Parser;
use tracing::info;

use tailrisk::config::ServerConfig;
use tailrisk::service;
use tailrisk::telemetry::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::parse();
    if let Err(e) = init_logging(&config.log_level) {
        eprintln!("Warning: could not initialise logging: {}", e);
    }
    info!(host = %config.host, port = config.port, "starting tailrisk");
    let limits = config.limits();
    HttpServer::new(move || App::new().configure(service::configure_with(limits)))
        .bind(config.bind_address())?
        .run()
        .await
}

mod config;
mod db;
mod error;
mod logging;
mod middleware;
mod models;
mod routes;
mod services;
mod utils;
#[cfg(test)]
mod test_support;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use crate::config::AppConfig;
use crate::utils::jwt::JwtKeys;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // .env d'abord: RUST_LOG et LOG_FORMAT y sont aussi lus
    dotenv::dotenv().ok();
    logging::init_logging();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    tracing::info!("connecting to database");
    let db = match db::establish_connection(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            std::process::exit(1);
        }
    };
    tracing::info!("database ready");

    let keys = web::Data::new(JwtKeys::from_config(&config));
    let db = web::Data::new(db);
    let bind = (config.host.clone(), config.port);
    let config = web::Data::new(config);

    tracing::info!(host = %bind.0, port = bind.1, "starting server");

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&config.cors_origins))
            .wrap(Logger::default())
            .app_data(db.clone())
            .app_data(keys.clone())
            .app_data(config.clone())
            .configure(routes::configure_routes)
    })
        .bind(bind)?
        .run()
        .await
}

/// CORS: origines de la liste uniquement, toutes méthodes et headers
/// "*" dans CORS_ORIGINS autorise toutes les origines
fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| match origin.as_str() {
            "*" => cors.allow_any_origin(),
            origin => cors.allowed_origin(origin),
        })
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

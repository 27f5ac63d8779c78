pub mod auth;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod transactions;
pub mod wallets;

use actix_web::web;

use crate::error::ApiError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Corps JSON/form invalides: même format d'erreur que le reste de l'API
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into());
    let form_config = web::FormConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into());

    cfg.app_data(json_config)
        .app_data(form_config)
        .service(health::root)
        .service(health::health_check)
        .configure(auth::auth_routes)
        .configure(dashboard::dashboard_routes)
        .configure(wallets::wallet_routes)
        .configure(transactions::transaction_routes)
        .configure(export::export_routes);
}

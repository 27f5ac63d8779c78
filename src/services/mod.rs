pub mod dashboard_service;
pub mod export_service;
pub mod transaction_service;
pub mod user_service;
pub mod wallet_service;

use sea_orm::DbErr;

/// Erreurs métier des services, converties en ApiError par les routes
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
}

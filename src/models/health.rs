use serde::Serialize;
use chrono::{DateTime, Utc};

pub const APP_NAME: &str = "Crypto Tax Logger";

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub app: &'static str,
}

/// Réponse de /health: "ok" si la base répond, "degraded" sinon
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub app: &'static str,
    pub database: &'static str,
    pub checked_at: DateTime<Utc>,
}

// ============================================================================
// CONFIGURATION
// ============================================================================
//
// Toute la configuration est lue depuis l'environnement au démarrage du
// process. main charge le fichier .env (dotenv) avant le logging et la config.
//
// Variables:
//   - DATABASE_URL        : connexion SeaORM (défaut: sqlite://./crypto_tax.db?mode=rwc)
//   - JWT_SECRET          : clé HS256 courante, 32 caractères minimum (OBLIGATOIRE)
//   - JWT_PREVIOUS_SECRET : ancienne clé, encore acceptée en vérification (rotation)
//   - TOKEN_TTL_DAYS      : durée de vie des tokens (défaut: 7)
//   - FREE_TX_LIMIT       : nombre max de transactions pour le plan free (défaut: 50)
//   - CORS_ORIGINS        : origines autorisées, séparées par des virgules
//   - HOST / PORT         : adresse d'écoute (défaut: 0.0.0.0:8000)
//
// ============================================================================

use std::env;

use actix_web::http::Uri;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./crypto_tax.db?mode=rwc";
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;
pub const DEFAULT_FREE_TX_LIMIT: u64 = 50;
pub const MIN_SECRET_LENGTH: usize = 32;

pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://mbrn-crypto-tax-logger.netlify.app",
    "https://www.mbrn-crypto-tax-logger.netlify.app",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:8080",
    "http://127.0.0.1:5500",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be at least {min} characters long")]
    SecretTooShort { name: &'static str, min: usize },
    #[error("{name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("CORS_ORIGINS entry is not an origin (scheme://host[:port]): {0}")]
    InvalidOrigin(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_previous_secret: Option<String>,
    pub token_ttl_days: i64,
    pub free_tx_limit: u64,
    pub cors_origins: Vec<String>,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Charge la configuration depuis les variables d'environnement
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construit la configuration à partir d'une fonction de lookup
    /// (permet de tester sans toucher à l'environnement du process)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        check_secret("JWT_SECRET", &jwt_secret)?;

        let jwt_previous_secret = get("JWT_PREVIOUS_SECRET");
        if let Some(previous) = &jwt_previous_secret {
            check_secret("JWT_PREVIOUS_SECRET", previous)?;
        }

        let cors_origins = match get("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(check_origin)
                .collect::<Result<_, _>>()?,
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_previous_secret,
            token_ttl_days: parse_number("TOKEN_TTL_DAYS", get("TOKEN_TTL_DAYS"), DEFAULT_TOKEN_TTL_DAYS)?,
            free_tx_limit: parse_number("FREE_TX_LIMIT", get("FREE_TX_LIMIT"), DEFAULT_FREE_TX_LIMIT)?,
            cors_origins,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_number("PORT", get("PORT"), 8000)?,
        })
    }
}

fn check_secret(name: &'static str, secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LENGTH {
        return Err(ConfigError::SecretTooShort { name, min: MIN_SECRET_LENGTH });
    }
    Ok(())
}

/// "*" ou une origine http(s) sans chemin, comme l'envoie le navigateur
fn check_origin(origin: &str) -> Result<String, ConfigError> {
    if origin == "*" {
        return Ok(origin.to_string());
    }

    let invalid = || ConfigError::InvalidOrigin(origin.to_string());
    let uri: Uri = origin.parse().map_err(|_| invalid())?;

    let scheme_ok = matches!(uri.scheme_str(), Some("http" | "https"));
    let path_ok = uri.path_and_query().is_none_or(|pq| pq.as_str() == "/") && !origin.ends_with('/');
    if !scheme_ok || uri.host().is_none() || !path_ok {
        return Err(invalid());
    }
    Ok(origin.to_string())
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::error::ApiError;
use crate::models::users;
use crate::services::user_service::UserService;
use crate::utils::jwt::{JwtKeys, TokenError};

/// Pourquoi une requête n'a pas pu être authentifiée
/// Toutes les variantes donnent la même réponse 401, seule la cause loggée change
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("invalid Authorization header (expected: Bearer <token>)")]
    InvalidHeader,
    #[error("missing token query parameter")]
    MissingQueryToken,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("token subject does not match any user")]
    UnknownSubject,
}

/// Utilisateur authentifié, chargé depuis la base à partir du `sub` du token
/// Utilisé comme extracteur dans les routes protégées
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: users::Model,
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let db = req.app_data::<web::Data<DatabaseConnection>>().cloned();
        let keys = req.app_data::<web::Data<JwtKeys>>().cloned();

        Box::pin(async move {
            let (Some(db), Some(keys)) = (db, keys) else {
                return Err(ApiError::Internal("authentication is not configured".to_string()));
            };

            let result = match token {
                Ok(token) => authenticate(db.get_ref(), &keys, &token).await,
                Err(e) => Err(e.into()),
            };

            if let Err(ApiError::Unauthorized(reason)) = &result {
                tracing::debug!(%reason, "authentication failed");
            }

            result.map(|user| AuthUser { user })
        })
    }
}

/// Vérifie le token et charge l'utilisateur correspondant
pub async fn authenticate<C: ConnectionTrait>(
    db: &C,
    keys: &JwtKeys,
    token: &str,
) -> Result<users::Model, ApiError> {
    let claims = keys.verify(token).map_err(AuthError::from)?;

    UserService::find_by_email(db, &claims.sub)
        .await?
        .ok_or(ApiError::Unauthorized(AuthError::UnknownSubject))
}

/// Extrait le token du header (format: "Bearer <token>")
fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim().to_string())
        }
        _ => Err(AuthError::InvalidHeader),
    }
}

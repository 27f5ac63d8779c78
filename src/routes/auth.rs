use actix_web::{get, post, web, Either, HttpResponse};
use sea_orm::{DatabaseConnection, TransactionTrait};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::{LoginForm, LoginJson, RegisterRequest, TokenResponse, UserResponse};
use crate::services::user_service::{NewUser, UserService};
use crate::utils::{jwt::JwtKeys, password};

/// POST /auth/register - Créer un compte (PUBLIC)
#[post("/register")]
pub async fn register(
    body: web::Json<RegisterRequest>,
    db: web::Data<DatabaseConnection>,
    keys: web::Data<JwtKeys>,
) -> Result<HttpResponse, ApiError> {
    // 1. Valider l'entrée
    body.validate()?;
    let body = body.into_inner();

    // 2. Hash le mot de passe (PBKDF2 bloquant: hors de la boucle d'événements)
    let plain = body.password;
    let hashed_password = web::block(move || password::hash_password(&plain)).await??;

    // 3. Créer l'utilisateur (Conflict si l'email existe)
    let txn = db.begin().await?;
    let user = UserService::create(
        &txn,
        NewUser {
            name: body.name,
            email: body.email,
            hashed_password,
            plan: body.plan,
        },
    )
    .await?;
    txn.commit().await?;

    // 4. Générer le JWT
    let token = issue_token(&keys, &user.email)?;
    tracing::info!(user_id = user.id, plan = ?user.plan, "user registered");

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token, user)))
}

/// POST /auth/login - Se connecter (PUBLIC)
/// Accepte le formulaire OAuth2 (username/password) ou du JSON (email/password)
#[post("/login")]
pub async fn login(
    body: Either<web::Form<LoginForm>, web::Json<LoginJson>>,
    db: web::Data<DatabaseConnection>,
    keys: web::Data<JwtKeys>,
) -> Result<HttpResponse, ApiError> {
    let (email, password) = match body {
        Either::Left(form) => {
            let form = form.into_inner();
            (form.username, form.password)
        }
        Either::Right(json) => {
            let json = json.into_inner();
            (json.email, json.password)
        }
    };

    // 1. Trouver l'utilisateur
    let email = UserService::normalize_email(&email);
    let user = match UserService::find_by_email(db.get_ref(), &email).await? {
        Some(user) => user,
        None => {
            tracing::info!("login rejected: unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    // 2. Vérifier le mot de passe
    let stored_hash = user.hashed_password.clone();
    let valid = web::block(move || password::verify_password(&password, &stored_hash)).await??;
    if !valid {
        tracing::info!(user_id = user.id, "login rejected: wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    // 3. Générer le JWT
    let token = issue_token(&keys, &user.email)?;
    tracing::info!(user_id = user.id, "user logged in");

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token, user)))
}

/// GET /auth/me - Profil de l'utilisateur connecté (PROTÉGÉE)
#[get("/me")]
pub async fn me(auth_user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(auth_user.user))
}

fn issue_token(keys: &JwtKeys, email: &str) -> Result<String, ApiError> {
    keys.issue(email).map_err(|e| ApiError::Internal(e.to_string()))
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(register)
            .service(login)
            .service(me)
    );
}

use actix_web::{get, http::header, web, HttpResponse};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::{auth::authenticate, AuthError};
use crate::services::export_service::ExportService;
use crate::utils::jwt::JwtKeys;

/// Le navigateur ouvre l'export dans un nouvel onglet (window.open):
/// pas de header Authorization possible, le token passe dans l'URL
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub token: Option<String>,
}

/// GET /export/full-csv?token=... - Toutes les transactions en CSV (PROTÉGÉE)
#[get("/full-csv")]
pub async fn full_csv(
    query: web::Query<ExportQuery>,
    db: web::Data<DatabaseConnection>,
    keys: web::Data<JwtKeys>,
) -> Result<HttpResponse, ApiError> {
    let token = query
        .into_inner()
        .token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingQueryToken)?;

    let user = authenticate(db.get_ref(), &keys, &token).await.inspect_err(|e| {
        if let ApiError::Unauthorized(reason) = e {
            tracing::debug!(%reason, "export authentication failed");
        }
    })?;

    let csv = ExportService::transactions_csv(db.get_ref(), user.id).await?;
    tracing::info!(user_id = user.id, bytes = csv.len(), "transactions exported");

    let filename = format!("transactions_{}.csv", Utc::now().format("%Y-%m-%d"));
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(csv))
}

pub fn export_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/export")
            .service(full_csv)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    use crate::models::users::Plan;
    use crate::test_support::TestContext;

    #[actix_web::test]
    async fn test_full_csv_with_query_token() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice@example.com", "password123", Plan::Free).await;
        let wallet = ctx.create_wallet(user.id, "Kraken", 0.0).await;
        ctx.create_transactions(&user, wallet.id, 2).await;
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let req = test::TestRequest::get()
            .uri(&format!("/export/full-csv?token={}", ctx.token_for(&user)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        assert!(resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("attachment; filename=\"transactions_"));

        let body = test::read_body(resp).await;
        let text = std::str::from_utf8(&body).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "id,timestamp,tx_type,wallet,from_asset,to_asset,amount,price_eur,total_eur,tx_hash"
        );
        assert!(lines[1].contains(",buy,Kraken,EUR,ETH,1.0,2500.0,2500.0,"));
    }

    #[actix_web::test]
    async fn test_full_csv_requires_valid_token() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice@example.com", "password123", Plan::Free).await;
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        for uri in ["/export/full-csv", "/export/full-csv?token=", "/export/full-csv?token=not-a-jwt"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }

        // le header Authorization seul ne suffit pas: l'export lit le token dans l'URL
        let req = test::TestRequest::get()
            .uri("/export/full-csv")
            .insert_header(("Authorization", format!("Bearer {}", ctx.token_for(&user))))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}

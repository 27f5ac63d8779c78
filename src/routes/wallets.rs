use actix_web::{get, post, web, HttpResponse};
use sea_orm::{DatabaseConnection, TransactionTrait};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::CreateWalletRequest;
use crate::services::wallet_service::WalletService;

/// GET /wallets - Wallets de l'utilisateur
#[get("")]
pub async fn list_wallets(
    auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let wallets = WalletService::list_for_user(db.get_ref(), auth_user.user.id).await?;
    Ok(HttpResponse::Ok().json(wallets))
}

/// POST /wallets - Ajouter un wallet (solde 0)
#[post("")]
pub async fn create_wallet(
    auth_user: AuthUser,
    body: web::Json<CreateWalletRequest>,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    let txn = db.begin().await?;
    let wallet = WalletService::create(&txn, auth_user.user.id, &body.name, body.wallet_type).await?;
    txn.commit().await?;

    tracing::info!(user_id = auth_user.user.id, wallet_id = wallet.id, "wallet created");
    Ok(HttpResponse::Created().json(wallet))
}

pub fn wallet_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/wallets")
            .service(list_wallets)
            .service(create_wallet)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    use crate::models::users::Plan;
    use crate::models::wallets::{self, WalletType};
    use crate::test_support::TestContext;

    #[actix_web::test]
    async fn test_create_then_list() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice@example.com", "password123", Plan::Free).await;
        let token = ctx.token_for(&user);
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/wallets")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(serde_json::json!({"name": "Kraken", "wallet_type": "exchange"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: wallets::Model = test::read_body_json(resp).await;
        assert_eq!(created.wallet_type, WalletType::Exchange);
        assert_eq!(created.user_id, user.id);

        let req = test::TestRequest::get()
            .uri("/wallets")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let listed: Vec<wallets::Model> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed, vec![created]);
    }

    #[actix_web::test]
    async fn test_invalid_wallet_type() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice@example.com", "password123", Plan::Free).await;
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/wallets")
            .insert_header(("Authorization", format!("Bearer {}", ctx.token_for(&user))))
            .set_json(serde_json::json!({"name": "Uniswap", "wallet_type": "defi"}))
            .to_request();

        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn test_list_requires_token() {
        let ctx = TestContext::new().await;
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let req = test::TestRequest::get().uri("/wallets").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}

use actix_web::{get, post, web, HttpResponse};
use sea_orm::{DatabaseConnection, TransactionTrait};
use validator::Validate;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::CreateTransactionRequest;
use crate::services::transaction_service::TransactionService;

/// GET /transactions - Historique des transactions (plus récentes d'abord)
#[get("")]
pub async fn list_transactions(
    auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let transactions = TransactionService::list_for_user(db.get_ref(), auth_user.user.id).await?;
    Ok(HttpResponse::Ok().json(transactions))
}

/// POST /transactions - Enregistrer un achat, une vente ou un transfert
#[post("")]
pub async fn create_transaction(
    auth_user: AuthUser,
    body: web::Json<CreateTransactionRequest>,
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, ApiError> {
    body.validate()?;

    // Vérification du wallet, limite du plan et insertion dans la même transaction BD
    let txn = db.begin().await?;
    let transaction = TransactionService::create(
        &txn,
        &auth_user.user,
        config.free_tx_limit,
        body.into_inner(),
    )
    .await?;
    txn.commit().await?;

    tracing::info!(
        user_id = auth_user.user.id,
        transaction_id = transaction.id,
        "transaction recorded"
    );
    Ok(HttpResponse::Created().json(transaction))
}

pub fn transaction_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .service(list_transactions)
            .service(create_transaction)
    );
}

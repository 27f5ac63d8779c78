use sea_orm::*;
use chrono::Utc;

use crate::models::dto::CreateTransactionRequest;
use crate::models::transactions;
use crate::models::users::{self, Plan};
use crate::services::wallet_service::WalletService;
use super::ServiceError;

pub struct TransactionService;

impl TransactionService {
    /// Transactions d'un utilisateur, les plus récentes d'abord
    pub async fn list_for_user<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Vec<transactions::Model>, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .order_by_desc(transactions::Column::Timestamp)
            .order_by_desc(transactions::Column::Id)
            .all(db)
            .await
    }

    pub async fn count_for_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<u64, DbErr> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .count(db)
            .await
    }

    /// Enregistre une transaction
    /// - le wallet doit appartenir à l'utilisateur
    /// - le plan free est limité à `free_tx_limit` transactions
    /// - total_eur = amount * price_eur, qui doit rester un nombre fini
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user: &users::Model,
        free_tx_limit: u64,
        request: CreateTransactionRequest,
    ) -> Result<transactions::Model, ServiceError> {
        // 0. Un total infini ne survivrait pas au JSON (sérialisé en null)
        let total_eur = request.amount * request.price_eur;
        if !total_eur.is_finite() {
            return Err(ServiceError::Invalid("total_eur is out of range".to_string()));
        }

        // 1. Vérifier que le wallet est bien à l'utilisateur
        if WalletService::find_owned(db, user.id, request.wallet_id).await?.is_none() {
            return Err(ServiceError::NotFound("Wallet not found".to_string()));
        }

        // 2. Limite du plan gratuit
        if user.plan == Plan::Free {
            let count = Self::count_for_user(db, user.id).await?;
            if count >= free_tx_limit {
                return Err(ServiceError::Forbidden(format!(
                    "Free plan is limited to {} transactions",
                    free_tx_limit
                )));
            }
        }

        let transaction = transactions::ActiveModel {
            user_id: Set(user.id),
            wallet_id: Set(request.wallet_id),
            tx_type: Set(request.tx_type),
            from_asset: Set(request.from_asset.trim().to_uppercase()),
            to_asset: Set(request.to_asset.trim().to_uppercase()),
            amount: Set(request.amount),
            price_eur: Set(request.price_eur),
            total_eur: Set(total_eur),
            timestamp: Set(request.timestamp.unwrap_or_else(Utc::now)),
            tx_hash: Set(request.tx_hash.filter(|h| !h.trim().is_empty())),
            fifo_lot_id: Set(None),
            ..Default::default()
        };

        Ok(transaction.insert(db).await?)
    }
}

use sea_orm::*;

use crate::models::dto::DashboardStats;
use crate::services::{transaction_service::TransactionService, wallet_service::WalletService};

pub struct DashboardService;

impl DashboardService {
    /// Agrégats du tableau de bord
    /// profit_loss reste à 0 tant que le suivi FIFO n'existe pas
    pub async fn stats<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<DashboardStats, DbErr> {
        let wallets = WalletService::list_for_user(db, user_id).await?;
        let total_transactions = TransactionService::count_for_user(db, user_id).await?;

        Ok(DashboardStats {
            portfolio_value: wallets.iter().map(|w| w.balance_eur).sum(),
            total_transactions,
            total_wallets: wallets.len() as u64,
            profit_loss: 0.0,
        })
    }
}

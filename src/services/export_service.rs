use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::models::transactions::TxType;
use crate::services::transaction_service::TransactionService;
use crate::services::wallet_service::WalletService;
use super::ServiceError;

pub struct ExportService;

/// Une ligne du fichier, dans l'ordre des colonnes
#[derive(Debug, Serialize)]
struct TransactionRow<'a> {
    id: i32,
    timestamp: String,
    tx_type: TxType,
    wallet: &'a str,
    from_asset: &'a str,
    to_asset: &'a str,
    amount: f64,
    price_eur: f64,
    total_eur: f64,
    tx_hash: Option<&'a str>,
}

impl ExportService {
    /// Toutes les transactions de l'utilisateur en CSV (en-tête + une ligne par transaction),
    /// dans le même ordre que GET /transactions
    pub async fn transactions_csv<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Vec<u8>, ServiceError> {
        let wallets: HashMap<i32, String> = WalletService::list_for_user(db, user_id)
            .await?
            .into_iter()
            .map(|w| (w.id, w.name))
            .collect();
        let transactions = TransactionService::list_for_user(db, user_id).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        if transactions.is_empty() {
            // serialize n'écrit l'en-tête qu'avec la première ligne
            writer.write_record([
                "id", "timestamp", "tx_type", "wallet", "from_asset", "to_asset",
                "amount", "price_eur", "total_eur", "tx_hash",
            ])?;
        }

        for tx in &transactions {
            writer.serialize(TransactionRow {
                id: tx.id,
                timestamp: tx.timestamp.to_rfc3339(),
                tx_type: tx.tx_type,
                wallet: wallets.get(&tx.wallet_id).map(String::as_str).unwrap_or(""),
                from_asset: &tx.from_asset,
                to_asset: &tx.to_asset,
                amount: tx.amount,
                price_eur: tx.price_eur,
                total_eur: tx.total_eur,
                tx_hash: tx.tx_hash.as_deref(),
            })?;
        }

        writer.into_inner().map_err(|e| ServiceError::Csv(e.into_error().into()))
    }
}

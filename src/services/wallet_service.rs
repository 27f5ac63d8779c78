use sea_orm::*;

use crate::models::wallets::{self, WalletType};

pub struct WalletService;

impl WalletService {
    /// Tous les wallets d'un utilisateur (actifs ou non), dans l'ordre de création
    pub async fn list_for_user<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Vec<wallets::Model>, DbErr> {
        wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id))
            .order_by_asc(wallets::Column::Id)
            .all(db)
            .await
    }

    /// Récupère un wallet seulement s'il appartient à l'utilisateur
    pub async fn find_owned<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        wallet_id: i32,
    ) -> Result<Option<wallets::Model>, DbErr> {
        wallets::Entity::find_by_id(wallet_id)
            .filter(wallets::Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    /// Crée un wallet vide (solde 0, jamais synchronisé)
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        name: &str,
        wallet_type: WalletType,
    ) -> Result<wallets::Model, DbErr> {
        let wallet = wallets::ActiveModel {
            user_id: Set(user_id),
            name: Set(name.trim().to_string()),
            wallet_type: Set(wallet_type),
            balance_eur: Set(0.0),
            last_synced: Set(None),
            is_active: Set(true),
            ..Default::default()
        };

        wallet.insert(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::Plan;
    use crate::test_support::TestContext;

    #[actix_web::test]
    async fn test_create_and_list_wallets() {
        let ctx = TestContext::new().await;
        let alice = ctx.create_user("alice@example.com", "password123", Plan::Free).await;
        let bob = ctx.create_user("bob@example.com", "password123", Plan::Free).await;

        let kraken = WalletService::create(&ctx.db, alice.id, "Kraken", WalletType::Exchange)
            .await
            .unwrap();
        WalletService::create(&ctx.db, alice.id, "Ledger", WalletType::Wallet).await.unwrap();
        WalletService::create(&ctx.db, bob.id, "Binance", WalletType::Exchange).await.unwrap();

        assert_eq!(kraken.balance_eur, 0.0);
        assert!(kraken.is_active);
        assert!(kraken.last_synced.is_none());

        let names: Vec<String> = WalletService::list_for_user(&ctx.db, alice.id)
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.name)
            .collect();
        assert_eq!(names, vec!["Kraken", "Ledger"]);
    }

    #[actix_web::test]
    async fn test_find_owned_rejects_other_users_wallet() {
        let ctx = TestContext::new().await;
        let alice = ctx.create_user("alice@example.com", "password123", Plan::Free).await;
        let bob = ctx.create_user("bob@example.com", "password123", Plan::Free).await;
        let wallet = ctx.create_wallet(bob.id, "Binance", 12.0).await;

        let owned = WalletService::find_owned(&ctx.db, bob.id, wallet.id).await.unwrap();
        assert!(owned.is_some());

        let foreign = WalletService::find_owned(&ctx.db, alice.id, wallet.id).await.unwrap();
        assert!(foreign.is_none());
    }
}

// Outils partagés par les tests (base en mémoire, utilisateurs, tokens)

use actix_web::web;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::config::AppConfig;
use crate::db::connect_in_memory;
use crate::models::dto::CreateTransactionRequest;
use crate::models::transactions::TxType;
use crate::models::users::{self, Plan};
use crate::models::wallets::{self, WalletType};
use crate::routes;
use crate::services::transaction_service::TransactionService;
use crate::services::user_service::{NewUser, UserService};
use crate::utils::{jwt::JwtKeys, password};

pub const TEST_SECRET: &str = "test-secret-with-at-least-32-characters";

pub struct TestContext {
    pub db: DatabaseConnection,
    pub keys: JwtKeys,
    pub config: AppConfig,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_free_limit(50).await
    }

    pub async fn with_free_limit(limit: u64) -> Self {
        let limit = limit.to_string();
        let config = AppConfig::from_lookup(|key| match key {
            "JWT_SECRET" => Some(TEST_SECRET.to_string()),
            "DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "FREE_TX_LIMIT" => Some(limit.clone()),
            _ => None,
        })
        .expect("test config");

        Self {
            db: connect_in_memory().await,
            keys: JwtKeys::from_config(&config),
            config,
        }
    }

    /// Enregistre l'état partagé et les routes, comme dans main
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.db.clone()))
            .app_data(web::Data::new(self.keys.clone()))
            .app_data(web::Data::new(self.config.clone()))
            .configure(routes::configure_routes);
    }

    pub async fn create_user(&self, email: &str, password: &str, plan: Plan) -> users::Model {
        let new_user = NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            hashed_password: password::hash_password(password).expect("hash"),
            plan,
        };
        UserService::create(&self.db, new_user).await.expect("create user")
    }

    pub fn token_for(&self, user: &users::Model) -> String {
        self.keys.issue(&user.email).expect("token")
    }

    /// Wallet avec un solde EUR déjà connu
    pub async fn create_wallet(&self, user_id: i32, name: &str, balance_eur: f64) -> wallets::Model {
        wallets::ActiveModel {
            user_id: Set(user_id),
            name: Set(name.to_string()),
            wallet_type: Set(WalletType::Exchange),
            balance_eur: Set(balance_eur),
            last_synced: Set(Some(Utc::now())),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("create wallet")
    }

    pub async fn create_transactions(&self, user: &users::Model, wallet_id: i32, count: usize) {
        for _ in 0..count {
            let request = CreateTransactionRequest {
                wallet_id,
                tx_type: TxType::Buy,
                from_asset: "EUR".to_string(),
                to_asset: "ETH".to_string(),
                amount: 1.0,
                price_eur: 2_500.0,
                timestamp: None,
                tx_hash: None,
            };
            TransactionService::create(&self.db, user, u64::MAX, request)
                .await
                .expect("create transaction");
        }
    }
}

// Data Transfer Objects pour les requêtes et réponses API
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::transactions::TxType;
use super::users::{self, Plan};
use super::wallets::WalletType;

// ---------------------------------------------------------------- auth

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(default)]
    pub plan: Plan,
}

/// Formulaire OAuth2 "password" (username = email), envoyé par le frontend
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginJson {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub plan: Plan,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            plan: user.plan,
        }
    }
}

// Réponse après login/register
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

impl TokenResponse {
    pub fn bearer(access_token: String, user: users::Model) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user: user.into(),
        }
    }
}

// ---------------------------------------------------------------- wallets

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWalletRequest {
    #[validate(length(min = 1, message = "Wallet name must not be empty"))]
    pub name: String,
    pub wallet_type: WalletType,
}

// ---------------------------------------------------------------- transactions

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    pub wallet_id: i32,
    pub tx_type: TxType,
    #[validate(length(min = 1, message = "from_asset must not be empty"))]
    pub from_asset: String,
    #[validate(length(min = 1, message = "to_asset must not be empty"))]
    pub to_asset: String,
    #[validate(range(exclusive_min = 0.0, message = "Amount must be greater than 0"))]
    pub amount: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "price_eur must not be negative"))]
    pub price_eur: f64,
    pub timestamp: Option<DateTime<Utc>>, // Défaut: maintenant
    pub tx_hash: Option<String>,
}

// ---------------------------------------------------------------- dashboard

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub portfolio_value: f64,
    pub total_transactions: u64,
    pub total_wallets: u64,
    pub profit_loss: f64, // Pas encore calculé (FIFO non implémenté)
}

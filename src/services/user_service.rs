use sea_orm::*;
use sea_orm::sea_query::{Expr, Func};
use chrono::Utc;

use crate::models::users::{self, Plan};
use super::ServiceError;

pub struct UserService;

/// Données d'un nouvel utilisateur (mot de passe déjà hashé)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub plan: Plan,
}

impl UserService {
    /// Email tel que saisi, sans espaces autour (la casse est conservée)
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_string()
    }

    /// Recherche insensible à la casse: `Alice@x` et `alice@x` sont le même compte
    pub async fn find_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(users::Column::Email)))
                    .eq(email.trim().to_lowercase()),
            )
            .one(db)
            .await
    }

    /// Crée un utilisateur
    /// Retourne Conflict si l'email existe déjà (vérification + contrainte UNIQUE)
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        new_user: NewUser,
    ) -> Result<users::Model, ServiceError> {
        let email = Self::normalize_email(&new_user.email);

        if Self::find_by_email(db, &email).await?.is_some() {
            return Err(ServiceError::Conflict("Email already registered".to_string()));
        }

        let user = users::ActiveModel {
            email: Set(email),
            name: Set(new_user.name.trim().to_string()),
            hashed_password: Set(new_user.hashed_password),
            plan: Set(new_user.plan),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        // Deux inscriptions simultanées: la contrainte UNIQUE tranche
        user.insert(db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ServiceError::Conflict("Email already registered".to_string())
            }
            _ => ServiceError::Database(e),
        })
    }
}

use actix_web::{get, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::dashboard_service::DashboardService;

/// GET /dashboard/stats - Valeur du portefeuille et compteurs (PROTÉGÉE)
#[get("/stats")]
pub async fn get_stats(
    auth_user: AuthUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let stats = DashboardService::stats(db.get_ref(), auth_user.user.id).await?;
    Ok(HttpResponse::Ok().json(stats))
}

pub fn dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            .service(get_stats)
    );
}

use crate::models::common::HealthReply;
use axum::Json;

/// 健康检查
#[utoipa::path(get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthReply)
    )
)]
pub async fn health_check() -> Json<HealthReply> {
    Json(HealthReply {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

use actix_web::{web, HttpResponse, Responder};
use humantime::format_duration;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{constants::START_TIME, repositories::experience::ExperienceRepository, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub database: String,
    pub uptime: String,
    pub start_at: String,
    pub version: String,
}

pub async fn health_check<R>(state: web::Data<AppState<R>>) -> impl Responder
where
    R: ExperienceRepository + 'static,
{
    let uptime = Utc::now().signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    let db_status = match state.experience_handler.experience_repo.check_connection().await {
        Ok(_) => "OK",
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            "Unavailable"
        }
    };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "healthy".to_string(),
        database: db_status.to_string(),
        uptime: human_uptime.to_string(),
        start_at: START_TIME.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

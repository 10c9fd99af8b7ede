use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app: String,
    app_version: &'static str,
    store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_error: Option<String>,
    capacity: u32,
    time: String,
}

/// Liveness plus a store round trip. Always 200 so the body can say what
/// is wrong; `status` is "degraded" when the store does not answer.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (status, store, store_error) = match app_state.store().ping().await {
        Ok(()) => ("ok", "ok", None),
        Err(e) => ("degraded", "error", Some(e.to_string())),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status,
        app: app_state.config().app_title.clone(),
        app_version: env!("CARGO_PKG_VERSION"),
        store,
        store_error,
        capacity: app_state.config().capacity,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}

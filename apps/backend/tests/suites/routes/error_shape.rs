use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, HttpResponse};
use parley_backend::config::game::GameConfig;
use parley_backend::errors::ErrorCode;
use parley_backend::state::app_state::AppState;
use parley_backend::AppError;
use parley_test_support::assert_problem_details;

use crate::support::create_test_app;
use crate::support::faulty_stores::UnavailableStore;

async fn timeout_error() -> Result<HttpResponse, AppError> {
    Err(AppError::timeout("Database timeout"))
}

async fn internal_error() -> Result<HttpResponse, AppError> {
    Err(AppError::internal("boom"))
}

async fn generic_conflict() -> Result<HttpResponse, AppError> {
    Err(AppError::conflict(ErrorCode::Conflict, "Unique constraint violation"))
}

#[actix_web::test]
async fn fixed_errors_render_as_problem_details() {
    let app = create_test_app(AppState::in_memory(GameConfig::default()))
        .with_routes(|cfg| {
            cfg.route("/timeout", web::get().to(timeout_error))
                .route("/internal", web::get().to(internal_error))
                .route("/conflict", web::get().to(generic_conflict));
        })
        .build()
        .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/timeout").to_request()).await;
    assert_eq!(resp.headers().get("Retry-After").unwrap(), "1");
    assert_problem_details(resp, StatusCode::GATEWAY_TIMEOUT, "DB_TIMEOUT", None).await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/internal").to_request()).await;
    assert!(resp.headers().get("Retry-After").is_none());
    assert_problem_details(resp, StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", Some("boom"))
        .await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/conflict").to_request()).await;
    assert_problem_details(resp, StatusCode::CONFLICT, "CONFLICT", None).await;
}

#[actix_web::test]
async fn store_outage_is_503_with_retry_after() {
    let state = AppState::new(Arc::new(UnavailableStore::default()), GameConfig::default());
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post().uri("/api/join").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("Retry-After").unwrap(), "1");
    assert_problem_details(
        resp,
        StatusCode::SERVICE_UNAVAILABLE,
        "DB_UNAVAILABLE",
        Some("unavailable"),
    )
    .await;
}

use actix_web::web;

pub mod game;
pub mod health;

/// Register every route. `main.rs` wraps the same configuration in the
/// CORS and tracing middleware; tests mount it directly.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Session API: /api/**
    cfg.service(web::scope("/api").configure(game::configure_routes));
}

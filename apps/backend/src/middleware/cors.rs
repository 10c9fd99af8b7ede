use actix_cors::Cors;
use actix_web::http::header;

/// CORS for a browser UI hosted on another origin.
///
/// Any origin may call; only the methods and headers the API uses are
/// allowed, and `x-trace-id` is readable so clients can quote it.
pub fn cors_middleware() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .max_age(3600)
}

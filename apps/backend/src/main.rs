use actix_web::{web, App, HttpServer};
use parley_backend::config::db::DbSettings;
use parley_backend::config::game::GameConfig;
use parley_backend::infra::state::build_state;
use parley_backend::middleware::cors::cors_middleware;
use parley_backend::middleware::request_trace::RequestTrace;
use parley_backend::middleware::structured_logger::StructuredLogger;
use parley_backend::middleware::trace_span::TraceSpan;
use parley_backend::routes;
use parley_backend::telemetry::{self, LogFormat};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing(LogFormat::from_env());

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT") {
        Ok(raw) => match raw.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                error!(value = %raw, "BACKEND_PORT must be a valid port number");
                std::process::exit(1);
            }
        },
        Err(_) => 3001,
    };

    let (game_config, db_settings) = match (GameConfig::from_env(), DbSettings::from_env()) {
        (Ok(game), Ok(db)) => (game, db),
        (Err(e), _) | (_, Err(e)) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        store = ?db_settings.kind,
        path = %db_settings.sqlite_path.display(),
        capacity = game_config.capacity,
        "starting {}", game_config.app_title
    );

    let app_state = match build_state()
        .with_config(game_config)
        .with_db(db_settings)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);

    info!(%host, port, "listening");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

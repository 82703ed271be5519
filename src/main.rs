use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use once_cell::sync::Lazy;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;
use workexperience_api::{
    constants::START_TIME,
    db::postgres::{bootstrap, create_pool},
    graceful_shutdown::shutdown_signal,
    repositories::sqlx_repo::SqlxExperienceRepo,
    routes::configure_routes,
    settings::AppConfig,
    web::cors::build_cors,
    AppState
};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::new();
    init_tracing(config.as_ref().is_ok_and(|cfg| cfg.is_production()));
    Lazy::force(&START_TIME);

    let config = match config {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        },
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = create_pool(&config);

    bootstrap(&pool).await;

    let app_state = web::Data::new(AppState::new(pool.clone()));
    let cors_origins = config.cors_origins();
    let server_addr = config.server_addr();

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(build_cors(&cors_origins))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes::<SqlxExperienceRepo>)
    })
    .workers(config.worker_count)
    .disable_signals()
    .bind(server_addr)?
    .run();

    let handle = server.handle();

    let result = tokio::select! {
        res = server => res,
        _ = shutdown_signal() => {
            handle.stop(true).await;
            Ok(())
        }
    };

    pool.close().await;
    tracing::info!("Database pool closed");

    result
}

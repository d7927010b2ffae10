use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use portfolio_site::{
    background_task::start_limiter_sweeper,
    constants::START_TIME,
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    mail::mailer::{DisabledMailer, Mailer, SmtpMailer},
    routes::configure_routes,
    settings::AppConfig,
    shared_repos::SharedRepositories,
    AppState,
};
use once_cell::sync::Lazy;
use tokio::time::Duration;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_cors(config: &AppConfig) -> Cors {
    let origins = config.cors_origins();
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers(vec![
            header::RETRY_AFTER,
            header::HeaderName::from_static("x-ratelimit-limit"),
            header::HeaderName::from_static("x-ratelimit-remaining"),
            header::HeaderName::from_static("x-ratelimit-reset"),
        ])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors.allow_any_origin()
    } else {
        origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

fn build_mailer(config: &AppConfig) -> Arc<dyn Mailer> {
    match SmtpMailer::from_config(config) {
        Ok(Some(mailer)) => {
            tracing::info!("SMTP notifications enabled via {}", config.email_host);
            Arc::new(mailer)
        }
        Ok(None) => {
            tracing::warn!("EMAIL_USER/EMAIL_PASS not set; contact notifications are disabled");
            Arc::new(DisabledMailer)
        }
        Err(e) => {
            tracing::error!("Mail configuration error, notifications disabled: {}", e);
            Arc::new(DisabledMailer)
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    Lazy::force(&START_TIME);
    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    let pool = match create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        std::process::exit(1);
    }

    let mailer = build_mailer(&config);
    let state = AppState::new(config.clone(), SharedRepositories::new(pool), mailer);
    let limiter = state.contact_limiter.clone();
    let app_state = web::Data::new(state);

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(build_cors(&cors_config))
            .wrap(NormalizePath::trim())
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .bind(server_addr)?
    .run();

    tokio::spawn(start_limiter_sweeper(
        limiter.clone(),
        Duration::from_secs(config.rate_limit_sweep_interval_secs),
    ));

    tokio::select! {
        res = server => res,
        received = shutdown_signal() => {
            tracing::warn!(
                "🛑 {} received, shutting down with {} rate-limited clients tracked",
                received,
                limiter.tracked_clients()
            );
            Ok(())
        }
    }
}

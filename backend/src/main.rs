use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod services;

use auth::rate_limit::{spawn_cleanup_worker, RateLimitState};
use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: RateLimitState,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hard75_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let db = db::create_pool(&config).await;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let rate_limiter = RateLimitState::new(
        config.auth_rate_limit_max,
        config.auth_rate_limit_window_secs,
    );
    spawn_cleanup_worker(rate_limiter.clone());

    let state = AppState {
        db,
        config: config.clone(),
        rate_limiter,
    };

    let app = routes::app(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listen address");
    // Client IP feeds the auth rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}

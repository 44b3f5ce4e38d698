use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::{auth, handlers, AppState};

pub fn app(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .merge(auth_routes);

    let protected_routes = Router::new()
        .route("/api/me", get(handlers::auth::me))
        .route("/api/users", get(handlers::auth::list_users))
        // Daily logs
        .route(
            "/api/daily-logs",
            post(handlers::daily_logs::upsert_daily_log).get(handlers::daily_logs::list_daily_logs),
        )
        .route("/api/daily-logs/:date", get(handlers::daily_logs::get_daily_log))
        // Progress
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/api/badges", get(handlers::badges::list_badges))
        .route("/api/leaderboard", get(handlers::leaderboard::get_leaderboard))
        .route("/api/challenges", get(handlers::challenges::get_challenges))
        // Matched routes only, so unknown paths still fall through to 404
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{handlers, middleware_layer, state::AppState};

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("⚠️ Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::COOKIE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(86400))
}

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    let require_auth =
        || from_fn_with_state(state.clone(), middleware_layer::auth::require_auth);

    let public_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route(
            "/api/jobs",
            get(handlers::jobs::list_jobs)
                .merge(post(handlers::jobs::create_job).route_layer(require_auth())),
        )
        .route("/api/jobs/{job_id}", get(handlers::jobs::get_job))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/auth/session", get(handlers::auth::current_session))
        .route(
            "/api/jobs/{job_id}/apply",
            post(handlers::applications::apply),
        )
        .route(
            "/api/applications",
            get(handlers::applications::list_applications),
        )
        .route_layer(require_auth())
        .with_state(state.clone());

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
        .layer(cors_layer(&state.config.allowed_origins))
        .fallback_service(ServeDir::new(&state.config.static_dir))
}

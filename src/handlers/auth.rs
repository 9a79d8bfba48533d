use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use garde::Validate;
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};
use tower_cookies::cookie::time::Duration;

use crate::{
    config::Config,
    error::Result,
    middleware_layer::auth::{purge_token_cookie, TOKEN_COOKIE},
    models::user::{Identity, NewUser, Role},
    services::auth as auth_service,
    state::AppState,
    validation::fields::{not_blank, validate_payload},
};

/// The request payload for user registration.
#[derive(Deserialize, Validate, Debug)]
pub struct RegisterRequest {
    #[garde(custom(not_blank))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 8, max = 128))]
    pub password: String,
    /// Defaults to applicant, like the sign-up form.
    #[garde(skip)]
    pub role: Option<Role>,
}

/// The request payload for user login.
#[derive(Deserialize, Validate, Debug)]
pub struct LoginRequest {
    #[garde(custom(not_blank))]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
}

/// The response payload for authentication-related requests.
#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: Identity,
}

/// A response carrying only a status message.
#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Creates the session cookie holding `token`.
fn create_token_cookie(token: String, config: &Config) -> Cookie<'static> {
    let mut cookie = Cookie::new(TOKEN_COOKIE, token);

    cookie.set_http_only(true);
    if config.secure_cookies {
        cookie.set_secure(true);
    }

    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::hours(config.session_duration_hours));
    cookie.set_path("/");

    cookie
}

/// Handles user registration.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response> {
    tracing::info!("📝 Register attempt: {}", payload.email);
    validate_payload(&payload)?;

    let fields = NewUser {
        name: payload.name,
        email: payload.email,
        password: payload.password,
        role: payload.role.unwrap_or(Role::Applicant),
    };

    let (user, token) = auth_service::register(&state, fields, Utc::now()).await?;
    cookies.add(create_token_cookie(token, &state.config));

    tracing::info!("✅ User registered: {} ({})", user.id(), user.role());

    let response = AuthResponse {
        success: true,
        message: "Registration successful. Welcome!".to_string(),
        user,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Handles user login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<Response> {
    tracing::info!("🔐 Login attempt: {}", payload.email);
    validate_payload(&payload)?;

    let (user, token) =
        auth_service::login(&state, &payload.email, &payload.password, Utc::now()).await?;
    cookies.add(create_token_cookie(token, &state.config));

    tracing::info!("✅ User logged in: {}", user.id());

    let response = AuthResponse {
        success: true,
        message: "Login successful".to_string(),
        user,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Handles user logout. Works with or without a valid session.
#[axum::debug_handler]
pub async fn logout(cookies: Cookies) -> Response {
    purge_token_cookie(&cookies);
    tracing::info!("👋 Session cookie cleared");

    let response = MessageResponse {
        success: true,
        message: "Logout successful".to_string(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Returns the identity behind the current session.
#[axum::debug_handler]
pub async fn current_session(Extension(user): Extension<Identity>) -> Json<Identity> {
    Json(user)
}

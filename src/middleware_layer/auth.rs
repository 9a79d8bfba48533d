use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tower_cookies::{Cookie, Cookies};

use crate::{
    error::{AppError, Result},
    services::session,
    state::AppState,
};

/// The cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// Extracts the session token from the request cookies.
///
/// # Arguments
///
/// * `cookies` - The request cookies.
///
/// # Returns
///
/// An `Option` containing the token if a non-empty one was sent.
fn extract_session_token(cookies: &Cookies) -> Option<String> {
    cookies
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Asks the client to drop its session token.
///
/// # Arguments
///
/// * `cookies` - The request cookies.
pub fn purge_token_cookie(cookies: &Cookies) {
    let mut cookie = Cookie::new(TOKEN_COOKIE, "");
    cookie.set_path("/");
    cookies.remove(cookie);
}

/// A middleware that requires a valid session token.
///
/// On success the resolved `Identity` is inserted into the request
/// extensions. When the token is expired or invalid, or its user record
/// cannot be read, the token is purged from the client before the request
/// is rejected.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cookies` - The request cookies.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// A `Response` or an error `AppError`.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    tracing::debug!("🔐 Checking authentication...");

    let token = extract_session_token(&cookies).ok_or_else(|| {
        tracing::debug!("❌ No token cookie found");
        AppError::SessionInvalid
    })?;

    let identity = match session::resolve_session(&state.store, &token, Utc::now()).await {
        Ok(identity) => identity,
        Err(
            e @ (AppError::SessionExpired
            | AppError::SessionInvalid
            | AppError::StoreReadFailure(_)),
        ) => {
            tracing::warn!("❌ Rejected session token: {}", e);
            purge_token_cookie(&cookies);
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    tracing::debug!("✅ User authenticated: {}", identity.id());

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

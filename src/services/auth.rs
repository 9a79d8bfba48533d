use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};
use crate::models::user::{Identity, NewUser};
use crate::repositories::user as user_repo;
use crate::services::session;
use crate::state::AppState;

/// Compares two credentials in constant time.
fn credentials_match(given: &str, stored: &str) -> bool {
    given.as_bytes().ct_eq(stored.as_bytes()).into()
}

/// Checks an email/password pair and opens a session for the user.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `email` - The user's email.
/// * `password` - The user's password.
/// * `now` - The current instant.
///
/// # Returns
///
/// A `Result` containing the user's `Identity` and session token. Unknown
/// emails and wrong passwords both yield `InvalidCredentials`.
pub async fn login(
    state: &AppState,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<(Identity, String)> {
    tracing::debug!("🔐 Authenticating user: {}", email);

    let user = user_repo::find_by_email(&state.store, email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !credentials_match(password, &user.account().password) {
        return Err(AppError::InvalidCredentials);
    }

    let token = session::create_session(&user, state.config.session_duration(), now)?;
    tracing::info!("✅ User authenticated: {}", user.id());

    let identity = session::identity_for(&state.store, user).await?;
    Ok((identity, token))
}

/// Registers a new user and opens a session for them straight away.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `fields` - The registration fields.
/// * `now` - The current instant.
///
/// # Returns
///
/// A `Result` containing the new user's `Identity` and session token.
pub async fn register(
    state: &AppState,
    fields: NewUser,
    now: DateTime<Utc>,
) -> Result<(Identity, String)> {
    tracing::debug!("📝 Registering user: {}", fields.email);

    let user = user_repo::create_user(&state.store, fields).await?;
    let token = session::create_session(&user, state.config.session_duration(), now)?;

    let identity = session::identity_for(&state.store, user).await?;
    Ok((identity, token))
}

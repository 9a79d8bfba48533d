use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, Result},
    models::{
        session::SessionClaims,
        user::{Identity, User},
    },
    repositories::{application as application_repo, user as user_repo},
    storage::Store,
};

/// Encodes claims as base64 of their JSON.
pub fn encode_claims(claims: &SessionClaims) -> Result<String> {
    let json = sonic_rs::to_string(claims)
        .map_err(|e| AppError::Internal(format!("Session serialization failed: {}", e)))?;
    Ok(general_purpose::STANDARD.encode(json))
}

/// Decodes a token produced by [`encode_claims`].
///
/// # Arguments
///
/// * `token` - The encoded session token.
///
/// # Returns
///
/// A `Result` containing the `SessionClaims`, or `SessionInvalid`.
pub fn decode_token(token: &str) -> Result<SessionClaims> {
    let bytes = general_purpose::STANDARD.decode(token.trim()).map_err(|e| {
        tracing::debug!("❌ Token is not base64: {}", e);
        AppError::SessionInvalid
    })?;

    sonic_rs::from_slice(&bytes).map_err(|e| {
        tracing::debug!("❌ Token payload is not valid JSON: {}", e);
        AppError::SessionInvalid
    })
}

/// Creates a session token for a user.
///
/// # Arguments
///
/// * `user` - The user the session belongs to.
/// * `duration` - How long the token stays valid.
/// * `now` - The current instant.
///
/// # Returns
///
/// A `Result` containing the encoded token, which expires `duration` after
/// `now`.
pub fn create_session(user: &User, duration: chrono::Duration, now: DateTime<Utc>) -> Result<String> {
    let expires_at = now
        .checked_add_signed(duration)
        .ok_or_else(|| AppError::Internal("Session expiry out of range".to_string()))?;

    let claims = SessionClaims {
        id: user.id(),
        email: user.email().to_string(),
        role: user.role(),
        exp: expires_at.timestamp_millis(),
    };
    encode_claims(&claims)
}

/// Resolves a token into the identity of the user it names.
///
/// The returned profile comes from the store, not from the token.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `token` - The encoded session token.
/// * `now` - The current instant.
///
/// # Returns
///
/// A `Result` containing the `Identity`. Fails with `SessionInvalid` when
/// the token does not decode or its user does not exist, and with
/// `SessionExpired` once `now` reaches the expiry.
pub async fn resolve_session(store: &Store, token: &str, now: DateTime<Utc>) -> Result<Identity> {
    let claims = decode_token(token)?;

    if claims.exp <= now.timestamp_millis() {
        tracing::debug!("❌ Session expired for user: {}", claims.id);
        return Err(AppError::SessionExpired);
    }

    let user = user_repo::find_by_id(store, claims.id).await?.ok_or_else(|| {
        tracing::warn!("❌ Session names unknown user: {}", claims.id);
        AppError::SessionInvalid
    })?;

    identity_for(store, user).await
}

/// Attaches the applied jobs of applicants and strips the credential.
///
/// An unreadable applied-jobs entry is treated as empty so the user can
/// still sign in.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `user` - The stored user.
///
/// # Returns
///
/// A `Result` containing the user's `Identity`.
pub async fn identity_for(store: &Store, user: User) -> Result<Identity> {
    let applied = match user {
        User::Applicant(ref account) => {
            match application_repo::applied_jobs(store, account.id).await {
                Ok(applied) => applied,
                Err(AppError::StoreReadFailure(key)) => {
                    tracing::warn!("⚠️ Ignoring unreadable entry {} for user {}", key, account.id);
                    Vec::new()
                }
                Err(e) => return Err(e),
            }
        }
        User::Employer(_) => Vec::new(),
    };
    Ok(user.into_identity(applied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use chrono::Duration;

    async fn applicant(store: &Store) -> User {
        user_repo::find_by_id(store, 2).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn token_resolves_until_it_expires() {
        let store = Store::in_memory();
        let user = applicant(&store).await;
        let now = Utc::now();
        let token = create_session(&user, Duration::hours(24), now).unwrap();

        let identity = resolve_session(&store, &token, now + Duration::hours(23))
            .await
            .unwrap();
        assert_eq!(identity.id(), 2);
        assert_eq!(identity.role(), Role::Applicant);

        let err = resolve_session(&store, &token, now + Duration::hours(24))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SessionExpired));
    }

    #[tokio::test]
    async fn resolved_applicant_carries_applied_jobs() {
        let store = Store::in_memory();
        application_repo::append_unique(&store, 2, 3).await.unwrap();
        let token = create_session(&applicant(&store).await, Duration::hours(1), Utc::now()).unwrap();

        let identity = resolve_session(&store, &token, Utc::now()).await.unwrap();
        assert!(matches!(identity, Identity::Applicant { ref applied_jobs, .. } if applied_jobs == &vec![3]));
    }

    #[tokio::test]
    async fn unreadable_applied_jobs_resolve_as_empty() {
        let store = Store::in_memory();
        store
            .backend()
            .set("2_appliedJobs", "{broken".to_string())
            .await
            .unwrap();
        let token = create_session(&applicant(&store).await, Duration::hours(1), Utc::now()).unwrap();

        let identity = resolve_session(&store, &token, Utc::now()).await.unwrap();
        assert!(matches!(identity, Identity::Applicant { ref applied_jobs, .. } if applied_jobs.is_empty()));
    }

    #[test]
    fn out_of_range_expiry_is_an_error_not_a_panic() {
        let user = crate::seed::demo_users().remove(0);
        let err = create_session(&user, Duration::MAX, Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn token_is_plain_base64_json() {
        let claims = SessionClaims {
            id: 1,
            email: "employer@example.com".to_string(),
            role: Role::Employer,
            exp: 42,
        };
        let token = encode_claims(&claims).unwrap();
        let json = general_purpose::STANDARD.decode(&token).unwrap();

        assert!(String::from_utf8(json).unwrap().contains(r#""role":"employer""#));
        assert_eq!(decode_token(&token).unwrap(), claims);
    }

    #[tokio::test]
    async fn garbage_and_unknown_users_are_invalid() {
        let store = Store::in_memory();
        let now = Utc::now();

        for token in ["", "not base64!", "bm90IGpzb24="] {
            let err = resolve_session(&store, token, now).await.unwrap_err();
            assert!(matches!(err, AppError::SessionInvalid), "token {:?}", token);
        }

        let ghost = encode_claims(&SessionClaims {
            id: 99,
            email: "ghost@example.com".to_string(),
            role: Role::Applicant,
            exp: (now + Duration::hours(1)).timestamp_millis(),
        })
        .unwrap();
        let err = resolve_session(&store, &ghost, now).await.unwrap_err();
        assert!(matches!(err, AppError::SessionInvalid));
    }
}

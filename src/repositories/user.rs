use crate::{
    error::{AppError, Result},
    models::user::{Account, NewUser, User},
    seed,
    storage::Store,
};

/// The store key holding every account.
pub const USERS_KEY: &str = "users";

/// Writes the demo accounts if the store has none yet.
///
/// # Arguments
///
/// * `store` - The record store.
///
/// # Returns
///
/// A `Result<()>`.
pub async fn ensure_seeded(store: &Store) -> Result<()> {
    let _guard = store.lock_writes().await;
    if store.backend().get(USERS_KEY).await?.is_none() {
        store.write_json(USERS_KEY, &seed::demo_users()).await?;
        tracing::info!("🌱 Seeded demo users");
    }
    Ok(())
}

/// Lists every account.
///
/// # Arguments
///
/// * `store` - The record store.
///
/// # Returns
///
/// A `Result` containing the stored users, or the demo accounts when
/// nothing was stored yet.
pub async fn list_users(store: &Store) -> Result<Vec<User>> {
    Ok(store
        .read_json::<Vec<User>>(USERS_KEY)
        .await?
        .unwrap_or_else(seed::demo_users))
}

/// Finds a user by their email address. The match is exact.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `email` - The email address to look up.
///
/// # Returns
///
/// A `Result` containing an `Option<User>`.
pub async fn find_by_email(store: &Store, email: &str) -> Result<Option<User>> {
    Ok(list_users(store)
        .await?
        .into_iter()
        .find(|user| user.email() == email))
}

/// Finds a user by their ID.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `user_id` - The ID of the user.
///
/// # Returns
///
/// A `Result` containing an `Option<User>`.
pub async fn find_by_id(store: &Store, user_id: u64) -> Result<Option<User>> {
    Ok(list_users(store)
        .await?
        .into_iter()
        .find(|user| user.id() == user_id))
}

/// Creates a new user with the next free ID.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `fields` - The registration fields.
///
/// # Returns
///
/// A `Result` containing the created `User`. Fails with `DuplicateEmail`,
/// leaving the store untouched, when the email is already registered.
pub async fn create_user(store: &Store, fields: NewUser) -> Result<User> {
    let _guard = store.lock_writes().await;
    let mut users = list_users(store).await?;

    if users.iter().any(|user| user.email() == fields.email) {
        return Err(AppError::DuplicateEmail);
    }

    let id = users.iter().map(User::id).max().map_or(1, |max| max + 1);
    let user = User::new(
        fields.role,
        Account {
            id,
            name: fields.name,
            email: fields.email,
            password: fields.password,
        },
    );

    users.push(user.clone());
    store.write_json(USERS_KEY, &users).await?;

    tracing::info!("✅ User created with ID: {}", id);
    Ok(user)
}

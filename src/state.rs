use crate::config::Config;
use crate::error::Result;
use crate::repositories::{job as job_repo, user as user_repo};
use crate::storage::{self, Store};

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The record store.
    pub store: Store,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates a new `AppState`, opening the configured store and seeding
    /// the demo records on first run.
    pub async fn new(config: &Config) -> Result<Self> {
        let store = storage::open(config).await?;

        job_repo::ensure_seeded(&store).await?;
        user_repo::ensure_seeded(&store).await?;
        tracing::info!("✅ Record store ready");

        Ok(AppState {
            store,
            config: config.clone(),
        })
    }

    /// A state over an empty in-memory store. Reads fall back to the demo
    /// records until something is written.
    pub fn in_memory(config: Config) -> Self {
        AppState {
            store: Store::in_memory(),
            config,
        }
    }
}

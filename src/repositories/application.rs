use crate::{
    error::{AppError, Result},
    storage::Store,
};

/// The store key holding a user's applied job IDs.
pub fn applied_jobs_key(user_id: u64) -> String {
    format!("{}_appliedJobs", user_id)
}

/// Returns the job IDs a user applied to.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `user_id` - The ID of the applicant.
///
/// # Returns
///
/// A `Result` containing the applied job IDs, empty if none were stored.
pub async fn applied_jobs(store: &Store, user_id: u64) -> Result<Vec<u64>> {
    Ok(store
        .read_json::<Vec<u64>>(&applied_jobs_key(user_id))
        .await?
        .unwrap_or_default())
}

/// Appends `job_id` to the user's list unless it is already there, and
/// persists the whole list.
///
/// The check and the write happen under the store's write lock.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `user_id` - The ID of the applicant.
/// * `job_id` - The ID of the job applied to.
///
/// # Returns
///
/// A `Result` containing the updated list, or `AlreadyApplied` if the ID
/// was present.
pub async fn append_unique(store: &Store, user_id: u64, job_id: u64) -> Result<Vec<u64>> {
    let _guard = store.lock_writes().await;
    let mut applied = applied_jobs(store, user_id).await?;

    if applied.contains(&job_id) {
        return Err(AppError::AlreadyApplied(job_id));
    }

    applied.push(job_id);
    store.write_json(&applied_jobs_key(user_id), &applied).await?;

    tracing::debug!("User {} now has {} applications", user_id, applied.len());
    Ok(applied)
}

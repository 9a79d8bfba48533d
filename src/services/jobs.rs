use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, Result},
    models::{
        job::{JobPosting, NewJob},
        user::Identity,
    },
    repositories::job as job_repo,
    services::search,
    storage::Store,
};

/// Lists the postings, narrowed by a search term.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `term` - The search term, if any.
///
/// # Returns
///
/// A `Result` containing the matching `JobPosting`s.
pub async fn list_jobs(store: &Store, term: Option<&str>) -> Result<Vec<JobPosting>> {
    let jobs = job_repo::list_jobs(store).await?;
    Ok(match term {
        Some(term) => search::filter(&jobs, term),
        None => jobs,
    })
}

/// Gets a single posting.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `job_id` - The ID of the posting.
///
/// # Returns
///
/// A `Result` containing the `JobPosting`, or `NotFound`.
pub async fn get_job(store: &Store, job_id: u64) -> Result<JobPosting> {
    job_repo::find_by_id(store, job_id).await?.ok_or(AppError::NotFound)
}

/// Posts a job on behalf of an employer.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `identity` - The caller. Must be an employer.
/// * `fields` - The submitted posting fields.
/// * `now` - The current instant.
///
/// # Returns
///
/// A `Result` containing the created `JobPosting`.
pub async fn post_job(
    store: &Store,
    identity: &Identity,
    fields: NewJob,
    now: DateTime<Utc>,
) -> Result<JobPosting> {
    let Identity::Employer(profile) = identity else {
        return Err(AppError::Forbidden("Only employers can post jobs".to_string()));
    };

    job_repo::create_job(store, fields, profile, now).await
}

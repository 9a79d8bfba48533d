use chrono::{DateTime, Utc};

use crate::{
    error::Result,
    models::{
        job::{JobPosting, NewJob},
        user::Profile,
    },
    seed,
    storage::Store,
};

/// The store key holding every posting.
pub const JOBS_KEY: &str = "jobs";

/// Splits a comma-separated requirements string into trimmed entries,
/// keeping their order.
pub fn parse_requirements(raw: &str) -> Vec<String> {
    raw.split(',').map(|r| r.trim().to_string()).collect()
}

/// Writes the demo postings if the store has none yet.
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
    if store.backend().get(JOBS_KEY).await?.is_none() {
        store.write_json(JOBS_KEY, &seed::demo_jobs()).await?;
        tracing::info!("🌱 Seeded demo job postings");
    }
    Ok(())
}

/// Lists every posting.
///
/// # Arguments
///
/// * `store` - The record store.
///
/// # Returns
///
/// A `Result` containing the stored postings, or the demo set when nothing
/// was stored yet. A corrupted entry yields `StoreReadFailure`.
pub async fn list_jobs(store: &Store) -> Result<Vec<JobPosting>> {
    Ok(store
        .read_json::<Vec<JobPosting>>(JOBS_KEY)
        .await?
        .unwrap_or_else(seed::demo_jobs))
}

/// Finds a posting by its ID.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `job_id` - The ID of the posting.
///
/// # Returns
///
/// A `Result` containing an `Option<JobPosting>`.
pub async fn find_by_id(store: &Store, job_id: u64) -> Result<Option<JobPosting>> {
    Ok(list_jobs(store).await?.into_iter().find(|job| job.id == job_id))
}

/// Appends a new posting owned by `employer`.
///
/// The ID is `now` in milliseconds, bumped past the highest existing ID so
/// it is never reused. A missing or blank company falls back to the
/// employer's name.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `fields` - The submitted posting fields.
/// * `employer` - The profile of the posting employer.
/// * `now` - The current instant.
///
/// # Returns
///
/// A `Result` containing the created `JobPosting`.
pub async fn create_job(
    store: &Store,
    fields: NewJob,
    employer: &Profile,
    now: DateTime<Utc>,
) -> Result<JobPosting> {
    let _guard = store.lock_writes().await;
    let mut jobs = list_jobs(store).await?;

    let time_id = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let next_free = jobs.iter().map(|job| job.id).max().map_or(1, |max| max + 1);

    let company = fields
        .company
        .filter(|company| !company.trim().is_empty())
        .unwrap_or_else(|| employer.name.clone());

    let job = JobPosting {
        id: time_id.max(next_free),
        title: fields.title,
        company,
        location: fields.location,
        description: fields.description,
        salary: fields.salary,
        requirements: parse_requirements(&fields.requirements),
        employer_id: employer.id,
    };

    jobs.push(job.clone());
    store.write_json(JOBS_KEY, &jobs).await?;

    tracing::info!("✅ Job {} created by employer {}", job.id, employer.id);
    Ok(job)
}

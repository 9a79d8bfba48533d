use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    models::{
        job::{JobPosting, NewJob},
        user::Identity,
    },
    services::jobs as job_service,
    state::AppState,
    validation::fields::{not_blank, validate_payload},
};

/// The query parameters for listing jobs.
#[derive(Deserialize)]
pub struct ListJobsQuery {
    /// Search term matched against title, company and location.
    #[serde(default)]
    pub q: Option<String>,
}

/// The response payload for job listings.
#[derive(Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobPosting>,
    pub count: usize,
}

/// The request payload for posting a job.
#[derive(Deserialize, Validate, Debug)]
pub struct CreateJobRequest {
    #[garde(custom(not_blank))]
    pub title: String,
    /// Defaults to the employer's name when absent or blank.
    #[garde(skip)]
    pub company: Option<String>,
    #[garde(custom(not_blank))]
    pub location: String,
    #[garde(custom(not_blank))]
    pub description: String,
    #[garde(custom(not_blank))]
    pub salary: String,
    /// Comma-separated, e.g. "Rust, SQL, Docker".
    #[garde(custom(not_blank))]
    pub requirements: String,
}

/// Lists jobs, optionally filtered by a search term.
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListJobsQuery>,
) -> Result<Json<JobsResponse>> {
    let jobs = job_service::list_jobs(&state.store, query.q.as_deref()).await?;
    tracing::debug!("Listing {} jobs (term: {:?})", jobs.len(), query.q);

    Ok(Json(JobsResponse {
        count: jobs.len(),
        jobs,
    }))
}

/// Gets a single job.
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<u64>,
) -> Result<Json<JobPosting>> {
    let job = job_service::get_job(&state.store, job_id).await?;
    Ok(Json(job))
}

/// Posts a new job. Employers only.
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(user): Extension<Identity>,
    Json(req): Json<CreateJobRequest>,
) -> Result<Response> {
    validate_payload(&req)?;

    let fields = NewJob {
        title: req.title,
        company: req.company,
        location: req.location,
        description: req.description,
        salary: req.salary,
        requirements: req.requirements,
    };

    let job = job_service::post_job(&state.store, &user, fields, Utc::now()).await?;

    Ok((StatusCode::CREATED, Json(job)).into_response())
}

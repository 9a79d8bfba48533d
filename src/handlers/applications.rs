use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use crate::{
    error::Result,
    models::{job::JobPosting, user::Identity},
    services::applications as application_service,
    state::AppState,
};

/// The response payload for a submitted application.
#[derive(Serialize)]
pub struct ApplyResponse {
    pub message: String,
    pub applied_jobs: Vec<u64>,
}

/// Applies the current applicant to a job.
#[axum::debug_handler]
pub async fn apply(
    State(state): State<AppState>,
    Extension(user): Extension<Identity>,
    Path(job_id): Path<u64>,
) -> Result<Json<ApplyResponse>> {
    let applied_jobs = application_service::apply(&state.store, Some(&user), job_id).await?;

    Ok(Json(ApplyResponse {
        message: "Job application submitted successfully!".to_string(),
        applied_jobs,
    }))
}

/// Lists the postings the current applicant applied to.
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(user): Extension<Identity>,
) -> Result<Json<Vec<JobPosting>>> {
    let jobs = application_service::applied_postings(&state.store, Some(&user)).await?;
    Ok(Json(jobs))
}

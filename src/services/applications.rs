use crate::{
    error::{AppError, Result},
    models::{job::JobPosting, user::Identity},
    repositories::{application as application_repo, job as job_repo},
    storage::Store,
};

fn require_applicant(identity: Option<&Identity>) -> Result<u64> {
    match identity {
        Some(Identity::Applicant { profile, .. }) => Ok(profile.id),
        Some(Identity::Employer(_)) => {
            Err(AppError::Forbidden("Only applicants can apply to jobs".to_string()))
        }
        None => Err(AppError::SessionInvalid),
    }
}

/// Records that the applicant applied to a job.
///
/// The stored list is re-read under the write lock, so an identity resolved
/// earlier in the request is enough.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `identity` - The caller, if authenticated. Must be an applicant.
/// * `job_id` - The ID of the job to apply to. The job must exist.
///
/// # Returns
///
/// A `Result` containing the updated list of applied job IDs, or
/// `AlreadyApplied` if the job is already in it.
pub async fn apply(store: &Store, identity: Option<&Identity>, job_id: u64) -> Result<Vec<u64>> {
    let user_id = require_applicant(identity)?;

    if job_repo::find_by_id(store, job_id).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let applied = application_repo::append_unique(store, user_id, job_id).await?;
    tracing::info!("✅ User {} applied to job {}", user_id, job_id);
    Ok(applied)
}

/// Lists the postings the applicant applied to, in application order.
///
/// IDs whose posting no longer exists are skipped.
///
/// # Arguments
///
/// * `store` - The record store.
/// * `identity` - The caller, if authenticated. Must be an applicant.
///
/// # Returns
///
/// A `Result` containing the applied `JobPosting`s.
pub async fn applied_postings(store: &Store, identity: Option<&Identity>) -> Result<Vec<JobPosting>> {
    let user_id = require_applicant(identity)?;
    let applied = application_repo::applied_jobs(store, user_id).await?;
    let jobs = job_repo::list_jobs(store).await?;

    Ok(applied
        .iter()
        .filter_map(|id| jobs.iter().find(|job| job.id == *id).cloned())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Profile;

    fn applicant() -> Identity {
        Identity::Applicant {
            profile: Profile {
                id: 2,
                name: "John Applicant".to_string(),
                email: "applicant@example.com".to_string(),
            },
            applied_jobs: vec![],
        }
    }

    #[tokio::test]
    async fn applying_persists_the_job_id_once() {
        let store = Store::in_memory();
        let identity = applicant();

        assert_eq!(apply(&store, Some(&identity), 2).await.unwrap(), vec![2]);
        assert_eq!(application_repo::applied_jobs(&store, 2).await.unwrap(), vec![2]);

        let err = apply(&store, Some(&identity), 2).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyApplied(2)));
        assert_eq!(application_repo::applied_jobs(&store, 2).await.unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn unknown_job_is_never_recorded() {
        let store = Store::in_memory();
        let err = apply(&store, Some(&applicant()), 77).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound));
        assert!(application_repo::applied_jobs(&store, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn anonymous_and_employers_cannot_apply() {
        let store = Store::in_memory();
        let employer = Identity::Employer(Profile {
            id: 1,
            name: "Jane Employer".to_string(),
            email: "employer@example.com".to_string(),
        });

        assert!(matches!(apply(&store, None, 1).await, Err(AppError::SessionInvalid)));
        assert!(matches!(
            apply(&store, Some(&employer), 1).await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn applied_postings_follow_application_order() {
        let store = Store::in_memory();
        let identity = applicant();
        apply(&store, Some(&identity), 3).await.unwrap();
        apply(&store, Some(&identity), 1).await.unwrap();

        let titles: Vec<_> = applied_postings(&store, Some(&identity))
            .await
            .unwrap()
            .into_iter()
            .map(|job| job.title)
            .collect();
        assert_eq!(titles, vec!["UX Designer", "Frontend Developer"]);
    }
}

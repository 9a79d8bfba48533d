use crate::models::job::JobPosting;

/// Keeps the postings whose title, company or location contains `term`,
/// ignoring case.
///
/// # Arguments
///
/// * `jobs` - The postings to filter.
/// * `term` - The search term. A blank term keeps everything.
///
/// # Returns
///
/// The matching postings, in their original order.
pub fn filter(jobs: &[JobPosting], term: &str) -> Vec<JobPosting> {
    if term.trim().is_empty() {
        return jobs.to_vec();
    }

    let needle = term.to_lowercase();
    jobs.iter()
        .filter(|job| {
            [&job.title, &job.company, &job.location]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

use serde::{Deserialize, Serialize};

/// Represents a job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    /// The unique identifier, assigned at creation.
    pub id: u64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    /// Free-text salary, e.g. "$80,000 - $110,000".
    pub salary: String,
    pub requirements: Vec<String>,
    /// The ID of the employer who posted the job.
    pub employer_id: u64,
}

/// The fields an employer submits for a new posting.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    /// `None` posts under the employer's own name.
    pub company: Option<String>,
    pub location: String,
    pub description: String,
    pub salary: String,
    /// Comma-separated requirements.
    pub requirements: String,
}

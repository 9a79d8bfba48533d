//! Demo records written on first start.

use crate::models::{
    job::JobPosting,
    user::{Account, User},
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The postings shown before anyone has posted.
pub fn demo_jobs() -> Vec<JobPosting> {
    vec![
        JobPosting {
            id: 1,
            title: "Frontend Developer".to_string(),
            company: "Tech Solutions Inc.".to_string(),
            location: "Remote".to_string(),
            description: "We are looking for a skilled frontend developer with React experience to join our team.".to_string(),
            salary: "$80,000 - $110,000".to_string(),
            requirements: strings(&[
                "3+ years React experience",
                "TypeScript knowledge",
                "CSS/SCSS proficiency",
            ]),
            employer_id: 1,
        },
        JobPosting {
            id: 2,
            title: "Backend Engineer".to_string(),
            company: "Data Systems".to_string(),
            location: "New York, NY".to_string(),
            description: "Seeking a backend engineer to help build scalable API services.".to_string(),
            salary: "$90,000 - $120,000".to_string(),
            requirements: strings(&["Node.js", "SQL databases", "API design", "Cloud services"]),
            employer_id: 2,
        },
        JobPosting {
            id: 3,
            title: "UX Designer".to_string(),
            company: "Creative Labs".to_string(),
            location: "San Francisco, CA".to_string(),
            description: "Join our design team to create beautiful and functional user experiences.".to_string(),
            salary: "$85,000 - $105,000".to_string(),
            requirements: strings(&[
                "Portfolio showing UX work",
                "Figma proficiency",
                "3+ years experience",
            ]),
            employer_id: 1,
        },
    ]
}

/// One demo account per role, both with password `password123`.
pub fn demo_users() -> Vec<User> {
    vec![
        User::Employer(Account {
            id: 1,
            name: "Jane Employer".to_string(),
            email: "employer@example.com".to_string(),
            password: "password123".to_string(),
        }),
        User::Applicant(Account {
            id: 2,
            name: "John Applicant".to_string(),
            email: "applicant@example.com".to_string(),
            password: "password123".to_string(),
        }),
    ]
}

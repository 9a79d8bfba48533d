use serde::{Deserialize, Serialize};

/// The two kinds of account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employer,
    Applicant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Employer => f.write_str("employer"),
            Role::Applicant => f.write_str("applicant"),
        }
    }
}

/// Fields shared by every account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The unique identifier for the user.
    pub id: u64,
    /// The user's full name.
    pub name: String,
    /// The user's email address. Unique across users.
    pub email: String,
    /// The user's credential, stored as given.
    pub password: String,
}

/// Represents a user in the system.
///
/// Applicants' applied jobs live in their own store entry and are attached
/// when the user is resolved into an [`Identity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum User {
    Employer(Account),
    Applicant(Account),
}

impl User {
    pub fn new(role: Role, account: Account) -> Self {
        match role {
            Role::Employer => User::Employer(account),
            Role::Applicant => User::Applicant(account),
        }
    }

    pub fn account(&self) -> &Account {
        match self {
            User::Employer(account) | User::Applicant(account) => account,
        }
    }

    pub fn id(&self) -> u64 {
        self.account().id
    }

    pub fn email(&self) -> &str {
        &self.account().email
    }

    pub fn role(&self) -> Role {
        match self {
            User::Employer(_) => Role::Employer,
            User::Applicant(_) => Role::Applicant,
        }
    }

    /// Builds the public view of this user. `applied_jobs` is ignored for
    /// employers.
    pub fn into_identity(self, applied_jobs: Vec<u64>) -> Identity {
        match self {
            User::Employer(account) => Identity::Employer(Profile::from(account)),
            User::Applicant(account) => Identity::Applicant {
                profile: Profile::from(account),
                applied_jobs,
            },
        }
    }
}

/// The fields of an account that may leave the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: u64,
    pub name: String,
    pub email: String,
}

impl From<Account> for Profile {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
        }
    }
}

/// An authenticated user, credential stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Identity {
    Employer(Profile),
    Applicant {
        #[serde(flatten)]
        profile: Profile,
        applied_jobs: Vec<u64>,
    },
}

impl Identity {
    pub fn profile(&self) -> &Profile {
        match self {
            Identity::Employer(profile) | Identity::Applicant { profile, .. } => profile,
        }
    }

    pub fn id(&self) -> u64 {
        self.profile().id
    }

    pub fn role(&self) -> Role {
        match self {
            Identity::Employer(_) => Role::Employer,
            Identity::Applicant { .. } => Role::Applicant,
        }
    }
}

/// The fields submitted at registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

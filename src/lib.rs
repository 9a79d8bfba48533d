//! A small job board: employers post jobs, applicants search and apply.
//!
//! Records live in a key/value store (memory or Redis). Sessions are
//! unsigned base64 tokens carried in a cookie.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
pub mod state;
pub mod storage;

pub mod models {
    pub mod job;
    pub mod session;
    pub mod user;
}

pub mod repositories {
    pub mod application;
    pub mod job;
    pub mod user;
}

pub mod services {
    pub mod applications;
    pub mod auth;
    pub mod jobs;
    pub mod search;
    pub mod session;
}

pub mod handlers {
    pub mod applications;
    pub mod auth;
    pub mod jobs;
}

pub mod middleware_layer {
    pub mod auth;
}

pub mod validation {
    pub mod fields;
}

use std::env;
use std::net::SocketAddr;
use anyhow::{Context, Result};

/// The longest session a token may be issued for.
pub const MAX_SESSION_DURATION_HOURS: i64 = 8760;

/// The application's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// The URL of the Redis server. `None` keeps everything in memory.
    pub redis_url: Option<String>,
    /// Prefix prepended to every key written to Redis.
    pub key_prefix: String,
    /// The lifetime of a session token in hours.
    pub session_duration_hours: i64,
    /// Directory served for any path outside the API.
    pub static_dir: String,
    /// Whether cookies carry the `Secure` attribute.
    pub secure_cookies: bool,
    /// Origins allowed by the CORS layer.
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            redis_url: None,
            key_prefix: "jobboard:".to_string(),
            session_duration_hours: 24,
            static_dir: "public".to_string(),
            secure_cookies: false,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// Every variable is optional; unset ones keep the `Default` value.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Creates a new `Config` from any variable source.
    ///
    /// # Arguments
    ///
    /// * `var` - Looks up a variable by name.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let bind_addr = match var("BIND_ADDR") {
            Some(raw) => raw.parse().context("Invalid BIND_ADDR")?,
            None => defaults.bind_addr,
        };

        let session_duration_hours: i64 = match var("SESSION_DURATION_HOURS") {
            Some(raw) => raw.trim().parse().context("Invalid SESSION_DURATION_HOURS")?,
            None => defaults.session_duration_hours,
        };

        if session_duration_hours <= 0 {
            anyhow::bail!("SESSION_DURATION_HOURS must be positive");
        }

        if session_duration_hours > MAX_SESSION_DURATION_HOURS {
            anyhow::bail!(
                "SESSION_DURATION_HOURS must be at most {} (one year)",
                MAX_SESSION_DURATION_HOURS
            );
        }

        let allowed_origins = match var("ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.allowed_origins,
        };

        Ok(Self {
            bind_addr,
            redis_url: var("REDIS_URL").filter(|url| !url.is_empty()),
            key_prefix: var("STORE_KEY_PREFIX").unwrap_or(defaults.key_prefix),
            session_duration_hours,
            static_dir: var("STATIC_DIR").unwrap_or(defaults.static_dir),
            secure_cookies: var("APP_ENV").as_deref() == Some("production"),
            allowed_origins,
        })
    }

    /// The session lifetime as a `chrono::Duration`.
    pub fn session_duration(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_duration_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_setup() {
        let config = Config::default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(config.redis_url.is_none());
        assert!(!config.secure_cookies);
        assert_eq!(config.session_duration(), chrono::Duration::hours(24));
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| {
            pairs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone())
        }
    }

    #[test]
    fn no_variables_gives_the_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.bind_addr, Config::default().bind_addr);
        assert_eq!(config.session_duration_hours, 24);
        assert_eq!(config.key_prefix, "jobboard:");
    }

    #[test]
    fn variables_override_the_defaults() {
        let config = Config::from_vars(vars(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("REDIS_URL", "redis://cache:6379"),
            ("SESSION_DURATION_HOURS", "48"),
            ("APP_ENV", "production"),
            ("ALLOWED_ORIGINS", "https://jobs.example.com, ,https://admin.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.session_duration_hours, 48);
        assert!(config.secure_cookies);
        assert_eq!(
            config.allowed_origins,
            vec!["https://jobs.example.com", "https://admin.example.com"]
        );
    }

    #[test]
    fn session_duration_is_bounded() {
        assert!(Config::from_vars(vars(&[("SESSION_DURATION_HOURS", "0")])).is_err());
        assert!(Config::from_vars(vars(&[("SESSION_DURATION_HOURS", "3000000000")])).is_err());
        assert!(Config::from_vars(vars(&[("SESSION_DURATION_HOURS", "8761")])).is_err());
        assert!(Config::from_vars(vars(&[("SESSION_DURATION_HOURS", "soon")])).is_err());

        let config = Config::from_vars(vars(&[("SESSION_DURATION_HOURS", "8760")])).unwrap();
        assert_eq!(config.session_duration(), chrono::Duration::hours(8760));
    }

    #[test]
    fn malformed_bind_address_is_rejected() {
        assert!(Config::from_vars(vars(&[("BIND_ADDR", "localhost")])).is_err());
    }
}

use anyhow::{bail, Context, Result};
use url::Url;
use uuid::Uuid;

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Client configuration loaded from environment variables.
/// Nothing is required; every value has a local-development default.
#[derive(Debug, Clone)]
pub struct Config {
    pub service_url: Url,
    pub request_timeout_secs: u64,
    /// Threaded through every request so the backend can key state per session.
    pub session_id: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let service_url = std::env::var("RESUME_SERVICE_URL")
            .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string());

        Ok(Config {
            service_url: parse_service_url(&service_url)
                .context("RESUME_SERVICE_URL must be an absolute http(s) origin")?,
            request_timeout_secs: parse_timeout(std::env::var("REQUEST_TIMEOUT_SECS").ok())
                .context("REQUEST_TIMEOUT_SECS must be a positive integer")?,
            session_id: std::env::var("RESUME_SESSION_ID")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(mut self, service_url: Option<&str>, session: Option<&str>) -> Result<Self> {
        if let Some(raw) = service_url {
            self.service_url =
                parse_service_url(raw).with_context(|| format!("Invalid --service-url '{raw}'"))?;
        }
        if let Some(session) = session.filter(|s| !s.trim().is_empty()) {
            self.session_id = session.to_string();
        }
        Ok(self)
    }
}

/// Accepts only a bare origin (scheme, host, optional port). Paths, queries
/// and fragments are rejected; endpoint paths are appended to the origin.
pub fn parse_service_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("'{raw}' is not a valid URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("unsupported scheme '{}'", url.scheme());
    }
    if url.host_str().is_none() {
        bail!("'{raw}' has no host");
    }
    if url.path() != "/" {
        bail!("'{raw}' must not carry a path");
    }
    if url.query().is_some() || url.fragment().is_some() {
        bail!("'{raw}' must not carry a query or fragment");
    }
    Ok(url)
}

fn parse_timeout(raw: Option<String>) -> Result<u64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TIMEOUT_SECS);
    };
    let secs = raw.trim().parse::<u64>()?;
    if secs == 0 {
        bail!("timeout must be greater than zero");
    }
    Ok(secs)
}

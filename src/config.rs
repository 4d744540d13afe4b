use std::{env, time::Duration};

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub host: String,
    pub port: u16,
    pub backend_timeout: Option<Duration>,
    pub accept_invalid_certs: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend_url = env::var("BACKEND_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let backend_timeout = parse_timeout(env::var("BACKEND_TIMEOUT_SECS").ok().as_deref())?;
        let accept_invalid_certs = env::var("BACKEND_ACCEPT_INVALID_CERTS")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);
        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            host,
            port,
            backend_timeout,
            accept_invalid_certs,
        })
    }
}

/// No timeout unless explicitly configured; a value that is set must be whole seconds.
fn parse_timeout(raw: Option<&str>) -> anyhow::Result<Option<Duration>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let secs = raw
        .parse::<u64>()
        .with_context(|| format!("BACKEND_TIMEOUT_SECS must be whole seconds, got `{raw}`"))?;
    Ok(Some(Duration::from_secs(secs)))
}

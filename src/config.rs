use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_TTL_DAYS: i64 = 30;
pub const MAX_TTL_DAYS: i64 = 3650;

/// `JWT_TTL_DAYS`: unset means the default; anything outside `1..=MAX_TTL_DAYS` is refused.
fn parse_ttl_days(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_TTL_DAYS);
    };
    let days: i64 = raw
        .parse()
        .with_context(|| format!("JWT_TTL_DAYS must be a whole number of days, got {raw:?}"))?;
    if !(1..=MAX_TTL_DAYS).contains(&days) {
        anyhow::bail!("JWT_TTL_DAYS must be between 1 and {MAX_TTL_DAYS}, got {days}");
    }
    Ok(days)
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `None` runs the server on the in-memory store.
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "studyhub".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "studyhub-users".into()),
            ttl_days: parse_ttl_days(std::env::var("JWT_TTL_DAYS").ok().as_deref())?,
        };
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);
        Ok(Self {
            database_url,
            jwt,
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    /// Fixed configuration for tests and local tooling.
    pub fn for_tests() -> Self {
        Self {
            database_url: None,
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_days: DEFAULT_TTL_DAYS,
            },
            host: "127.0.0.1".into(),
            port: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_parses_host_and_port() {
        let mut config = AppConfig::for_tests();
        config.port = 5000;
        assert_eq!(config.bind_addr().unwrap().port(), 5000);
    }

    #[test]
    fn ttl_days_defaults_and_bounds() {
        assert_eq!(parse_ttl_days(None).unwrap(), DEFAULT_TTL_DAYS);
        assert_eq!(parse_ttl_days(Some("  ")).unwrap(), DEFAULT_TTL_DAYS);
        assert_eq!(parse_ttl_days(Some("7")).unwrap(), 7);
        assert_eq!(parse_ttl_days(Some("3650")).unwrap(), MAX_TTL_DAYS);
        for bad in ["0", "-1", "3651", "100000000", "thirty"] {
            assert!(parse_ttl_days(Some(bad)).is_err(), "{bad}");
        }
    }

    #[test]
    fn bind_addr_rejects_garbage_host() {
        let mut config = AppConfig::for_tests();
        config.host = "not a host".into();
        assert!(config.bind_addr().is_err());
    }
}

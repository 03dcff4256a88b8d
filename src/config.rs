use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_JWT_SECRET: &str = "change-this-in-production";

/// One year.
pub const MAX_JWT_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source; `from_env` passes the
    /// process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = get("DATABASE_URL").unwrap_or_else(|| "sqlite://exp.db".into());
        let host = get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match get("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("APP_PORT is not a port number: {v:?}"))?,
            None => 8000,
        };
        let ttl_minutes = match get("JWT_TTL_MINUTES") {
            Some(v) => v
                .parse::<i64>()
                .with_context(|| format!("JWT_TTL_MINUTES is not an integer: {v:?}"))?,
            None => 60,
        };
        if !(1..=MAX_JWT_TTL_MINUTES).contains(&ttl_minutes) {
            anyhow::bail!(
                "JWT_TTL_MINUTES must be between 1 and {MAX_JWT_TTL_MINUTES}, got {ttl_minutes}"
            );
        }
        let jwt = JwtConfig {
            secret: get("JWT_SECRET").unwrap_or_else(|| {
                tracing::warn!("JWT_SECRET not set; using the built-in development key");
                DEFAULT_JWT_SECRET.into()
            }),
            issuer: get("JWT_ISSUER").unwrap_or_else(|| "expense-tracker".into()),
            audience: get("JWT_AUDIENCE").unwrap_or_else(|| "expense-tracker-users".into()),
            ttl_minutes,
        };
        Ok(Self {
            database_url,
            host,
            port,
            jwt,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configuration for tests: in-memory store, fixed key.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 60,
            },
        }
    }
}

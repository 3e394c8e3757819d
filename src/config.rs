use std::env;

use anyhow::{bail, Context, Result};
use deadpool_postgres::{Config, Pool, PoolConfig, Runtime};
use tokio_postgres::NoTls;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfig {
    /// Verify Firebase ID tokens for this project.
    Firebase { project_id: String },
    /// Verify HS256 tokens signed with this secret.
    SharedSecret(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub storage: StorageBackend,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable source, so parsing can be
    /// tested without touching the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = get("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let allowed_origins = get("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage = match get("STORAGE").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => bail!("STORAGE must be 'postgres' or 'memory', got '{}'", other),
        };

        let shared_secret = get("AUTH_SHARED_SECRET").filter(|s| !s.trim().is_empty());
        let auth = match shared_secret {
            Some(secret) => AuthConfig::SharedSecret(secret),
            None => AuthConfig::Firebase {
                project_id: get("FIREBASE_PROJECT_ID")
                    .filter(|s| !s.trim().is_empty())
                    .context("FIREBASE_PROJECT_ID not set (or set AUTH_SHARED_SECRET for local tokens)")?,
            },
        };

        Ok(Self {
            port,
            allowed_origins,
            storage,
            auth,
        })
    }
}

pub fn get_pg_pool() -> Result<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(env::var("PG_HOST").context("PG_HOST not set")?);
    cfg.port = match env::var("PG_PORT") {
        Ok(p) => Some(p.parse().context("PG_PORT must be a number")?),
        Err(_) => None,
    };
    cfg.user = Some(env::var("PG_USER").context("PG_USER not set")?);
    cfg.password = env::var("PG_PASS").ok();
    cfg.dbname = Some(env::var("PG_DB").context("PG_DB not set")?);

    let max_size = match env::var("PG_POOL_SIZE") {
        Ok(s) => s.parse::<usize>().context("PG_POOL_SIZE must be a number")?,
        Err(_) => 16,
    };
    cfg.pool.get_or_insert_with(PoolConfig::default).max_size = max_size;

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .context("failed to create postgres pool")
}

/// Shows only the edges of a secret.
pub fn mask_key(k: &str) -> String {
    if k.chars().count() <= 8 {
        return "[REDACTED]".to_string();
    }
    let head: String = k.chars().take(4).collect();
    let mut tail: Vec<char> = k.chars().rev().take(4).collect();
    tail.reverse();
    format!("{}***{}", head, tail.into_iter().collect::<String>())
}

// src/services/auth_services.rs
//
// Identity comes from Firebase ID tokens. The service only needs one answer from a
// token: the stable user id (`sub`).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

const FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
const FIREBASE_ISSUER_PREFIX: &str = "https://securetoken.google.com/";
const DEFAULT_KEY_TTL: Duration = Duration::from_secs(3600);
/// Unknown key ids trigger at most one refetch in this window.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("could not fetch signing keys: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected token algorithm {0:?}")]
    UnsupportedAlgorithm(Algorithm),
    #[error("token is missing a key id")]
    MissingKeyId,
    #[error("unknown signing key {0}")]
    UnknownKey(String),
    #[error("token has no subject")]
    MissingSubject,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

/// Turns a bearer token into a verified user id.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<String, AuthError>;
}

fn subject(claims: Claims) -> Result<String, AuthError> {
    let sub = claims.sub.trim();
    if sub.is_empty() {
        return Err(AuthError::MissingSubject);
    }
    Ok(sub.to_string())
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

struct KeyCache {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
    ttl: Duration,
}

impl KeyCache {
    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < self.ttl
    }
}

enum Lookup {
    Hit(DecodingKey),
    Miss,
    Expired,
}

/// Verifies RS256 Firebase ID tokens against Google's published keys.
pub struct FirebaseVerifier {
    client: reqwest::Client,
    project_id: String,
    jwks_url: String,
    cache: RwLock<Option<KeyCache>>,
    /// Time of the last fetch attempt. Held across the fetch so concurrent misses
    /// share one request; lookups of cached keys never wait on it.
    last_fetch: Mutex<Option<Instant>>,
}

impl FirebaseVerifier {
    pub fn new(client: reqwest::Client, project_id: impl Into<String>) -> Self {
        Self {
            client,
            project_id: project_id.into(),
            jwks_url: FIREBASE_JWKS_URL.to_string(),
            cache: RwLock::new(None),
            last_fetch: Mutex::new(None),
        }
    }

    /// Fetch signing keys from somewhere other than Google, e.g. the auth emulator.
    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = url.into();
        self
    }

    async fn lookup(&self, kid: &str) -> Lookup {
        let cache = self.cache.read().await;
        match cache.as_ref().filter(|c| c.is_fresh()) {
            Some(c) => c.keys.get(kid).cloned().map_or(Lookup::Miss, Lookup::Hit),
            None => Lookup::Expired,
        }
    }

    async fn fetch_keys(&self) -> Result<KeyCache, AuthError> {
        let resp = self
            .client
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?;

        let ttl = resp
            .headers()
            .get(reqwest::header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_max_age)
            .unwrap_or(DEFAULT_KEY_TTL);

        let set: JwkSet = resp.json().await?;
        let mut keys = HashMap::with_capacity(set.keys.len());
        for jwk in set.keys {
            match DecodingKey::from_rsa_components(&jwk.n, &jwk.e) {
                Ok(key) => {
                    keys.insert(jwk.kid, key);
                }
                Err(e) => warn!("Skipping unusable signing key {}: {}", jwk.kid, e),
            }
        }

        info!("Fetched {} Firebase signing keys (ttl {:?})", keys.len(), ttl);
        Ok(KeyCache {
            keys,
            fetched_at: Instant::now(),
            ttl,
        })
    }

    async fn key_for(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        if let Lookup::Hit(key) = self.lookup(kid).await {
            return Ok(key);
        }

        let mut last_fetch = self.last_fetch.lock().await;
        // another request may have refreshed while we waited
        let expired = match self.lookup(kid).await {
            Lookup::Hit(key) => return Ok(key),
            Lookup::Miss => false,
            Lookup::Expired => true,
        };

        let recent = last_fetch.is_some_and(|at| at.elapsed() < MIN_REFRESH_INTERVAL);
        if recent {
            debug!("Not refetching signing keys for {} (expired: {})", kid, expired);
        } else {
            *last_fetch = Some(Instant::now());
            let fresh = self.fetch_keys().await?;
            *self.cache.write().await = Some(fresh);
        }
        drop(last_fetch);

        // an expired set is still used while refetching is held back
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .and_then(|c| c.keys.get(kid).cloned())
            .ok_or_else(|| AuthError::UnknownKey(kid.to_string()))
    }
}

#[async_trait]
impl TokenVerifier for FirebaseVerifier {
    async fn verify(&self, token: &str) -> Result<String, AuthError> {
        let header = decode_header(token)?;
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::UnsupportedAlgorithm(header.alg));
        }
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;
        let key = self.key_for(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.project_id.as_str()]);
        validation.set_issuer(&[format!("{}{}", FIREBASE_ISSUER_PREFIX, self.project_id)]);

        let data = decode::<Claims>(token, &key, &validation)?;
        debug!("Verified Firebase token for {}", data.claims.sub);
        subject(data.claims)
    }
}

/// HS256 tokens signed with a shared secret. Meant for local development and tests,
/// where no Firebase project is available.
pub struct SharedSecretVerifier {
    key: DecodingKey,
}

impl SharedSecretVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

#[async_trait]
impl TokenVerifier for SharedSecretVerifier {
    async fn verify(&self, token: &str) -> Result<String, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.key, &validation)?;
        subject(data.claims)
    }
}

/// Extracts `max-age` from a Cache-Control header value.
fn parse_max_age(header: &str) -> Option<Duration> {
    header
        .split(',')
        .map(str::trim)
        .find_map(|directive| directive.strip_prefix("max-age="))
        .and_then(|secs| secs.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

use settlr_be::repositories::MemoryStore;
use settlr_be::services::auth_services::SharedSecretVerifier;
use settlr_be::AppState;

pub const SECRET: &str = "integration-test-secret";

#[derive(Serialize)]
struct Claims<'a> {
    sub: &'a str,
    exp: usize,
}

/// Fresh in-memory state with the shared-secret verifier.
pub fn state() -> web::Data<AppState> {
    let store = Arc::new(MemoryStore::new());
    web::Data::new(AppState {
        tenants: store.clone(),
        properties: store,
        verifier: Arc::new(SharedSecretVerifier::new(SECRET)),
    })
}

pub fn token_for(user_id: &str) -> String {
    let exp = (chrono::Utc::now().timestamp() + 3600) as usize;
    encode(
        &Header::default(),
        &Claims { sub: user_id, exp },
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn bearer(user_id: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(user_id)))
}

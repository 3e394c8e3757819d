// src/main.rs
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::{error, info};
use reqwest::Client;

use settlr_be::config::{self, AppConfig, AuthConfig, StorageBackend};
use settlr_be::repositories::tenant_pg_repo::ensure_schema;
use settlr_be::repositories::{MemoryStore, PropertyPgRepo, TenantPgRepo};
use settlr_be::services::auth_services::{FirebaseVerifier, SharedSecretVerifier, TokenVerifier};
use settlr_be::{configure, AppState};

async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let verifier: Arc<dyn TokenVerifier> = match &cfg.auth {
        AuthConfig::Firebase { project_id } => {
            info!("Verifying Firebase ID tokens for project {}", project_id);
            let http_client = Client::builder()
                .user_agent("settlr-be/0.1")
                .build()
                .context("failed to build http client")?;
            Arc::new(FirebaseVerifier::new(http_client, project_id.clone()))
        }
        AuthConfig::SharedSecret(secret) => {
            info!("Verifying HS256 tokens with shared secret {}", config::mask_key(secret));
            Arc::new(SharedSecretVerifier::new(secret))
        }
    };

    let state = match cfg.storage {
        StorageBackend::Postgres => {
            let pool = config::get_pg_pool()?;
            ensure_schema(&pool)
                .await
                .context("failed to prepare database schema")?;
            info!("Connected to Postgres");
            AppState {
                tenants: Arc::new(TenantPgRepo::new(pool.clone())),
                properties: Arc::new(PropertyPgRepo::new(pool)),
                verifier,
            }
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            AppState {
                tenants: store.clone(),
                properties: store,
                verifier,
            }
        }
    };
    Ok(state)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let state = match build_state(&cfg).await {
        Ok(s) => web::Data::new(s),
        Err(e) => {
            error!("Startup failed: {:#}", e);
            std::process::exit(1);
        }
    };

    let bind_address = format!("0.0.0.0:{}", cfg.port);
    let allowed_origins = cfg.allowed_origins.clone();
    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept"])
            .supports_credentials()
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}

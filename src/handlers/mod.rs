// src/handlers/mod.rs
pub mod property_handlers;
pub mod tenant_handlers;

use actix_web::http::StatusCode;
use actix_web::{error, get, web, HttpRequest, HttpResponse, Responder, ResponseError};
use log::error;
use thiserror::Error;

use crate::dtos::MessageOut;
use crate::repositories::StoreError;

/// Every failure a handler can reply with. The body is always `{ "message": ... }`.
///
/// Not-found and auth failures get their own status codes; validation, payload and
/// storage failures all surface as 500 with the underlying message, which is the
/// contract the web client is written against.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Payload(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Store(e) = self {
            error!("Store failure: {}", e);
        }
        HttpResponse::build(self.status_code()).json(MessageOut::new(self.to_string()))
    }
}

/// JSON bodies that fail to decode answer like any other failed write.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
            ApiError::Payload(err.to_string()).into()
        })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: error::QueryPayloadError, _req: &HttpRequest| {
        ApiError::Payload(err.to_string()).into()
    })
}

/// GET /health
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

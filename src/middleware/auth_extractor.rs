// src/middleware/auth_extractor.rs
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use log::{debug, warn};

use crate::handlers::ApiError;
use crate::AppState;

/// Caller identity, resolved from `Authorization: Bearer <token>`.
/// Any handler taking this argument is unreachable without a valid token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

fn bearer_token(req: &HttpRequest) -> Result<String, ApiError> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".into()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid header format".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid auth header format".into()))?;

    Ok(token.to_string())
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let verifier = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.verifier.clone());

        Box::pin(async move {
            let token = token?;
            let verifier = verifier
                .ok_or_else(|| ApiError::Internal("token verifier is not configured".into()))?;

            match verifier.verify(&token).await {
                Ok(user_id) => {
                    debug!("Authenticated request for {}", user_id);
                    Ok(AuthenticatedUser { user_id })
                }
                Err(e) => {
                    warn!("Rejected bearer token: {}", e);
                    Err(ApiError::Unauthorized("Invalid or expired token".into()))
                }
            }
        })
    }
}

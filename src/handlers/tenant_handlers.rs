// src/handlers/tenant_handlers.rs
use actix_web::{get, post, web, HttpResponse};
use log::{debug, error, info};
use serde_json::{Map, Value};

use crate::dtos::tenant_dtos::{TenantListOut, TenantProfileOut, TenantSavedOut, TenantSearchQuery};
use crate::handlers::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::tenant::TenantDetails;
use crate::AppState;

/// POST /api/tenant/profile
/// Create the caller's tenant profile, or update the fields the body lists.
#[post("/profile")]
pub async fn create_or_update_tenant(
    state: web::Data<AppState>,
    auth_user: AuthenticatedUser,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    info!("Saving tenant profile for {}", auth_user.user_id);

    let submitted: TenantDetails = serde_json::from_value(Value::Object(body.clone()))
        .map_err(|e| ApiError::Payload(e.to_string()))?;
    // the flag reflects what this submission carries, not the merged result
    let profile_completed = submitted.is_complete();

    let details = match state.tenants.find_by_user_id(&auth_user.user_id).await? {
        Some(existing) => existing
            .details
            .merge_submission(&body)
            .map_err(|e| ApiError::Payload(e.to_string()))?,
        None => submitted,
    }
    .with_defaults();

    details.validate().map_err(|msg| {
        error!("Tenant profile for {} rejected: {}", auth_user.user_id, msg);
        ApiError::Validation(msg)
    })?;

    let tenant = state
        .tenants
        .upsert(&auth_user.user_id, details, profile_completed)
        .await?;

    info!(
        "Tenant profile {} saved (completed: {})",
        tenant.id, tenant.profile_completed
    );

    Ok(HttpResponse::Ok().json(TenantSavedOut {
        message: "Profile updated successfully".to_string(),
        tenant,
    }))
}

/// GET /api/tenant/profile
#[get("/profile")]
pub async fn get_tenant_profile(
    state: web::Data<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    debug!("Fetching tenant profile for {}", auth_user.user_id);

    match state.tenants.find_by_user_id(&auth_user.user_id).await? {
        Some(tenant) => Ok(HttpResponse::Ok().json(TenantProfileOut {
            profile_exists: true,
            tenant: Some(tenant),
            message: None,
        })),
        None => {
            debug!("No tenant profile for {}", auth_user.user_id);
            Ok(HttpResponse::NotFound().json(TenantProfileOut {
                profile_exists: false,
                tenant: None,
                message: Some("Tenant profile not found".to_string()),
            }))
        }
    }
}

/// GET /api/tenant/all?city=&minBudget=&maxBudget=&occupation=
/// Completed profiles only, newest first. Used by owners looking for tenants.
#[get("/all")]
pub async fn get_all_tenants(
    state: web::Data<AppState>,
    _auth_user: AuthenticatedUser,
    query: web::Query<TenantSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let filter = query.into_inner().into_filter().map_err(ApiError::Validation)?;
    let tenants = state.tenants.find_completed(&filter).await?;
    debug!("Tenant search {:?} matched {}", filter, tenants.len());

    Ok(HttpResponse::Ok().json(TenantListOut {
        count: tenants.len(),
        tenants,
    }))
}

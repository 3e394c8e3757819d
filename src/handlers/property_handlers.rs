// src/handlers/property_handlers.rs
use actix_web::{delete, get, post, put, web, HttpResponse};
use log::{info, warn};
use uuid::Uuid;

use crate::dtos::property_dtos::PropertySavedOut;
use crate::dtos::MessageOut;
use crate::handlers::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::property::PropertyDetails;
use crate::services::listing_stages::check_listing;
use crate::AppState;

const NOT_FOUND: &str = "Property not found";

/// Unparseable ids cannot name a stored listing.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(NOT_FOUND.to_string()))
}

fn validate_listing(details: &PropertyDetails) -> Result<(), ApiError> {
    check_listing(details).map_err(|e| ApiError::Validation(e.to_string()))?;
    details.validate().map_err(ApiError::Validation)
}

/// POST /api/properties
#[post("")]
pub async fn create_property(
    state: web::Data<AppState>,
    auth_user: AuthenticatedUser,
    body: web::Json<PropertyDetails>,
) -> Result<HttpResponse, ApiError> {
    let details = body.into_inner();
    if let Err(e) = validate_listing(&details) {
        warn!("Listing from {} rejected: {}", auth_user.user_id, e);
        return Err(e);
    }

    let property = state.properties.insert(&auth_user.user_id, details).await?;
    info!("Property {} created by {}", property.id, auth_user.user_id);

    Ok(HttpResponse::Created().json(PropertySavedOut {
        message: "Property created successfully".to_string(),
        property,
    }))
}

/// GET /api/properties/my-properties
#[get("/my-properties")]
pub async fn list_my_properties(
    state: web::Data<AppState>,
    auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let properties = state.properties.find_by_owner(&auth_user.user_id).await?;
    Ok(HttpResponse::Ok().json(properties))
}

/// GET /api/properties/{id}
#[get("/{id}")]
pub async fn get_property(
    state: web::Data<AppState>,
    _auth_user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    let property = state
        .properties
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;
    Ok(HttpResponse::Ok().json(property))
}

/// PUT /api/properties/{id}
/// Full replace; other owners' listings look like missing ones.
#[put("/{id}")]
pub async fn update_property(
    state: web::Data<AppState>,
    auth_user: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<PropertyDetails>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    let details = body.into_inner();
    validate_listing(&details)?;

    let property = state
        .properties
        .replace_owned(id, &auth_user.user_id, details)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_string()))?;
    info!("Property {} updated by {}", property.id, auth_user.user_id);

    Ok(HttpResponse::Ok().json(PropertySavedOut {
        message: "Property updated successfully".to_string(),
        property,
    }))
}

/// DELETE /api/properties/{id}
#[delete("/{id}")]
pub async fn delete_property(
    state: web::Data<AppState>,
    auth_user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;
    if !state.properties.delete_owned(id, &auth_user.user_id).await? {
        return Err(ApiError::NotFound(NOT_FOUND.to_string()));
    }

    info!("Property {} deleted by {}", id, auth_user.user_id);
    Ok(HttpResponse::Ok().json(MessageOut::new("Property deleted successfully")))
}

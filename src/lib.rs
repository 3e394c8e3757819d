//! Settlr backend: tenant profiles and rental listings behind Firebase-authenticated
//! JSON endpoints.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

use std::sync::Arc;

use actix_web::web;

use crate::handlers::property_handlers::{
    create_property, delete_property, get_property, list_my_properties, update_property,
};
use crate::handlers::tenant_handlers::{
    create_or_update_tenant, get_all_tenants, get_tenant_profile,
};
use crate::repositories::{PropertyStore, TenantStore};
use crate::services::auth_services::TokenVerifier;

/// Shared per-process state. Each request works only through these handles.
#[derive(Clone)]
pub struct AppState {
    pub tenants: Arc<dyn TenantStore>,
    pub properties: Arc<dyn PropertyStore>,
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Registers every route. Shared by the server binary and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config())
        .app_data(handlers::query_config())
        .service(handlers::health)
        .service(
            web::scope("/api/tenant")
                .service(create_or_update_tenant) // POST /api/tenant/profile
                .service(get_tenant_profile) // GET  /api/tenant/profile
                .service(get_all_tenants), // GET  /api/tenant/all
        )
        .service(
            web::scope("/api/properties")
                .service(create_property) // POST   /api/properties
                .service(list_my_properties) // GET    /api/properties/my-properties
                .service(get_property) // GET    /api/properties/{id}
                .service(update_property) // PUT    /api/properties/{id}
                .service(delete_property), // DELETE /api/properties/{id}
        );
}

pub mod auth_services;
pub mod listing_stages;

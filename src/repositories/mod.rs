// src/repositories/mod.rs
//
// Storage seam. Handlers only see these traits; `postgres` backs production and
// `memory` backs local runs and the test suite.

pub mod memory_repo;
pub mod property_pg_repo;
pub mod tenant_pg_repo;

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use thiserror::Error;
use uuid::Uuid;

use crate::models::property::{Property, PropertyDetails};
use crate::models::tenant::{TenantDetails, TenantProfile};

pub use memory_repo::MemoryStore;
pub use property_pg_repo::PropertyPgRepo;
pub use tenant_pg_repo::TenantPgRepo;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),
}

/// Search criteria for completed tenant profiles. Every criterion is optional and
/// they combine with AND.
#[derive(Debug, Clone, Default)]
pub struct TenantFilter {
    /// Literal, case-insensitive substring of the preferred city.
    pub city: Option<String>,
    pub occupation: Option<String>,
    /// Lower bound on `budget.min`.
    pub min_budget: Option<f64>,
    /// Upper bound on `budget.max`.
    pub max_budget: Option<f64>,
}

impl TenantFilter {
    /// Escaped pattern for the city criterion, usable by both the regex crate and
    /// Postgres `~*`.
    pub fn city_pattern(&self) -> Option<String> {
        self.city.as_deref().map(regex::escape)
    }

    pub fn city_regex(&self) -> Option<Regex> {
        self.city_pattern().and_then(|p| {
            RegexBuilder::new(&p)
                .case_insensitive(true)
                .build()
                .ok()
        })
    }

    /// In-process evaluation, equivalent to the SQL in `tenant_pg_repo`.
    pub fn matches(&self, profile: &TenantProfile, city_re: Option<&Regex>) -> bool {
        if !profile.profile_completed {
            return false;
        }
        let d = &profile.details;

        if let Some(re) = city_re {
            if !d.preferred_city.as_deref().is_some_and(|c| re.is_match(c)) {
                return false;
            }
        }
        if let Some(occ) = &self.occupation {
            if d.occupation.map(|o| o.as_str()) != Some(occ.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.min_budget {
            if !d.budget.is_some_and(|b| b.min >= min) {
                return false;
            }
        }
        if let Some(max) = self.max_budget {
            if !d.budget.is_some_and(|b| b.max <= max) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Create-or-replace keyed by user id. Concurrent writers race, last one wins.
    async fn upsert(
        &self,
        user_id: &str,
        details: TenantDetails,
        profile_completed: bool,
    ) -> Result<TenantProfile, StoreError>;

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<TenantProfile>, StoreError>;

    /// Completed profiles matching `filter`, newest first.
    async fn find_completed(&self, filter: &TenantFilter)
        -> Result<Vec<TenantProfile>, StoreError>;
}

#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn insert(&self, owner_id: &str, details: PropertyDetails)
        -> Result<Property, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, StoreError>;

    /// All listings of one owner, newest first.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Property>, StoreError>;

    /// Replaces the listing only if `owner_id` owns it. `None` when no such listing.
    async fn replace_owned(
        &self,
        id: Uuid,
        owner_id: &str,
        details: PropertyDetails,
    ) -> Result<Option<Property>, StoreError>;

    /// Returns whether an owned listing was removed.
    async fn delete_owned(&self, id: Uuid, owner_id: &str) -> Result<bool, StoreError>;
}

// src/repositories/tenant_pg_repo.rs
use async_trait::async_trait;
use deadpool_postgres::Pool;
use log::debug;
use tokio_postgres::Row;
use tokio_postgres::types::Json;
use uuid::Uuid;

use crate::models::tenant::{TenantDetails, TenantProfile};
use crate::repositories::{StoreError, TenantFilter, TenantStore};

const SCHEMA_SQL: &str = include_str!("schema.sql");

const RETURNING: &str = "id, user_id, profile_completed, document, created_at, updated_at";

/// Runs the idempotent DDL for both collections.
pub async fn ensure_schema(pool: &Pool) -> Result<(), StoreError> {
    let client = pool.get().await?;
    client.batch_execute(SCHEMA_SQL).await?;
    Ok(())
}

/// Tenant profiles in Postgres. The full profile lives in `document`; the columns
/// next to it are projections used for uniqueness and search.
#[derive(Clone)]
pub struct TenantPgRepo {
    pool: Pool,
}

impl TenantPgRepo {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn row_to_profile(row: &Row) -> Result<TenantProfile, StoreError> {
    let Json(details): Json<TenantDetails> = row.try_get("document")?;
    Ok(TenantProfile {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        details,
        profile_completed: row.try_get("profile_completed")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl TenantStore for TenantPgRepo {
    async fn upsert(
        &self,
        user_id: &str,
        details: TenantDetails,
        profile_completed: bool,
    ) -> Result<TenantProfile, StoreError> {
        let sql = format!(
            "INSERT INTO tenant_profiles \
                (id, user_id, profile_completed, preferred_city, occupation, budget_min, budget_max, document) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (user_id) DO UPDATE SET \
                profile_completed = EXCLUDED.profile_completed, \
                preferred_city = EXCLUDED.preferred_city, \
                occupation = EXCLUDED.occupation, \
                budget_min = EXCLUDED.budget_min, \
                budget_max = EXCLUDED.budget_max, \
                document = EXCLUDED.document, \
                updated_at = now() \
             RETURNING {}",
            RETURNING
        );

        let occupation = details.occupation.map(|o| o.as_str());
        let budget_min = details.budget.map(|b| b.min);
        let budget_max = details.budget.map(|b| b.max);

        let client = self.pool.get().await?;
        let row = client
            .query_one(
                &sql,
                &[
                    &Uuid::new_v4(),
                    &user_id,
                    &profile_completed,
                    &details.preferred_city,
                    &occupation,
                    &budget_min,
                    &budget_max,
                    &Json(&details),
                ],
            )
            .await?;
        row_to_profile(&row)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<TenantProfile>, StoreError> {
        let sql = format!("SELECT {} FROM tenant_profiles WHERE user_id = $1", RETURNING);
        let client = self.pool.get().await?;
        let row = client.query_opt(&sql, &[&user_id]).await?;
        row.as_ref().map(row_to_profile).transpose()
    }

    async fn find_completed(
        &self,
        filter: &TenantFilter,
    ) -> Result<Vec<TenantProfile>, StoreError> {
        let sql = format!(
            "SELECT {} FROM tenant_profiles \
             WHERE profile_completed \
               AND ($1::text IS NULL OR preferred_city ~* $1) \
               AND ($2::text IS NULL OR occupation = $2) \
               AND ($3::float8 IS NULL OR budget_min >= $3) \
               AND ($4::float8 IS NULL OR budget_max <= $4) \
             ORDER BY created_at DESC",
            RETURNING
        );
        let city = filter.city_pattern();
        debug!("tenant search: {:?}", filter);

        let client = self.pool.get().await?;
        let rows = client
            .query(
                &sql,
                &[&city, &filter.occupation, &filter.min_budget, &filter.max_budget],
            )
            .await?;
        rows.iter().map(row_to_profile).collect()
    }
}

// src/repositories/property_pg_repo.rs
use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use tokio_postgres::types::Json;
use uuid::Uuid;

use crate::models::property::{Property, PropertyDetails};
use crate::repositories::{PropertyStore, StoreError};

const COLUMNS: &str = "id, owner_id, document, created_at, updated_at";

#[derive(Clone)]
pub struct PropertyPgRepo {
    pool: Pool,
}

impl PropertyPgRepo {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn row_to_property(row: &Row) -> Result<Property, StoreError> {
    let Json(details): Json<PropertyDetails> = row.try_get("document")?;
    Ok(Property {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        details,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl PropertyStore for PropertyPgRepo {
    async fn insert(
        &self,
        owner_id: &str,
        details: PropertyDetails,
    ) -> Result<Property, StoreError> {
        let sql = format!(
            "INSERT INTO properties (id, owner_id, document) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        let client = self.pool.get().await?;
        let row = client
            .query_one(&sql, &[&Uuid::new_v4(), &owner_id, &Json(&details)])
            .await?;
        row_to_property(&row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, StoreError> {
        let sql = format!("SELECT {} FROM properties WHERE id = $1", COLUMNS);
        let client = self.pool.get().await?;
        let row = client.query_opt(&sql, &[&id]).await?;
        row.as_ref().map(row_to_property).transpose()
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Property>, StoreError> {
        let sql = format!(
            "SELECT {} FROM properties WHERE owner_id = $1 ORDER BY created_at DESC",
            COLUMNS
        );
        let client = self.pool.get().await?;
        let rows = client.query(&sql, &[&owner_id]).await?;
        rows.iter().map(row_to_property).collect()
    }

    async fn replace_owned(
        &self,
        id: Uuid,
        owner_id: &str,
        details: PropertyDetails,
    ) -> Result<Option<Property>, StoreError> {
        let sql = format!(
            "UPDATE properties SET document = $3, updated_at = now() \
             WHERE id = $1 AND owner_id = $2 RETURNING {}",
            COLUMNS
        );
        let client = self.pool.get().await?;
        let row = client
            .query_opt(&sql, &[&id, &owner_id, &Json(&details)])
            .await?;
        row.as_ref().map(row_to_property).transpose()
    }

    async fn delete_owned(&self, id: Uuid, owner_id: &str) -> Result<bool, StoreError> {
        let client = self.pool.get().await?;
        let deleted = client
            .execute(
                "DELETE FROM properties WHERE id = $1 AND owner_id = $2",
                &[&id, &owner_id],
            )
            .await?;
        Ok(deleted > 0)
    }
}

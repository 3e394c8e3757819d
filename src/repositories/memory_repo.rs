// src/repositories/memory_repo.rs
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::property::{Property, PropertyDetails};
use crate::models::tenant::{TenantDetails, TenantProfile};
use crate::repositories::{PropertyStore, StoreError, TenantFilter, TenantStore};

/// Process-local store. Entries carry an insertion sequence so newest-first ordering
/// is stable even when two writes share a timestamp.
#[derive(Default)]
pub struct MemoryStore {
    seq: AtomicU64,
    tenants: RwLock<HashMap<String, (u64, TenantProfile)>>,
    properties: RwLock<HashMap<Uuid, (u64, Property)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }

    #[cfg(test)]
    async fn tenant_count(&self) -> usize {
        self.tenants.read().await.len()
    }
}

fn newest_first<T: Clone>(
    mut rows: Vec<&(u64, T)>,
    created: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    rows.sort_by_key(|(seq, row)| Reverse((created(row), *seq)));
    rows.into_iter().map(|(_, row)| row.clone()).collect()
}

#[async_trait]
impl TenantStore for MemoryStore {
    async fn upsert(
        &self,
        user_id: &str,
        details: TenantDetails,
        profile_completed: bool,
    ) -> Result<TenantProfile, StoreError> {
        let now = Utc::now();
        let mut tenants = self.tenants.write().await;

        let saved = match tenants.get_mut(user_id) {
            Some((_, existing)) => {
                existing.details = details;
                existing.profile_completed = profile_completed;
                existing.updated_at = now;
                existing.clone()
            }
            None => {
                let profile = TenantProfile {
                    id: Uuid::new_v4(),
                    user_id: user_id.to_string(),
                    details,
                    profile_completed,
                    created_at: now,
                    updated_at: now,
                };
                let seq = self.next_seq();
                tenants.insert(user_id.to_string(), (seq, profile.clone()));
                profile
            }
        };
        Ok(saved)
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<TenantProfile>, StoreError> {
        let tenants = self.tenants.read().await;
        Ok(tenants.get(user_id).map(|(_, p)| p.clone()))
    }

    async fn find_completed(
        &self,
        filter: &TenantFilter,
    ) -> Result<Vec<TenantProfile>, StoreError> {
        let city_re = filter.city_regex();
        let tenants = self.tenants.read().await;
        let rows = tenants
            .values()
            .filter(|(_, p)| filter.matches(p, city_re.as_ref()))
            .collect();
        Ok(newest_first(rows, |p: &TenantProfile| p.created_at))
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn insert(
        &self,
        owner_id: &str,
        details: PropertyDetails,
    ) -> Result<Property, StoreError> {
        let now = Utc::now();
        let property = Property {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            details,
            created_at: now,
            updated_at: now,
        };
        let seq = self.next_seq();
        self.properties
            .write()
            .await
            .insert(property.id, (seq, property.clone()));
        Ok(property)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, StoreError> {
        Ok(self.properties.read().await.get(&id).map(|(_, p)| p.clone()))
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Property>, StoreError> {
        let properties = self.properties.read().await;
        let rows = properties
            .values()
            .filter(|(_, p)| p.owner_id == owner_id)
            .collect();
        Ok(newest_first(rows, |p: &Property| p.created_at))
    }

    async fn replace_owned(
        &self,
        id: Uuid,
        owner_id: &str,
        details: PropertyDetails,
    ) -> Result<Option<Property>, StoreError> {
        let mut properties = self.properties.write().await;
        match properties.get_mut(&id) {
            Some((_, existing)) if existing.owner_id == owner_id => {
                existing.details = details;
                existing.updated_at = Utc::now();
                Ok(Some(existing.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_owned(&self, id: Uuid, owner_id: &str) -> Result<bool, StoreError> {
        let mut properties = self.properties.write().await;
        let owned = properties
            .get(&id)
            .is_some_and(|(_, p)| p.owner_id == owner_id);
        if owned {
            properties.remove(&id);
        }
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_keeps_one_profile_per_user() {
        let store = MemoryStore::new();
        let first = store.upsert("uid-1", TenantDetails::default(), false).await.unwrap();
        let second = store.upsert("uid-1", TenantDetails::default(), true).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert!(second.profile_completed);
        assert_eq!(store.tenant_count().await, 1);
    }

    #[tokio::test]
    async fn properties_are_listed_newest_first() {
        let store = MemoryStore::new();
        let a = store.insert("owner", PropertyDetails::default()).await.unwrap();
        let b = store.insert("owner", PropertyDetails::default()).await.unwrap();
        store.insert("someone-else", PropertyDetails::default()).await.unwrap();

        let mine = store.find_by_owner("owner").await.unwrap();
        let ids: Vec<Uuid> = mine.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn only_the_owner_can_delete() {
        let store = MemoryStore::new();
        let p = store.insert("owner", PropertyDetails::default()).await.unwrap();

        assert!(!store.delete_owned(p.id, "intruder").await.unwrap());
        assert!(store.delete_owned(p.id, "owner").await.unwrap());
        assert!(store.find_by_id(p.id).await.unwrap().is_none());
    }
}

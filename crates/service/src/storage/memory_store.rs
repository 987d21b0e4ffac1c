use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use models::record::{self, numeric_id, record_id, Record, ID_FIELD};
use models::{seed, Collection};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::ServiceError;
use crate::resources;
use crate::storage::{FieldFilter, RecordStore};

/// Process-scoped in-memory store holding every collection.
///
/// Created once at startup (optionally from seed data) and dropped with the
/// process. All writers go through one lock, so id generation and append are
/// a single step.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<Collection, Vec<Record>>>>,
}

impl MemoryStore {
    /// Empty collections.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Collections initialized from the seed data.
    pub fn seeded() -> Result<Arc<Self>, ServiceError> {
        let mut map = HashMap::new();
        for collection in Collection::ALL {
            map.insert(collection, seed::records(collection)?);
        }
        info!(
            users = map.get(&Collection::Users).map_or(0, Vec::len),
            tickets = map.get(&Collection::Tickets).map_or(0, Vec::len),
            "memory store seeded"
        );
        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)) }))
    }

    /// Collections initialized from the given records.
    pub fn with_records<I>(collections: I) -> Arc<Self>
    where
        I: IntoIterator<Item = (Collection, Vec<Record>)>,
    {
        let map = collections.into_iter().collect::<HashMap<_, _>>();
        Arc::new(Self { inner: Arc::new(RwLock::new(map)) })
    }

    /// Number of records in a collection.
    pub async fn count(&self, collection: Collection) -> usize {
        let map = self.inner.read().await;
        map.get(&collection).map_or(0, Vec::len)
    }
}

/// Next id for a collection: `"1"` when empty, else the largest numeric id
/// plus one. Ids without a numeric prefix are skipped.
pub fn generate_id(records: &[Record]) -> String {
    let max = records
        .iter()
        .filter_map(|r| r.get(ID_FIELD).and_then(numeric_id))
        .max();
    match max {
        Some(n) => n.saturating_add(1).to_string(),
        None => "1".to_string(),
    }
}

fn position(records: &[Record], id: &str) -> Option<usize> {
    records.iter().position(|r| record_id(r) == Some(id))
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_by_id(&self, collection: Collection, id: &str) -> Option<Record> {
        let map = self.inner.read().await;
        map.get(&collection)?
            .iter()
            .find(|r| record_id(r) == Some(id))
            .cloned()
    }

    async fn list(&self, collection: Collection, filter: Option<&FieldFilter>) -> Vec<Record> {
        let map = self.inner.read().await;
        let Some(records) = map.get(&collection) else { return Vec::new() };
        match filter {
            Some(f) => records.iter().filter(|r| f.matches(r)).cloned().collect(),
            None => records.clone(),
        }
    }

    async fn insert(&self, collection: Collection, mut partial: Record) -> Record {
        let mut map = self.inner.write().await;
        let records = map.entry(collection).or_default();
        partial.insert(ID_FIELD.to_string(), Value::String(generate_id(records)));
        resources::stamp_server_fields(collection, &mut partial);
        records.push(partial.clone());
        partial
    }

    async fn update(&self, collection: Collection, id: &str, patch: Record) -> Result<Record, ServiceError> {
        let mut map = self.inner.write().await;
        let records = map.entry(collection).or_default();
        let idx = position(records, id).ok_or_else(|| ServiceError::not_found(collection.label()))?;
        let existing = &mut records[idx];
        record::merge(existing, patch);
        Ok(existing.clone())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let records = map.entry(collection).or_default();
        let idx = position(records, id).ok_or_else(|| ServiceError::not_found(collection.label()))?;
        records.remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::record::parse_record;
    use serde_json::json;

    fn rec(v: serde_json::Value) -> Record {
        record::into_record(v).unwrap()
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().filter_map(record_id).collect()
    }

    #[test]
    fn generate_id_follows_max_plus_one() {
        assert_eq!(generate_id(&[]), "1");
        let records = vec![rec(json!({"id":"1"})), rec(json!({"id":"3"})), rec(json!({"id":"5"}))];
        assert_eq!(generate_id(&records), "6");
        // 非数字 id 不参与计算
        let records = vec![rec(json!({"id":"abc"})), rec(json!({"id":"2"}))];
        assert_eq!(generate_id(&records), "3");
        let records = vec![rec(json!({"id":"abc"}))];
        assert_eq!(generate_id(&records), "1");
        let records = vec![rec(json!({"id":"1700000000000"}))];
        assert_eq!(generate_id(&records), "1700000000001");
    }

    #[tokio::test]
    async fn insert_then_find_returns_inserted_data() -> anyhow::Result<()> {
        let store = MemoryStore::seeded()?;
        let input = parse_record(br#"{"title":"T","description":"D","status":"open","priority":"low","userId":3}"#)?;
        let created = store.insert(Collection::Tickets, input.clone()).await;

        assert_eq!(record_id(&created), Some("3"));
        assert!(created.get("createdAt").and_then(|v| v.as_str()).is_some());
        for (k, v) in &input {
            assert_eq!(created.get(k), Some(v));
        }

        let found = store.find_by_id(Collection::Tickets, "3").await;
        assert_eq!(found.as_ref(), Some(&created));
        Ok(())
    }

    #[tokio::test]
    async fn insert_overwrites_client_id_and_users_get_no_created_at() {
        let store = MemoryStore::seeded().unwrap();
        let created = store
            .insert(Collection::Users, rec(json!({"id":"1700000000000","email":"a@b.c"})))
            .await;
        assert_eq!(record_id(&created), Some("4"));
        assert!(created.get("createdAt").is_none());
        assert_eq!(store.count(Collection::Users).await, 4);
    }

    #[tokio::test]
    async fn update_merges_and_reports_missing() {
        let store = MemoryStore::seeded().unwrap();
        let updated = store
            .update(Collection::Tickets, "2", rec(json!({"status":"closed"})))
            .await
            .unwrap();
        assert_eq!(updated["status"], "closed");
        assert_eq!(updated["title"], "Password Reset");
        assert_eq!(updated["createdAt"], "2024-01-14T14:20:00Z");

        let before = store.list(Collection::Tickets, None).await;
        let err = store
            .update(Collection::Tickets, "99", rec(json!({"status":"open"})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Ticket not found");
        assert_eq!(store.list(Collection::Tickets, None).await, before);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let store = MemoryStore::seeded().unwrap();
        store.delete(Collection::Users, "2").await.unwrap();
        let users = store.list(Collection::Users, None).await;
        assert_eq!(ids(&users), vec!["1", "3"]);

        let err = store.delete(Collection::Users, "2").await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
        assert_eq!(store.count(Collection::Users).await, 2);
    }

    #[tokio::test]
    async fn list_filters_by_user_id_in_insertion_order() {
        let store = MemoryStore::with_records([(
            Collection::Tickets,
            vec![
                rec(json!({"id":"1","userId":3})),
                rec(json!({"id":"2","userId":"1"})),
                rec(json!({"id":"3","userId":"3"})),
                rec(json!({"id":"4"})),
                rec(json!({"id":"5","userId":3})),
            ],
        )]);
        let filter = FieldFilter::new("userId", "3");
        let hits = store.list(Collection::Tickets, Some(&filter)).await;
        assert_eq!(ids(&hits), vec!["1", "3", "5"]);
        assert_eq!(store.list(Collection::Tickets, None).await.len(), 5);
    }

    #[tokio::test]
    async fn missing_collection_behaves_as_empty() {
        let store = MemoryStore::new();
        assert!(store.list(Collection::Users, None).await.is_empty());
        assert!(store.find_by_id(Collection::Users, "1").await.is_none());
        let created = store.insert(Collection::Users, Record::new()).await;
        assert_eq!(record_id(&created), Some("1"));
    }

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() {
        let store = MemoryStore::new();
        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.insert(Collection::Tickets, Record::new()).await }));
        }
        let mut seen = Vec::new();
        for h in handles {
            seen.push(record_id(&h.await.unwrap()).unwrap().to_string());
        }
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 32);
    }
}

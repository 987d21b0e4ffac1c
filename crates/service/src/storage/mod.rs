//! Storage abstractions for service layer
//!
//! `RecordStore` is the seam between the resource handler and whatever holds
//! the records. The only implementation is the process-scoped `MemoryStore`.

use async_trait::async_trait;
use models::record::{loosely_equals, Record};
use models::Collection;

use crate::errors::ServiceError;

pub mod memory_store;

/// Equality predicate on one record field, e.g. `userId == "3"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self { field: field.into(), value: value.into() }
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.get(&self.field).is_some_and(|v| loosely_equals(v, &self.value))
    }
}

/// Trait abstraction for collection storage.
/// Implementations must serialize mutations: id assignment in `insert` reads
/// the collection and appends to it as one step.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_by_id(&self, collection: Collection, id: &str) -> Option<Record>;
    async fn list(&self, collection: Collection, filter: Option<&FieldFilter>) -> Vec<Record>;
    async fn insert(&self, collection: Collection, partial: Record) -> Record;
    async fn update(&self, collection: Collection, id: &str, patch: Record) -> Result<Record, ServiceError>;
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), ServiceError>;
}

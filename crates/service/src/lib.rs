//! Service layer: the in-memory collection store and the resource handler
//! that maps HTTP-shaped requests onto it.
//! - `storage` owns the records and serializes mutations.
//! - `handler` implements the CRUD contract once for every collection.
//! - `function` adapts serverless-style events onto the same handler.

pub mod errors;
pub mod storage;
pub mod resources;
pub mod handler;
pub mod function;

pub use handler::{ApiRequest, ApiResponse, ResourceHandler};
pub use storage::{memory_store::MemoryStore, FieldFilter, RecordStore};

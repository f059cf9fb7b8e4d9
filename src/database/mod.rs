pub mod filter;
pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use filter::{Filter, FilterValue};
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// An untyped JSON document as stored and returned by the store.
pub type Document = Map<String, Value>;

/// Errors from a `DocumentStore`
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid document id: {0}")]
    InvalidId(String),

    #[error("Document conversion failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),
}

/// The five collections the storefront reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Parts,
    Reviews,
    Orders,
    Users,
    Profiles,
}

impl Collection {
    /// Collection name inside the database.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Parts => "parts",
            Collection::Reviews => "reviews",
            Collection::Orders => "orders",
            Collection::Users => "users",
            Collection::Profiles => "profile",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Store operations the route handlers depend on.
///
/// Every handler performs exactly one of these calls. Implementations must be
/// safe to share across concurrently running requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, collection: Collection, filter: Filter) -> Result<Option<Document>, StoreError>;

    async fn insert_one(&self, collection: Collection, document: Document) -> Result<InsertAck, StoreError>;

    /// Applies `set` as a field-level `$set` to the first match. With `upsert`,
    /// a missing match inserts a document built from the filter's equality
    /// fields plus `set`.
    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateAck, StoreError>;

    async fn delete_one(&self, collection: Collection, filter: Filter) -> Result<DeleteAck, StoreError>;

    /// Round-trips to the backing database.
    async fn ping(&self) -> Result<(), StoreError>;
}

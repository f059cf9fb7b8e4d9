use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{
    Collection, DeleteAck, Document, DocumentStore, Filter, InsertAck, StoreError, UpdateAck,
};

/// In-process `DocumentStore` with the same find/insert/upsert/delete
/// semantics as the MongoDB client. Used by the test suite and for running
/// the API without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }

    /// Inserts a document directly, bypassing the trait. Returns its `_id`.
    pub async fn seed(&self, collection: Collection, document: Document) -> String {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();
        let (document, id) = with_id(document);
        documents.push(document);
        id_string(&id)
    }
}

/// Assigns a fresh hex object id unless the document carries its own `_id`.
fn with_id(mut document: Document) -> (Document, Value) {
    let id = document
        .entry("_id")
        .or_insert_with(|| Value::String(ObjectId::new().to_hex()))
        .clone();
    (document, id)
}

fn id_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|documents| documents.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: Collection, filter: Filter) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|d| filter.matches(d)).cloned()))
    }

    async fn insert_one(&self, collection: Collection, document: Document) -> Result<InsertAck, StoreError> {
        let mut collections = self.collections.write().await;
        let (document, inserted_id) = with_id(document);
        collections.entry(collection).or_default().push(document);

        Ok(InsertAck {
            acknowledged: true,
            inserted_id,
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateAck, StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        if let Some(existing) = documents.iter_mut().find(|d| filter.matches(d)) {
            let mut modified = false;
            for (field, value) in set {
                if existing.get(&field) != Some(&value) {
                    existing.insert(field, value);
                    modified = true;
                }
            }
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_count: 0,
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_count: 0,
                upserted_id: None,
            });
        }

        let mut document = filter.seed_document();
        document.extend(set);
        let (document, id) = with_id(document);
        documents.push(document);

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id),
        })
    }

    async fn delete_one(&self, collection: Collection, filter: Filter) -> Result<DeleteAck, StoreError> {
        let mut collections = self.collections.write().await;
        let deleted_count = match collections.get_mut(&collection) {
            Some(documents) => match documents.iter().position(|d| filter.matches(d)) {
                Some(index) => {
                    documents.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };

        Ok(DeleteAck {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn insert_assigns_hex_object_id() {
        let store = MemoryStore::new();
        let ack = store
            .insert_one(Collection::Reviews, doc(json!({"text": "great"})))
            .await
            .unwrap();

        let id = ack.inserted_id.as_str().unwrap();
        assert!(ObjectId::parse_str(id).is_ok());

        let found = store
            .find_one(Collection::Reviews, Filter::by_id(id).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found["text"], "great");
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = MemoryStore::new();
        store.seed(Collection::Parts, doc(json!({"name": "chain"}))).await;

        assert_eq!(store.find(Collection::Parts, Filter::all()).await.unwrap().len(), 1);
        assert!(store.find(Collection::Orders, Filter::all()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_without_upsert_leaves_store_untouched() {
        let store = MemoryStore::new();
        let ack = store
            .update_one(Collection::Users, Filter::eq("email", "a@x.com"), doc(json!({"role": "admin"})), false)
            .await
            .unwrap();

        assert_eq!(ack.matched_count, 0);
        assert_eq!(ack.upserted_count, 0);
        assert_eq!(store.count(Collection::Users).await, 0);
    }

    #[tokio::test]
    async fn upsert_inserts_once_then_updates() {
        let store = MemoryStore::new();
        let filter = Filter::eq("email", "a@x.com");

        let first = store
            .update_one(Collection::Users, filter.clone(), doc(json!({"email": "a@x.com"})), true)
            .await
            .unwrap();
        assert_eq!(first.upserted_count, 1);
        assert!(first.upserted_id.is_some());

        let second = store
            .update_one(Collection::Users, filter, doc(json!({"email": "a@x.com"})), true)
            .await
            .unwrap();
        assert_eq!(second.matched_count, 1);
        assert_eq!(second.modified_count, 0);
        assert_eq!(store.count(Collection::Users).await, 1);
    }

    #[tokio::test]
    async fn delete_removes_a_single_match() {
        let store = MemoryStore::new();
        store.seed(Collection::Orders, doc(json!({"userEmail": "a@x.com"}))).await;
        store.seed(Collection::Orders, doc(json!({"userEmail": "a@x.com"}))).await;

        let ack = store
            .delete_one(Collection::Orders, Filter::eq("userEmail", "a@x.com"))
            .await
            .unwrap();
        assert_eq!(ack.deleted_count, 1);
        assert_eq!(store.count(Collection::Orders).await, 1);

        let miss = store
            .delete_one(Collection::Orders, Filter::eq("userEmail", "b@x.com"))
            .await
            .unwrap();
        assert_eq!(miss.deleted_count, 0);
    }
}

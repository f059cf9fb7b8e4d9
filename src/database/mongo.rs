use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Database,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

use super::{
    Collection, DeleteAck, Document, DocumentStore, Filter, InsertAck, StoreError, UpdateAck,
};

/// `DocumentStore` backed by a single MongoDB client. The driver pools
/// connections internally, so one instance is shared by every request.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Parses the configured connection string and opens the client.
    ///
    /// The driver connects lazily; call [`DocumentStore::ping`] to force a
    /// round trip.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let uri = config
            .connection_string()
            .map_err(|e| StoreError::Serialization(format!("invalid connection string: {}", e)))?;

        let mut options = ClientOptions::parse(&uri).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.app_name = Some(config.app_name.clone());

        let client = Client::with_options(options)?;
        info!("Opened document store client for database: {}", config.database_name);

        Ok(Self {
            database: client.database(&config.database_name),
        })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<bson::Document> {
        self.database.collection(collection.name())
    }
}

fn to_bson_document(document: &Document) -> Result<bson::Document, StoreError> {
    bson::to_document(document).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Renders a stored document as JSON, with object ids as plain hex strings.
fn to_json_document(document: bson::Document) -> Document {
    document
        .into_iter()
        .map(|(field, value)| (field, to_json_value(value)))
        .collect()
}

fn to_json_value(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(document) => Value::Object(to_json_document(document)),
        Bson::Array(items) => Value::Array(items.into_iter().map(to_json_value).collect()),
        other => other.into_relaxed_extjson(),
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection).find(filter.to_bson()?).await?;
        let documents: Vec<bson::Document> = cursor.try_collect().await?;
        debug!("find on {} returned {} documents", collection.name(), documents.len());
        Ok(documents.into_iter().map(to_json_document).collect())
    }

    async fn find_one(&self, collection: Collection, filter: Filter) -> Result<Option<Document>, StoreError> {
        let found = self.collection(collection).find_one(filter.to_bson()?).await?;
        Ok(found.map(to_json_document))
    }

    async fn insert_one(&self, collection: Collection, document: Document) -> Result<InsertAck, StoreError> {
        let result = self.collection(collection).insert_one(to_bson_document(&document)?).await?;
        Ok(InsertAck {
            acknowledged: true,
            inserted_id: to_json_value(result.inserted_id),
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateAck, StoreError> {
        let update = doc! { "$set": to_bson_document(&set)? };
        let result = self
            .collection(collection)
            .update_one(filter.to_bson()?, update)
            .upsert(upsert)
            .await?;

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(result.upserted_id.is_some()),
            upserted_id: result.upserted_id.map(to_json_value),
        })
    }

    async fn delete_one(&self, collection: Collection, filter: Filter) -> Result<DeleteAck, StoreError> {
        let result = self.collection(collection).delete_one(filter.to_bson()?).await?;
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

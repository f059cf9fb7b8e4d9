use mongodb::bson::{self, oid::ObjectId, Bson};
use serde_json::Value;

use super::{Document, StoreError};

/// Right-hand side of an equality condition.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// A store-generated object id; rendered to clients as a hex string.
    ObjectId(ObjectId),
    Json(Value),
}

/// Conjunction of field equality conditions. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, FilterValue)>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter on `_id`, parsing the hex id the way the driver would.
    pub fn by_id(id: &str) -> Result<Self, StoreError> {
        let oid = ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))?;
        Ok(Self::all().with("_id", FilterValue::ObjectId(oid)))
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and_eq(field, value)
    }

    pub fn and_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(field, FilterValue::Json(value.into()))
    }

    fn with(mut self, field: impl Into<String>, value: FilterValue) -> Self {
        self.conditions.push((field.into(), value));
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            let actual = document.get(field).unwrap_or(&Value::Null);
            match expected {
                FilterValue::ObjectId(oid) => actual.as_str() == Some(oid.to_hex().as_str()),
                FilterValue::Json(value) => actual == value,
            }
        })
    }

    /// Fields a fresh upserted document starts from.
    pub fn seed_document(&self) -> Document {
        self.conditions
            .iter()
            .map(|(field, value)| {
                let value = match value {
                    FilterValue::ObjectId(oid) => Value::String(oid.to_hex()),
                    FilterValue::Json(value) => value.clone(),
                };
                (field.clone(), value)
            })
            .collect()
    }

    pub fn to_bson(&self) -> Result<bson::Document, StoreError> {
        let mut query = bson::Document::new();
        for (field, value) in &self.conditions {
            let value = match value {
                FilterValue::ObjectId(oid) => Bson::ObjectId(*oid),
                FilterValue::Json(value) => {
                    bson::to_bson(value).map_err(|e| StoreError::Serialization(e.to_string()))?
                }
            };
            query.insert(field.clone(), value);
        }
        Ok(query)
    }
}

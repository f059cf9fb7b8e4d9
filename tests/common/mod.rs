#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::Value;
use tower::ServiceExt;

use bicycle_parts_api::{
    app,
    auth::TokenKeys,
    config::AppConfig,
    database::{Collection, Document, MemoryStore},
    AppState,
};

pub const SECRET: &str = "integration-test-secret";

/// Router over an in-memory store, driven without a socket.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub tokens: TokenKeys,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_vars(&[])
    }

    pub fn with_vars(extra: &[(&str, &str)]) -> Self {
        let mut vars: HashMap<String, String> = HashMap::new();
        vars.insert("JSON_WEB_TOKEN".to_string(), SECRET.to_string());
        for (key, value) in extra {
            vars.insert(key.to_string(), value.to_string());
        }
        let config = AppConfig::from_vars(|key| vars.get(key).cloned());

        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(config, store.clone());

        Self {
            store,
            tokens: TokenKeys::new(SECRET, Duration::days(1)),
            router: app(state),
        }
    }

    pub fn token_for(&self, email: &str) -> String {
        self.tokens.issue(email).expect("sign test token")
    }

    pub async fn seed(&self, collection: Collection, value: Value) -> String {
        self.store.seed(collection, object(value)).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        self.dispatch(request).await
    }

    pub async fn dispatch(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Ok((status, body))
    }
}

pub fn object(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {}", other),
    }
}

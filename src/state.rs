//! Application state shared across handlers.

use std::sync::Arc;

use chrono::Duration;

use crate::auth::TokenKeys;
use crate::config::AppConfig;
use crate::database::DocumentStore;

/// Cheaply cloneable handle to the store client, token keys and config.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    store: Arc<dyn DocumentStore>,
    tokens: TokenKeys,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        let ttl = Duration::hours(i64::try_from(config.security.jwt_expiry_hours).unwrap_or(24));
        let tokens = TokenKeys::new(&config.security.jwt_secret, ttl);

        Self {
            inner: Arc::new(AppStateInner { config, store, tokens }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    pub fn tokens(&self) -> &TokenKeys {
        &self.inner.tokens
    }
}

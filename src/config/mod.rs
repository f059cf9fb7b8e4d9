use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub enable_cors: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection string; when set, the credential fields are ignored.
    pub uri: Option<String>,
    pub user_name: String,
    #[serde(skip_serializing)]
    pub user_password: String,
    pub cluster: String,
    pub database_name: String,
    pub app_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    /// Puts the profile and user-upsert routes behind the token verifier.
    pub require_auth_for_profiles: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup, falling back to the
    /// environment profile defaults for anything unset or unparseable.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_overrides(lookup)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server
        if let Some(v) = lookup("BIND_ADDRESS") {
            self.server.bind_address = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.server.enable_cors = v.parse().unwrap_or(self.server.enable_cors);
        }
        if let Some(v) = lookup("API_MAX_REQUEST_SIZE_BYTES") {
            self.server.max_request_size_bytes = v.parse().unwrap_or(self.server.max_request_size_bytes);
        }

        // Database
        if let Some(v) = lookup("MONGODB_URI").filter(|v| !v.trim().is_empty()) {
            self.database.uri = Some(v);
        }
        if let Some(v) = lookup("USER_NAME") {
            self.database.user_name = v;
        }
        if let Some(v) = lookup("USER_PASSWORD") {
            self.database.user_password = v;
        }
        if let Some(v) = lookup("MONGODB_CLUSTER") {
            self.database.cluster = v;
        }
        if let Some(v) = lookup("DATABASE_NAME") {
            self.database.database_name = v;
        }
        if let Some(v) = lookup("DATABASE_APP_NAME") {
            self.database.app_name = v;
        }

        // Security
        if let Some(v) = lookup("JSON_WEB_TOKEN") {
            self.security.jwt_secret = v;
        }
        if let Some(v) = lookup("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Some(v) = lookup("REQUIRE_AUTH_FOR_PROFILES") {
            self.security.require_auth_for_profiles =
                v.parse().unwrap_or(self.security.require_auth_for_profiles);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 5000,
                enable_cors: true,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            database: DatabaseConfig {
                uri: None,
                user_name: String::new(),
                user_password: String::new(),
                cluster: "cluster0.jhwgt.mongodb.net".to_string(),
                database_name: "bicycleParts".to_string(),
                app_name: "bicycle-parts-api".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                require_auth_for_profiles: false,
            },
        }
    }

    fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.server.max_request_size_bytes = 1024 * 1024; // 1MB
        config
    }

    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self.environment {
            Environment::Development => "info,bicycle_parts_api=debug,tower_http=debug",
            Environment::Production => "info",
        }
    }
}

impl DatabaseConfig {
    /// Connection string for the document store.
    ///
    /// Credentials are percent-encoded into the userinfo section, so passwords
    /// containing `@` or `:` survive the round trip.
    pub fn connection_string(&self) -> Result<String, url::ParseError> {
        if let Some(uri) = &self.uri {
            return Ok(uri.clone());
        }

        let mut url = url::Url::parse(&format!("mongodb+srv://{}/", self.cluster))?;
        if !self.user_name.is_empty() {
            // Only fails for URLs without a host, which parse() already rejected.
            let _ = url.set_username(&self.user_name);
            let _ = url.set_password(Some(&self.user_password));
        }
        url.query_pairs_mut()
            .append_pair("retryWrites", "true")
            .append_pair("w", "majority");
        Ok(url.into())
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

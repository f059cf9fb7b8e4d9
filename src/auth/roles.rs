use serde_json::Value;

use crate::database::{Collection, DocumentStore, Filter, StoreError};

/// Role names stored in a user document's `role` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
        }
    }
}

/// Whether the user stored under `email` carries `role`.
///
/// A missing user document, or one without a `role` field, has no role.
pub async fn has_role(store: &dyn DocumentStore, email: &str, role: Role) -> Result<bool, StoreError> {
    let user = store.find_one(Collection::Users, Filter::eq("email", email)).await?;

    Ok(match user.as_ref().and_then(|u| u.get("role")) {
        Some(Value::String(stored)) => stored == role.as_str(),
        _ => false,
    })
}

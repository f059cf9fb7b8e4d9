// handlers/protected/mod.rs - endpoints behind the token verifier
//
// Every handler here can rely on an `AuthUser` extension inserted by
// `middleware::require_token`.
pub mod admin;
pub mod orders;
pub mod purchase;
pub mod reviews;

pub use admin::admin_get;
pub use orders::{order_delete, orders_get, orders_post};
pub use purchase::{purchase_get, purchase_patch};
pub use reviews::reviews_post;

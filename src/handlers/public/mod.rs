// handlers/public/mod.rs - endpoints reachable without a bearer token
//
// Profile and user-upsert routes live here because the storefront client calls
// them before it holds a token. Setting REQUIRE_AUTH_FOR_PROFILES moves them
// behind the token verifier without changing the handlers.
pub mod catalog;
pub mod profile;
pub mod root;
pub mod user;

pub use catalog::{reviews_get, tools_get};
pub use profile::{profile_get, profile_put};
pub use root::{health, root};
pub use user::user_put;

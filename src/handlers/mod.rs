// handlers/mod.rs - handlers grouped by security tier
//
// Public (no auth) → Protected (bearer token required)
pub mod protected;
pub mod public;

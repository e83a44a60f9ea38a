// handlers/mod.rs
//
// Public: resource reads, health and the OAuth sign-in flow.
// Authenticated: resource creation (authenticate gate).
// Owner-only: resource update and delete (authenticate + require_owner gates).
pub mod health;
pub mod oauth;
pub mod resource;

//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types
//! - `wire.rs` — Raw serde structs matching backend payloads
//! - `convert.rs` — `From` conversions into domain types
//! - `state.rs` — State containers with update methods
//! - `client.rs` — Sub-client with HTTP methods

pub mod chat;
pub mod coin;
pub mod profile;
pub mod session;
pub mod watchlist;

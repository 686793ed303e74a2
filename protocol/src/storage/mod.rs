//! # Storage Module
//!
//! Persistence for the host layer. The minting core never touches this:
//! it returns strings, and what happens to them afterwards is the
//! caller's business.
//!
//! ```text
//! state.rs: ResourceState, the persisted attributes of one resource
//! db.rs   : sled-backed ResourceDb, keyed by resource name
//! ```
//!
//! Bincode for on-disk values: compact and deterministic. JSON is for the
//! CLI's output.

pub mod db;
pub mod state;

pub use db::{DbError, DbResult, ResourceDb};
pub use state::{Keepers, ResourceState};

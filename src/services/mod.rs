//! Data services
//!
//! - Resource file loading/saving (JSON or YAML)
//! - In-memory store that handles the table's events

pub mod resource;
pub mod store;

pub use store::MemoryStore;

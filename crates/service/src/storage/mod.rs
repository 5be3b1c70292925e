//! Storage abstractions for the service layer
//!
//! Contains the generic in-memory record store shared by every record kind.

pub mod entity_store;

pub use entity_store::EntityStore;

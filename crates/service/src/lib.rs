//! Service layer providing record operations on top of the in-memory store.
//! - `storage::EntityStore` owns IDs, locking and bulk field updates.
//! - `services` clean and validate input before touching a store.
//! - `seed` bootstraps demo data once per store.

pub mod errors;
pub mod seed;
pub mod services;
pub mod storage;

pub use errors::{ServiceError, StoreError};
pub use services::{ThingService, VentureService};
pub use storage::EntityStore;

//! Key-value state for the catalog front end
//!
//! Local demo state (vehicles added from the admin panel without a backend
//! round-trip, the admin session flag) lives behind [`KeyValueStore`] so the
//! backing storage can be swapped: a JSON file on disk for the CLI, memory for
//! tests.

pub mod custom_vehicles;
pub mod kv;
pub mod session;

pub use custom_vehicles::CustomVehicleStore;
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use session::AdminSession;

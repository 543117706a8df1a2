//! Infrastructure layer
//!
//! File-backed stand-ins for the hosted backend tables, the adapters that map
//! backend rows onto domain records, and the fleet import loaders.

pub mod fleet_loader;
pub mod mapping;
pub mod persistence;
pub mod vehicle_csv;

//! Domain model types

pub mod criteria;
pub mod vehicle_form;

pub use criteria::{CapacityBand, QueryCriteria, SortKey};
pub use vehicle_form::VehicleForm;

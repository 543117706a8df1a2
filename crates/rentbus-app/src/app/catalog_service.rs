//! Catalog Service - public fleet browsing
//!
//! The catalog snapshot is the backend vehicle table (newest first) followed
//! by vehicles added locally through the key-value store. Every query runs
//! the pure catalog engine over that snapshot.

use thiserror::Error;

use rentbus_domain::model::QueryCriteria;
use rentbus_domain::repository::RecordRepository;
use rentbus_domain::service::{category_counts, query, CategoryCount};
use rentbus_store::{CustomVehicleStore, KeyValueStore};
use rentbus_types::{Availability, Error, VehicleRecord};

use crate::constants::SIMILAR_VEHICLE_COUNT;

/// Errors specific to the catalog service
#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Catalog unavailable: {0}")]
    Backend(#[from] Error),
}

impl From<CatalogServiceError> for Error {
    fn from(err: CatalogServiceError) -> Self {
        match err {
            CatalogServiceError::VehicleNotFound(id) => Error::NotFound(format!("vehicle {}", id)),
            CatalogServiceError::Backend(e) => e,
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogServiceError>;

pub struct CatalogService<R, S> {
    vehicles: R,
    custom: CustomVehicleStore<S>,
}

impl<R, S> CatalogService<R, S>
where
    R: RecordRepository<VehicleRecord>,
    S: KeyValueStore,
{
    pub fn new(vehicles: R, kv: S) -> Self {
        Self {
            vehicles,
            custom: CustomVehicleStore::new(kv),
        }
    }

    /// Backend vehicles followed by locally added ones
    pub fn snapshot(&self) -> CatalogResult<Vec<VehicleRecord>> {
        let backend = self.vehicles.find_all()?;
        Ok(self.custom.merged_with(backend))
    }

    /// Run a catalog query over a fresh snapshot
    pub fn browse(&self, criteria: &QueryCriteria) -> CatalogResult<Vec<VehicleRecord>> {
        let snapshot = self.snapshot()?;
        let results = query(&snapshot, criteria);
        tracing::debug!(
            total = snapshot.len(),
            shown = results.len(),
            "browse"
        );
        Ok(results)
    }

    pub fn vehicle_detail(&self, id: &str) -> CatalogResult<VehicleRecord> {
        self.snapshot()?
            .into_iter()
            .find(|v| v.id == id)
            .ok_or_else(|| CatalogServiceError::VehicleNotFound(id.to_string()))
    }

    /// Other vehicles of the same type, catalog order
    pub fn similar(&self, vehicle: &VehicleRecord) -> CatalogResult<Vec<VehicleRecord>> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|v| v.id != vehicle.id && v.vehicle_type == vehicle.vehicle_type)
            .take(SIMILAR_VEHICLE_COUNT)
            .collect())
    }

    /// First `n` vehicles that are bookable right now
    pub fn featured(&self, n: usize) -> CatalogResult<Vec<VehicleRecord>> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter(|v| v.availability == Availability::Available)
            .take(n)
            .collect())
    }

    /// Homepage category tiles
    pub fn categories(&self) -> CatalogResult<Vec<CategoryCount>> {
        Ok(category_counts(&self.snapshot()?))
    }

    /// Add a vehicle to the local list only
    pub fn add_custom(&self, vehicle: VehicleRecord) -> CatalogResult<()> {
        tracing::info!(id = %vehicle.id, "custom vehicle added");
        Ok(self.custom.add(vehicle)?)
    }

    /// Remove a locally added vehicle; `false` if it was not there
    pub fn remove_custom(&self, id: &str) -> CatalogResult<bool> {
        Ok(self.custom.remove(id)?)
    }
}

//! File-backed vehicles table

use std::path::Path;

use chrono::Utc;

use rentbus_domain::repository::RecordRepository;
use rentbus_types::{Result, VehicleRecord};

use super::json_table::JsonTable;
use crate::mapping::VehicleRow;

/// Vehicles stored as backend rows and mapped through the row adapter
pub struct FileVehicleRepository {
    table: JsonTable<VehicleRow>,
}

impl FileVehicleRepository {
    pub fn open(store_dir: &Path) -> Result<Self> {
        Ok(Self {
            table: JsonTable::open(store_dir, "vehicles")?,
        })
    }
}

impl RecordRepository<VehicleRecord> for FileVehicleRepository {
    /// Newest rows first; rows the adapter rejects are skipped
    fn find_all(&self) -> Result<Vec<VehicleRecord>> {
        let mut rows = self.table.snapshot();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id.clone();
                VehicleRecord::try_from(row)
                    .map_err(|e| tracing::warn!(id = %id, error = %e, "skipping vehicle row"))
                    .ok()
            })
            .collect())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<VehicleRecord>> {
        self.table
            .get(id)
            .map(VehicleRecord::try_from)
            .transpose()
            .map_err(Into::into)
    }

    fn insert(&self, record: &VehicleRecord) -> Result<()> {
        self.table.insert(VehicleRow::from_record(record, Utc::now()))
    }

    /// Rewrite every column except `created_at`
    fn update(&self, record: &VehicleRecord) -> Result<()> {
        self.table.modify(&record.id, |row| {
            *row = VehicleRow::from_record(record, row.created_at);
            Ok(())
        })
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.table.remove(id).map(|_| ())
    }
}

//! File-backed repositories for the lead and operator tables

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use rentbus_domain::repository::{Keyed, RecordRepository};
use rentbus_types::{BusOwnerLead, Inquiry, Operator, Result};

use super::json_table::JsonTable;

/// A record stored verbatim in its own table
pub trait TableRecord: Keyed + Serialize + DeserializeOwned + Clone {
    const TABLE: &'static str;

    fn created_at(&self) -> DateTime<Utc>;
}

impl TableRecord for Operator {
    const TABLE: &'static str = "operators";

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl TableRecord for Inquiry {
    const TABLE: &'static str = "inquiries";

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl TableRecord for BusOwnerLead {
    const TABLE: &'static str = "bus_owner_leads";

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Generic table repository; listings are newest first
pub struct FileRecordRepository<T> {
    table: JsonTable<T>,
}

pub type FileOperatorRepository = FileRecordRepository<Operator>;
pub type FileInquiryRepository = FileRecordRepository<Inquiry>;
pub type FileOwnerLeadRepository = FileRecordRepository<BusOwnerLead>;

impl<T: TableRecord> FileRecordRepository<T> {
    pub fn open(store_dir: &Path) -> Result<Self> {
        Ok(Self {
            table: JsonTable::open(store_dir, T::TABLE)?,
        })
    }
}

impl<T: TableRecord> RecordRepository<T> for FileRecordRepository<T> {
    fn find_all(&self) -> Result<Vec<T>> {
        let mut rows = self.table.snapshot();
        rows.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(rows)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        Ok(self.table.get(id))
    }

    fn insert(&self, record: &T) -> Result<()> {
        self.table.insert(record.clone())
    }

    fn update(&self, record: &T) -> Result<()> {
        self.table.replace(record.clone())
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.table.remove(id).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rentbus_types::{Error, InquiryStatus, StoreError};
    use tempfile::TempDir;

    fn operator(id: &str, name: &str, created_at: DateTime<Utc>) -> Operator {
        Operator {
            id: id.to_string(),
            business_name: name.to_string(),
            contact_person: String::new(),
            contact_number: "0674-200000".to_string(),
            address: None,
            created_at,
        }
    }

    #[test]
    fn test_find_all_newest_first() {
        let dir = TempDir::new().unwrap();
        let repo = FileOperatorRepository::open(dir.path()).unwrap();
        let now = Utc::now();
        repo.insert(&operator("old", "Odisha Roadways", now - Duration::days(3)))
            .unwrap();
        repo.insert(&operator("new", "Kalinga Travels", now)).unwrap();

        let ids: Vec<_> = repo.find_all().unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[test]
    fn test_update_and_delete() {
        let dir = TempDir::new().unwrap();
        let repo = FileOperatorRepository::open(dir.path()).unwrap();
        let mut op = operator("op", "Kalinga Travels", Utc::now());
        repo.insert(&op).unwrap();

        op.business_name = "Kalinga Tours".to_string();
        repo.update(&op).unwrap();
        assert_eq!(
            repo.find_by_id("op").unwrap().map(|o| o.business_name).as_deref(),
            Some("Kalinga Tours")
        );

        repo.delete("op").unwrap();
        assert!(repo.find_by_id("op").unwrap().is_none());
        assert!(matches!(
            repo.delete("op"),
            Err(Error::Store(StoreError::NotFound { table: "operators", .. }))
        ));
    }

    #[test]
    fn test_inquiries_persist_status() {
        let dir = TempDir::new().unwrap();
        let inquiry = Inquiry {
            id: "i-1".to_string(),
            full_name: "Priya Das".to_string(),
            mobile: "9876543210".to_string(),
            email: None,
            vehicle_type: Some("bus".to_string()),
            preferred_vehicle: None,
            journey_start_date: "2026-12-20".to_string(),
            journey_end_date: None,
            pickup_location: Some("Bhubaneswar".to_string()),
            drop_location: Some("Puri".to_string()),
            passenger_count: 40,
            message: None,
            status: InquiryStatus::Quoted,
            internal_notes: None,
            created_at: Utc::now(),
        };

        FileInquiryRepository::open(dir.path())
            .unwrap()
            .insert(&inquiry)
            .unwrap();

        let reopened = FileInquiryRepository::open(dir.path()).unwrap();
        assert_eq!(reopened.find_by_id("i-1").unwrap(), Some(inquiry));
        assert!(dir.path().join("inquiries.json").exists());
    }
}

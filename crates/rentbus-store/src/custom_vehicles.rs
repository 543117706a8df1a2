//! Vehicles added locally on top of the backend catalog

use crate::kv::KeyValueStore;
use rentbus_types::{Result, VehicleRecord};

/// Key under which locally added vehicles are kept
pub const CUSTOM_VEHICLES_KEY: &str = "rentbus_custom_vehicles";

/// Locally stored vehicle list
pub struct CustomVehicleStore<S> {
    kv: S,
}

impl<S: KeyValueStore> CustomVehicleStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Load stored vehicles.
    ///
    /// Anything that is not a JSON array yields an empty list, and array
    /// elements that do not decode as vehicles are skipped.
    pub fn load(&self) -> Vec<VehicleRecord> {
        let raw = match self.kv.get(CUSTOM_VEHICLES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "custom vehicles unavailable");
                return Vec::new();
            }
        };

        let parsed: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "custom vehicles are not valid JSON");
                return Vec::new();
            }
        };

        match parsed {
            serde_json::Value::Array(items) => items
                .into_iter()
                .filter(|item| item.is_object())
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Replace the stored list
    pub fn save(&self, vehicles: &[VehicleRecord]) -> Result<()> {
        let raw = serde_json::to_string(vehicles)?;
        self.kv.set(CUSTOM_VEHICLES_KEY, &raw)
    }

    /// Append a vehicle
    pub fn add(&self, vehicle: VehicleRecord) -> Result<()> {
        let mut vehicles = self.load();
        vehicles.push(vehicle);
        self.save(&vehicles)
    }

    /// Remove a vehicle by ID
    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut vehicles = self.load();
        let before = vehicles.len();
        vehicles.retain(|v| v.id != id);
        if vehicles.len() == before {
            return Ok(false);
        }
        self.save(&vehicles)?;
        Ok(true)
    }

    /// Backend vehicles followed by the locally added ones
    pub fn merged_with(&self, base: Vec<VehicleRecord>) -> Vec<VehicleRecord> {
        let mut all = base;
        all.extend(self.load());
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use rentbus_types::{AcCategory, VehicleType};

    fn sample(name: &str) -> VehicleRecord {
        VehicleRecord::new(name, VehicleType::Bus, AcCategory::Ac, 40, "₹20,000")
    }

    #[test]
    fn test_empty_when_unset() {
        let kv = MemoryStore::new();
        let store = CustomVehicleStore::new(&kv);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_add_and_remove() {
        let kv = MemoryStore::new();
        let store = CustomVehicleStore::new(&kv);
        let vehicle = sample("Night Rider");
        let id = vehicle.id.clone();
        store.add(vehicle).unwrap();
        assert_eq!(store.load().len(), 1);
        assert!(store.remove(&id).unwrap());
        assert!(!store.remove(&id).unwrap());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_non_array_is_ignored() {
        let kv = MemoryStore::new();
        kv.set(CUSTOM_VEHICLES_KEY, r#"{"id": "1"}"#).unwrap();
        let store = CustomVehicleStore::new(&kv);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_bad_elements_are_skipped() {
        let kv = MemoryStore::new();
        let good = serde_json::to_value(sample("Keeper")).unwrap();
        let raw = serde_json::json!([42, "text", null, good, {"id": "partial"}]).to_string();
        kv.set(CUSTOM_VEHICLES_KEY, &raw).unwrap();

        let store = CustomVehicleStore::new(&kv);
        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Keeper");
    }

    #[test]
    fn test_merged_order() {
        let kv = MemoryStore::new();
        let store = CustomVehicleStore::new(&kv);
        store.add(sample("Local")).unwrap();
        let merged = store.merged_with(vec![sample("Remote")]);
        let names: Vec<_> = merged.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Remote", "Local"]);
    }
}

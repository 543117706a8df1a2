//! Fleet seed data loader from TOML
//!
//! ```toml
//! [[vehicles]]
//! id = "1"
//! name = "Luxury AC Sleeper Bus"
//! type = "bus"
//! category = "ac"
//! seating_capacity = 45
//! price_display = "₹18,000"
//! availability = "available"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use rentbus_types::{
    AcCategory, Availability, BusLayout, Result, ValidationError, VehicleRecord, VehicleType,
    PRICE_ON_REQUEST,
};

/// Container for parsing a fleet file
#[derive(Debug, Deserialize)]
struct FleetFile {
    #[serde(default)]
    vehicles: Vec<FleetEntry>,
}

#[derive(Debug, Deserialize)]
struct FleetEntry {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(rename = "type")]
    vehicle_type: VehicleType,
    category: AcCategory,
    seating_capacity: u32,
    #[serde(default)]
    price_display: Option<String>,
    #[serde(default)]
    amenities: Vec<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    ideal_for: Vec<String>,
    #[serde(default)]
    availability: Availability,
    #[serde(default)]
    bus_layout: BusLayout,
}

impl FleetEntry {
    fn into_record(self) -> std::result::Result<VehicleRecord, ValidationError> {
        if self.seating_capacity == 0 {
            return Err(ValidationError::InvalidValue {
                field: "seating_capacity",
                value: format!("0 ({})", self.name),
            });
        }

        let price = self
            .price_display
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| PRICE_ON_REQUEST.to_string());

        let mut record = VehicleRecord::new(
            self.name,
            self.vehicle_type,
            self.category,
            self.seating_capacity,
            price,
        )
        .with_amenities(self.amenities)
        .with_availability(self.availability)
        .with_description(self.description);

        if let Some(id) = self.id {
            record = record.with_id(id);
        }
        record.images = self.images;
        record.ideal_for = self.ideal_for;
        record.bus_layout = self.bus_layout;
        Ok(record)
    }
}

/// Load a fleet from a TOML file
pub fn load_fleet_file(path: &Path) -> Result<Vec<VehicleRecord>> {
    let content = fs::read_to_string(path)?;
    load_fleet_str(&content)
}

/// Load a fleet from a TOML string, keeping file order
pub fn load_fleet_str(toml_content: &str) -> Result<Vec<VehicleRecord>> {
    let fleet: FleetFile = toml::from_str(toml_content)?;
    let vehicles = fleet
        .vehicles
        .into_iter()
        .map(FleetEntry::into_record)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::debug!(count = vehicles.len(), "loaded fleet");
    Ok(vehicles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOML: &str = r#"
[[vehicles]]
id = "1"
name = "Luxury AC Sleeper Bus"
type = "bus"
category = "ac"
seating_capacity = 45
price_display = "₹18,000"
amenities = ["Sleeper Berths", "Blankets"]

[[vehicles]]
name = "Non-AC Deluxe Bus"
type = "bus"
category = "non-ac"
seating_capacity = 52
availability = "booked"
bus_layout = "1x2"
"#;

    #[test]
    fn test_load_from_str() {
        let fleet = load_fleet_str(TEST_TOML).unwrap();
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet[0].id, "1");
        assert_eq!(fleet[0].amenities.len(), 2);
        assert_eq!(fleet[1].ac_category, AcCategory::NonAc);
        assert_eq!(fleet[1].price_display, PRICE_ON_REQUEST);
        assert_eq!(fleet[1].availability, Availability::Booked);
        assert_eq!(fleet[1].bus_layout, BusLayout::OneByTwo);
    }

    #[test]
    fn test_empty_file_is_empty_fleet() {
        assert!(load_fleet_str("").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let toml = r#"
[[vehicles]]
name = "Hovercraft"
type = "boat"
category = "ac"
seating_capacity = 10
"#;
        assert!(load_fleet_str(toml).is_err());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let toml = r#"
[[vehicles]]
name = "Ghost"
type = "bus"
category = "ac"
seating_capacity = 0
"#;
        assert!(load_fleet_str(toml).is_err());
    }
}

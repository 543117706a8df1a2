//! Admin vehicle form
//!
//! Mirrors the admin editor: list fields are typed as comma-separated text
//! and seating capacity as free text.

use rentbus_types::{
    AcCategory, Availability, BusLayout, ValidationError, VehicleRecord, VehicleType,
    PRICE_ON_REQUEST,
};

/// Raw admin form input for a vehicle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleForm {
    pub name: String,
    pub vehicle_type: VehicleType,
    pub is_ac: bool,
    pub seating_capacity: String,
    pub price_display: String,
    pub amenities: String,
    pub images: String,
    pub ideal_for: String,
    pub description: String,
    pub availability: Availability,
    pub bus_layout: BusLayout,
    /// `"none"` or empty clears the operator
    pub operator_id: String,
    pub agent_contact_number: String,
}

impl Default for VehicleForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            vehicle_type: VehicleType::Bus,
            is_ac: true,
            seating_capacity: String::new(),
            price_display: String::new(),
            amenities: String::new(),
            images: String::new(),
            ideal_for: String::new(),
            description: String::new(),
            availability: Availability::Available,
            bus_layout: BusLayout::TwoByTwo,
            operator_id: String::new(),
            agent_contact_number: String::new(),
        }
    }
}

impl VehicleForm {
    /// Pre-fill the form from an existing record
    pub fn from_record(record: &VehicleRecord) -> Self {
        Self {
            name: record.name.clone(),
            vehicle_type: record.vehicle_type,
            is_ac: record.ac_category.is_ac(),
            seating_capacity: record.seating_capacity.to_string(),
            price_display: record.price_display.clone(),
            amenities: record.amenities.join(", "),
            images: record.images.join(", "),
            ideal_for: record.ideal_for.join(", "),
            description: record.description.clone(),
            availability: record.availability,
            bus_layout: record.bus_layout,
            operator_id: record.operator_id.clone().unwrap_or_default(),
            agent_contact_number: record.agent_contact_number.clone().unwrap_or_default(),
        }
    }

    /// Validate and build a record.
    ///
    /// Capacity must parse to at least one seat; the catalog never holds a
    /// zero-seat vehicle.
    pub fn into_record(self, id: String) -> Result<VehicleRecord, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }

        let seating_capacity = self
            .seating_capacity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|seats| *seats >= 1)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "seating_capacity",
                value: self.seating_capacity.clone(),
            })?;

        let price_display = match self.price_display.trim() {
            "" => PRICE_ON_REQUEST.to_string(),
            price => price.to_string(),
        };

        let operator_id = match self.operator_id.trim() {
            "" | "none" => None,
            id => Some(id.to_string()),
        };

        Ok(VehicleRecord {
            id,
            name,
            vehicle_type: self.vehicle_type,
            ac_category: AcCategory::from_is_ac(self.is_ac),
            seating_capacity,
            price_display,
            amenities: split_list(&self.amenities),
            images: split_list(&self.images),
            description: self.description.trim().to_string(),
            ideal_for: split_list(&self.ideal_for),
            availability: self.availability,
            bus_layout: self.bus_layout,
            operator_id,
            agent_contact_number: non_empty(&self.agent_contact_number),
        })
    }
}

/// Split comma-separated text, dropping blanks
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> VehicleForm {
        VehicleForm {
            name: "Executive AC Coach".to_string(),
            seating_capacity: "50".to_string(),
            price_display: "₹15,000".to_string(),
            amenities: "Air Conditioning, , Push-back Seats,Mic System ".to_string(),
            operator_id: "none".to_string(),
            ..VehicleForm::default()
        }
    }

    #[test]
    fn test_builds_record() {
        let record = form().into_record("v-1".to_string()).unwrap();
        assert_eq!(record.seating_capacity, 50);
        assert_eq!(
            record.amenities,
            vec!["Air Conditioning", "Push-back Seats", "Mic System"]
        );
        assert_eq!(record.ac_category, AcCategory::Ac);
        assert!(record.operator_id.is_none());
        assert!(record.agent_contact_number.is_none());
    }

    #[test]
    fn test_zero_seats_rejected() {
        let mut f = form();
        f.seating_capacity = "0".to_string();
        assert!(matches!(
            f.into_record("v".to_string()),
            Err(ValidationError::InvalidValue { field: "seating_capacity", .. })
        ));
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut f = form();
        f.name = "   ".to_string();
        assert_eq!(
            f.into_record("v".to_string()),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_blank_price_is_on_request() {
        let mut f = form();
        f.price_display = String::new();
        let record = f.into_record("v".to_string()).unwrap();
        assert_eq!(record.price_display, PRICE_ON_REQUEST);
    }

    #[test]
    fn test_record_round_trips_through_form() {
        let record = form().into_record("v-9".to_string()).unwrap();
        let again = VehicleForm::from_record(&record)
            .into_record("v-9".to_string())
            .unwrap();
        assert_eq!(record, again);
    }
}

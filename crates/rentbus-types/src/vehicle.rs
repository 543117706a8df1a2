//! Vehicle catalog types

use serde::{Deserialize, Serialize};

/// Vehicle body type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Bus,
    Traveller,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Bus => "bus",
            VehicleType::Traveller => "traveller",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bus" => Some(VehicleType::Bus),
            "traveller" | "tempo-traveller" => Some(VehicleType::Traveller),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Bus => "Bus",
            VehicleType::Traveller => "Tempo Traveller",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Air-conditioning category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcCategory {
    #[default]
    #[serde(rename = "ac")]
    Ac,
    #[serde(rename = "non-ac", alias = "non_ac")]
    NonAc,
}

impl AcCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcCategory::Ac => "ac",
            AcCategory::NonAc => "non-ac",
        }
    }

    /// Accepts both the URL spelling (`non-ac`) and the enum spelling (`non_ac`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ac" => Some(AcCategory::Ac),
            "non-ac" | "non_ac" | "nonac" => Some(AcCategory::NonAc),
            _ => None,
        }
    }

    pub fn from_is_ac(is_ac: bool) -> Self {
        if is_ac {
            AcCategory::Ac
        } else {
            AcCategory::NonAc
        }
    }

    pub fn is_ac(&self) -> bool {
        matches!(self, AcCategory::Ac)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AcCategory::Ac => "AC",
            AcCategory::NonAc => "Non-AC",
        }
    }
}

impl std::fmt::Display for AcCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking availability of a vehicle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Limited,
    Booked,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Limited => "limited",
            Availability::Booked => "booked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "available" => Some(Availability::Available),
            "limited" => Some(Availability::Limited),
            "booked" => Some(Availability::Booked),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::Available => "Available Now",
            Availability::Limited => "Limited Dates",
            Availability::Booked => "Booked",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seat layout for buses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusLayout {
    #[serde(rename = "1x2")]
    OneByTwo,
    #[default]
    #[serde(rename = "2x2")]
    TwoByTwo,
}

impl BusLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusLayout::OneByTwo => "1x2",
            BusLayout::TwoByTwo => "2x2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1x2" => Some(BusLayout::OneByTwo),
            "2x2" => Some(BusLayout::TwoByTwo),
            _ => None,
        }
    }
}

/// Display string used when a vehicle has no published price
pub const PRICE_ON_REQUEST: &str = "On Request";

/// A vehicle as seen by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// Unique identifier
    pub id: String,
    /// Display name (e.g., "Luxury AC Sleeper Bus")
    pub name: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    #[serde(rename = "category")]
    pub ac_category: AcCategory,
    pub seating_capacity: u32,
    /// Free-form price label (e.g., "₹18,000")
    pub price_display: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ideal_for: Vec<String>,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default)]
    pub bus_layout: BusLayout,
    #[serde(default)]
    pub operator_id: Option<String>,
    #[serde(default)]
    pub agent_contact_number: Option<String>,
}

impl VehicleRecord {
    pub fn new(
        name: impl Into<String>,
        vehicle_type: VehicleType,
        ac_category: AcCategory,
        seating_capacity: u32,
        price_display: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            vehicle_type,
            ac_category,
            seating_capacity,
            price_display: price_display.into(),
            amenities: Vec::new(),
            images: Vec::new(),
            description: String::new(),
            ideal_for: Vec::new(),
            availability: Availability::Available,
            bus_layout: BusLayout::TwoByTwo,
            operator_id: None,
            agent_contact_number: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }
}

//! Catalog query criteria
//!
//! Every field parses leniently: `"all"`, empty input and anything
//! unrecognised mean "no constraint". A typo in a shared link widens the
//! listing instead of emptying it.

use rentbus_types::{AcCategory, Availability, VehicleType};
use serde::{Deserialize, Serialize};

/// Seating capacity bucket offered by the catalog filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityBand {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "1-15")]
    UpTo15,
    #[serde(rename = "16-30")]
    From16To30,
    #[serde(rename = "31-50")]
    From31To50,
    #[serde(rename = "50+")]
    Over50,
}

impl CapacityBand {
    /// Unknown bands fall back to `All`
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "1-15" => CapacityBand::UpTo15,
            "16-30" => CapacityBand::From16To30,
            "31-50" => CapacityBand::From31To50,
            "50+" => CapacityBand::Over50,
            _ => CapacityBand::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CapacityBand::All => "all",
            CapacityBand::UpTo15 => "1-15",
            CapacityBand::From16To30 => "16-30",
            CapacityBand::From31To50 => "31-50",
            CapacityBand::Over50 => "50+",
        }
    }

    /// Bounds are inclusive; the top band is open-ended above 50
    pub fn contains(&self, seats: u32) -> bool {
        match self {
            CapacityBand::All => true,
            CapacityBand::UpTo15 => (1..=15).contains(&seats),
            CapacityBand::From16To30 => (16..=30).contains(&seats),
            CapacityBand::From31To50 => (31..=50).contains(&seats),
            CapacityBand::Over50 => seats > 50,
        }
    }
}

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Recommended,
    PriceLowToHigh,
    PriceHighToLow,
    CapacityLowToHigh,
    CapacityHighToLow,
}

impl SortKey {
    /// Accepts the long names and the short catalog aliases; anything else is `Recommended`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "price_low_to_high" | "price-low" => SortKey::PriceLowToHigh,
            "price_high_to_low" | "price-high" => SortKey::PriceHighToLow,
            "capacity_low_to_high" | "capacity-low" => SortKey::CapacityLowToHigh,
            "capacity_high_to_low" | "capacity-high" => SortKey::CapacityHighToLow,
            _ => SortKey::Recommended,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Recommended => "recommended",
            SortKey::PriceLowToHigh => "price_low_to_high",
            SortKey::PriceHighToLow => "price_high_to_low",
            SortKey::CapacityLowToHigh => "capacity_low_to_high",
            SortKey::CapacityHighToLow => "capacity_high_to_low",
        }
    }
}

/// Search text, filters and sort key for one catalog query.
///
/// `None` on a filter field means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCriteria {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub vehicle_type: Option<VehicleType>,
    #[serde(default)]
    pub ac_category: Option<AcCategory>,
    #[serde(default)]
    pub capacity_band: CapacityBand,
    #[serde(default)]
    pub availability: Option<Availability>,
    #[serde(default)]
    pub sort_key: SortKey,
}

/// URL parameter names used by the catalog page
pub mod params {
    pub const SEARCH: &str = "q";
    pub const TYPE: &str = "type";
    pub const CATEGORY: &str = "category";
    pub const CAPACITY: &str = "capacity";
    pub const AVAILABILITY: &str = "availability";
    pub const SORT: &str = "sort";
}

impl QueryCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_type(mut self, raw: &str) -> Self {
        self.vehicle_type = lenient(raw, VehicleType::parse, params::TYPE);
        self
    }

    pub fn with_category(mut self, raw: &str) -> Self {
        self.ac_category = lenient(raw, AcCategory::parse, params::CATEGORY);
        self
    }

    pub fn with_capacity(mut self, raw: &str) -> Self {
        self.capacity_band = CapacityBand::parse(raw);
        self
    }

    pub fn with_availability(mut self, raw: &str) -> Self {
        self.availability = lenient(raw, Availability::parse, params::AVAILABILITY);
        self
    }

    pub fn with_sort(mut self, raw: &str) -> Self {
        self.sort_key = SortKey::parse(raw);
        self
    }

    /// Build criteria from URL-style key/value pairs; unknown keys are ignored
    pub fn from_params<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .fold(Self::default(), |criteria, (key, value)| match key {
                params::SEARCH => criteria.with_search(value),
                params::TYPE => criteria.with_type(value),
                params::CATEGORY => criteria.with_category(value),
                params::CAPACITY => criteria.with_capacity(value),
                params::AVAILABILITY => criteria.with_availability(value),
                params::SORT => criteria.with_sort(value),
                _ => criteria,
            })
    }

    /// Active filters as URL pairs; filters left at "all" are omitted
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(t) = self.vehicle_type {
            pairs.push((params::TYPE, t.as_str().to_string()));
        }
        if let Some(c) = self.ac_category {
            pairs.push((params::CATEGORY, c.as_str().to_string()));
        }
        if self.capacity_band != CapacityBand::All {
            pairs.push((params::CAPACITY, self.capacity_band.as_str().to_string()));
        }
        if let Some(a) = self.availability {
            pairs.push((params::AVAILABILITY, a.as_str().to_string()));
        }
        pairs
    }

    /// True if any filter (not search, not sort) is constrained
    pub fn has_active_filters(&self) -> bool {
        self.vehicle_type.is_some()
            || self.ac_category.is_some()
            || self.capacity_band != CapacityBand::All
            || self.availability.is_some()
    }

    /// Same search and sort with every filter reset to "all"
    pub fn cleared(&self) -> Self {
        Self {
            search_text: self.search_text.clone(),
            sort_key: self.sort_key,
            ..Self::default()
        }
    }
}

fn lenient<T>(raw: &str, parse: impl Fn(&str) -> Option<T>, field: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return None;
    }
    let parsed = parse(trimmed);
    if parsed.is_none() {
        tracing::debug!(field, value = trimmed, "ignoring unrecognised filter value");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_values_mean_all() {
        let criteria = QueryCriteria::new()
            .with_type("spaceship")
            .with_category("frosty")
            .with_capacity("7-9")
            .with_availability("someday")
            .with_sort("random");
        assert_eq!(criteria, QueryCriteria::default());
        assert!(!criteria.has_active_filters());
    }

    #[test]
    fn test_category_spellings() {
        assert_eq!(
            QueryCriteria::new().with_category("non-ac").ac_category,
            Some(AcCategory::NonAc)
        );
        assert_eq!(
            QueryCriteria::new().with_category("non_ac").ac_category,
            Some(AcCategory::NonAc)
        );
    }

    #[test]
    fn test_sort_aliases() {
        assert_eq!(SortKey::parse("price-low"), SortKey::PriceLowToHigh);
        assert_eq!(SortKey::parse("capacity_high_to_low"), SortKey::CapacityHighToLow);
        assert_eq!(SortKey::parse(""), SortKey::Recommended);
    }

    #[test]
    fn test_band_bounds() {
        assert!(CapacityBand::UpTo15.contains(15));
        assert!(!CapacityBand::From16To30.contains(15));
        assert!(CapacityBand::From16To30.contains(16));
        assert!(!CapacityBand::UpTo15.contains(16));
        assert!(CapacityBand::From31To50.contains(50));
        assert!(!CapacityBand::Over50.contains(50));
        assert!(CapacityBand::Over50.contains(51));
    }

    #[test]
    fn test_params_round_trip_active_filters() {
        let criteria = QueryCriteria::from_params([
            ("type", "bus"),
            ("category", "ac"),
            ("capacity", "all"),
            ("availability", "limited"),
            ("utm_source", "newsletter"),
            ("q", "volvo"),
        ]);
        assert_eq!(criteria.search_text, "volvo");
        assert!(criteria.has_active_filters());

        let pairs = criteria.to_params();
        assert_eq!(
            pairs,
            vec![
                ("type", "bus".to_string()),
                ("category", "ac".to_string()),
                ("availability", "limited".to_string()),
            ]
        );
    }

    #[test]
    fn test_cleared_keeps_search_and_sort() {
        let criteria = QueryCriteria::new()
            .with_search("sleeper")
            .with_type("bus")
            .with_capacity("31-50")
            .with_sort("price-high");
        let cleared = criteria.cleared();
        assert!(!cleared.has_active_filters());
        assert_eq!(cleared.search_text, "sleeper");
        assert_eq!(cleared.sort_key, SortKey::PriceHighToLow);
    }
}

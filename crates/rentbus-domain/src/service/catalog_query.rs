//! Catalog query engine
//!
//! Filters a snapshot of vehicles by search text and filter criteria, then
//! orders the survivors by the requested sort key. Pure and synchronous: the
//! input slice is never modified and the same input always yields the same
//! output.

use std::cmp::Reverse;

use rentbus_types::{AcCategory, VehicleRecord, VehicleType};
use serde::Serialize;

use crate::model::{QueryCriteria, SortKey};

/// Run a catalog query over a snapshot
pub fn query(records: &[VehicleRecord], criteria: &QueryCriteria) -> Vec<VehicleRecord> {
    let needle = criteria.search_text.to_lowercase();

    let mut result: Vec<VehicleRecord> = records
        .iter()
        .filter(|record| matches_search(record, &needle) && matches_filters(record, criteria))
        .cloned()
        .collect();

    sort_records(&mut result, criteria.sort_key);

    tracing::debug!(
        total = records.len(),
        matched = result.len(),
        sort = criteria.sort_key.as_str(),
        "catalog query"
    );
    result
}

/// True if the record passes search and every active filter
pub fn matches(record: &VehicleRecord, criteria: &QueryCriteria) -> bool {
    matches_search(record, &criteria.search_text.to_lowercase())
        && matches_filters(record, criteria)
}

fn matches_search(record: &VehicleRecord, needle: &str) -> bool {
    needle.is_empty()
        || record.name.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
}

fn matches_filters(record: &VehicleRecord, criteria: &QueryCriteria) -> bool {
    criteria.vehicle_type.map_or(true, |t| record.vehicle_type == t)
        && criteria.ac_category.map_or(true, |c| record.ac_category == c)
        && criteria.availability.map_or(true, |a| record.availability == a)
        && criteria.capacity_band.contains(record.seating_capacity)
}

/// Stable in-place sort by the given key; `Recommended` keeps input order
pub fn sort_records(records: &mut [VehicleRecord], key: SortKey) {
    match key {
        SortKey::Recommended => {}
        SortKey::PriceLowToHigh => records.sort_by_cached_key(|v| price_value(&v.price_display)),
        SortKey::PriceHighToLow => {
            records.sort_by_cached_key(|v| Reverse(price_value(&v.price_display)))
        }
        SortKey::CapacityLowToHigh => records.sort_by_key(|v| v.seating_capacity),
        SortKey::CapacityHighToLow => records.sort_by_key(|v| Reverse(v.seating_capacity)),
    }
}

/// Numeric value of a display price.
///
/// All non-digit characters are dropped and the remaining digits read as one
/// integer: `"₹18,000"` is 18000. A label without digits ("On Request") is 0.
/// Overlong digit runs saturate at `u64::MAX`.
pub fn price_value(display: &str) -> u64 {
    display
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d)))
}

/// Count of vehicles in one homepage category tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub count: usize,
}

/// Vehicle counts for the homepage category tiles
pub fn category_counts(records: &[VehicleRecord]) -> Vec<CategoryCount> {
    let count = |pred: fn(&VehicleRecord) -> bool| records.iter().filter(|&v| pred(v)).count();

    vec![
        CategoryCount {
            id: "ac-bus",
            name: "AC Buses",
            description: "Climate-controlled comfort for any weather",
            count: count(|v| v.vehicle_type == VehicleType::Bus && v.ac_category == AcCategory::Ac),
        },
        CategoryCount {
            id: "non-ac-bus",
            name: "Non-AC Buses",
            description: "Budget-friendly options for groups",
            count: count(|v| {
                v.vehicle_type == VehicleType::Bus && v.ac_category == AcCategory::NonAc
            }),
        },
        CategoryCount {
            id: "tempo-traveller",
            name: "Tempo Travellers",
            description: "Compact vehicles for small groups",
            count: count(|v| v.vehicle_type == VehicleType::Traveller),
        },
    ]
}

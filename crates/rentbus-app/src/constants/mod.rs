//! Built-in catalog data

use rentbus_infra::fleet_loader::load_fleet_str;
use rentbus_types::{Result, VehicleRecord};

const DEFAULT_FLEET_TOML: &str = include_str!("default_fleet.toml");

/// Default page size for public blog listings
pub const BLOG_PAGE_SIZE: usize = 6;

/// Default page size for the admin post list
pub const ADMIN_POST_PAGE_SIZE: usize = 10;

/// Number of vehicles listed as similar on a detail page
pub const SIMILAR_VEHICLE_COUNT: usize = 3;

/// The published fleet, in catalog order
pub fn default_fleet() -> Result<Vec<VehicleRecord>> {
    load_fleet_str(DEFAULT_FLEET_TOML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentbus_types::{AcCategory, Availability, VehicleType};

    #[test]
    fn test_default_fleet_parses() {
        let fleet = default_fleet().unwrap();
        assert_eq!(fleet.len(), 8);
        assert_eq!(fleet[0].name, "Luxury AC Sleeper Bus");
        assert_eq!(fleet[4].ac_category, AcCategory::NonAc);
        assert_eq!(fleet[5].availability, Availability::Booked);
        assert_eq!(
            fleet.iter().filter(|v| v.vehicle_type == VehicleType::Traveller).count(),
            3
        );
    }
}

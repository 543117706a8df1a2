//! Back-office dashboard counters

use rentbus_types::{
    Availability, BusOwnerLead, Inquiry, InquiryStatus, Operator, OwnerLeadStatus, VehicleRecord,
};
use serde::Serialize;

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_inquiries: usize,
    pub new_inquiries: usize,
    pub converted_inquiries: usize,
    pub total_operators: usize,
    /// Vehicles that can still take bookings
    pub active_vehicles: usize,
    pub new_owner_leads: usize,
}

impl DashboardStats {
    pub fn from_snapshots(
        inquiries: &[Inquiry],
        operators: &[Operator],
        vehicles: &[VehicleRecord],
        owner_leads: &[BusOwnerLead],
    ) -> Self {
        let count_status =
            |status: InquiryStatus| inquiries.iter().filter(|i| i.status == status).count();

        Self {
            total_inquiries: inquiries.len(),
            new_inquiries: count_status(InquiryStatus::New),
            converted_inquiries: count_status(InquiryStatus::Converted),
            total_operators: operators.len(),
            active_vehicles: vehicles
                .iter()
                .filter(|v| v.availability != Availability::Booked)
                .count(),
            new_owner_leads: owner_leads
                .iter()
                .filter(|l| l.status == OwnerLeadStatus::New)
                .count(),
        }
    }

    /// Share of inquiries that converted, as a percentage
    pub fn conversion_rate(&self) -> f64 {
        if self.total_inquiries == 0 {
            return 0.0;
        }
        self.converted_inquiries as f64 / self.total_inquiries as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rentbus_types::{AcCategory, VehicleType};

    fn inquiry(id: &str, status: InquiryStatus) -> Inquiry {
        Inquiry {
            id: id.to_string(),
            full_name: "Guest".to_string(),
            mobile: "9000000000".to_string(),
            email: None,
            vehicle_type: None,
            preferred_vehicle: None,
            journey_start_date: "2026-11-01".to_string(),
            journey_end_date: None,
            pickup_location: None,
            drop_location: None,
            passenger_count: 10,
            message: None,
            status,
            internal_notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_counts() {
        let inquiries = vec![
            inquiry("1", InquiryStatus::New),
            inquiry("2", InquiryStatus::New),
            inquiry("3", InquiryStatus::Converted),
            inquiry("4", InquiryStatus::Lost),
        ];
        let vehicles = vec![
            VehicleRecord::new("A", VehicleType::Bus, AcCategory::Ac, 40, "₹1"),
            VehicleRecord::new("B", VehicleType::Bus, AcCategory::Ac, 40, "₹1")
                .with_availability(Availability::Booked),
        ];

        let stats = DashboardStats::from_snapshots(&inquiries, &[], &vehicles, &[]);
        assert_eq!(stats.total_inquiries, 4);
        assert_eq!(stats.new_inquiries, 2);
        assert_eq!(stats.converted_inquiries, 1);
        assert_eq!(stats.active_vehicles, 1);
        assert_eq!(stats.new_owner_leads, 0);
        assert!((stats.conversion_rate() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_conversion_rate() {
        assert_eq!(DashboardStats::default().conversion_rate(), 0.0);
    }
}

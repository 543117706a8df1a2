//! Lead and operator types for the back-office

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pipeline status of a rental inquiry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    #[default]
    New,
    Contacted,
    Quoted,
    Converted,
    Closed,
    Lost,
}

impl InquiryStatus {
    pub const ALL: [InquiryStatus; 6] = [
        InquiryStatus::New,
        InquiryStatus::Contacted,
        InquiryStatus::Quoted,
        InquiryStatus::Converted,
        InquiryStatus::Closed,
        InquiryStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Quoted => "quoted",
            InquiryStatus::Converted => "converted",
            InquiryStatus::Closed => "closed",
            InquiryStatus::Lost => "lost",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim().to_lowercase())
    }
}

impl std::fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rental inquiry submitted from the lead forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: String,
    pub full_name: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub preferred_vehicle: Option<String>,
    pub journey_start_date: String,
    #[serde(default)]
    pub journey_end_date: Option<String>,
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub drop_location: Option<String>,
    #[serde(default)]
    pub passenger_count: u32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: InquiryStatus,
    #[serde(default)]
    pub internal_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Form input for a new rental inquiry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewInquiry {
    pub full_name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub vehicle_type: Option<String>,
    pub preferred_vehicle: Option<String>,
    pub journey_start_date: String,
    pub journey_end_date: Option<String>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    /// Raw passenger count as typed; unparseable input counts as zero
    pub passengers: String,
    pub message: Option<String>,
}

/// Pipeline status of a bus-owner partnership lead
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerLeadStatus {
    #[default]
    New,
    Contacted,
    Onboarded,
    Rejected,
}

impl OwnerLeadStatus {
    pub const ALL: [OwnerLeadStatus; 4] = [
        OwnerLeadStatus::New,
        OwnerLeadStatus::Contacted,
        OwnerLeadStatus::Onboarded,
        OwnerLeadStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerLeadStatus::New => "new",
            OwnerLeadStatus::Contacted => "contacted",
            OwnerLeadStatus::Onboarded => "onboarded",
            OwnerLeadStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim().to_lowercase())
    }
}

impl std::fmt::Display for OwnerLeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bus owner interested in listing vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusOwnerLead {
    pub id: String,
    pub full_name: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    pub city: String,
    #[serde(default)]
    pub vehicle_details: Option<String>,
    #[serde(default)]
    pub status: OwnerLeadStatus,
    pub created_at: DateTime<Utc>,
}

/// A fleet operator that supplies vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub id: String,
    pub business_name: String,
    #[serde(default)]
    pub contact_person: String,
    pub contact_number: String,
    #[serde(default)]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Operator form input; `city` is folded into the stored address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorForm {
    pub business_name: String,
    pub contact_person: String,
    pub contact_number: String,
    pub city: String,
    pub address: String,
}

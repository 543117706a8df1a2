//! Lead intake and pipeline filtering

use chrono::{DateTime, Utc};
use rentbus_types::{
    BusOwnerLead, Inquiry, InquiryStatus, NewInquiry, Operator, OperatorForm, OwnerLeadStatus,
    ValidationError,
};

/// Parse a status filter; `"all"` and unknown values mean no filter
pub fn parse_status_filter(raw: &str) -> Option<InquiryStatus> {
    match raw.trim() {
        "" | "all" => None,
        other => InquiryStatus::parse(other),
    }
}

/// Inquiries matching the status filter, order preserved
pub fn filter_inquiries(inquiries: &[Inquiry], status: Option<InquiryStatus>) -> Vec<Inquiry> {
    inquiries
        .iter()
        .filter(|inq| status.map_or(true, |s| inq.status == s))
        .cloned()
        .collect()
}

/// Owner leads matching the status filter, order preserved
pub fn filter_owner_leads(
    leads: &[BusOwnerLead],
    status: Option<OwnerLeadStatus>,
) -> Vec<BusOwnerLead> {
    leads
        .iter()
        .filter(|lead| status.map_or(true, |s| lead.status == s))
        .cloned()
        .collect()
}

/// Build a new inquiry from form input.
///
/// Name, mobile and journey date are required. An unparseable passenger
/// count is stored as zero.
pub fn build_inquiry(
    form: NewInquiry,
    id: String,
    now: DateTime<Utc>,
) -> Result<Inquiry, ValidationError> {
    let full_name = required(&form.full_name, "full_name")?;
    let mobile = required(&form.mobile, "mobile")?;
    let journey_start_date = required(&form.journey_start_date, "journey_start_date")?;

    Ok(Inquiry {
        id,
        full_name,
        mobile,
        email: optional(form.email),
        vehicle_type: optional(form.vehicle_type),
        preferred_vehicle: optional(form.preferred_vehicle),
        journey_start_date,
        journey_end_date: optional(form.journey_end_date),
        pickup_location: optional(form.pickup_location),
        drop_location: optional(form.drop_location),
        passenger_count: form.passengers.trim().parse().unwrap_or(0),
        message: optional(form.message),
        status: InquiryStatus::New,
        internal_notes: None,
        created_at: now,
    })
}

/// Build a new bus-owner lead from the partnership form
pub fn build_owner_lead(
    full_name: &str,
    mobile: &str,
    city: &str,
    vehicle_details: Option<String>,
    id: String,
    now: DateTime<Utc>,
) -> Result<BusOwnerLead, ValidationError> {
    Ok(BusOwnerLead {
        id,
        full_name: required(full_name, "full_name")?,
        mobile: required(mobile, "mobile")?,
        email: None,
        city: required(city, "city")?,
        vehicle_details: optional(vehicle_details),
        status: OwnerLeadStatus::New,
        created_at: now,
    })
}

/// Apply an operator form to a new or existing operator.
///
/// Business name and contact number are required. The city is folded into
/// the stored address as `"<address>, <city>"`.
pub fn apply_operator_form(
    form: OperatorForm,
    existing: Option<&Operator>,
    new_id: impl FnOnce() -> String,
    now: DateTime<Utc>,
) -> Result<Operator, ValidationError> {
    let business_name = required(&form.business_name, "business_name")?;
    let contact_number = required(&form.contact_number, "contact_number")?;
    let address = merge_address(&form.address, &form.city);

    Ok(match existing {
        Some(current) => Operator {
            business_name,
            contact_person: form.contact_person.trim().to_string(),
            contact_number,
            address,
            ..current.clone()
        },
        None => Operator {
            id: new_id(),
            business_name,
            contact_person: form.contact_person.trim().to_string(),
            contact_number,
            address,
            created_at: now,
        },
    })
}

/// Combine street address and city into one address line
pub fn merge_address(address: &str, city: &str) -> Option<String> {
    match (address.trim(), city.trim()) {
        ("", "") => None,
        (addr, "") => Some(addr.to_string()),
        ("", city) => Some(city.to_string()),
        (addr, city) => Some(format!("{}, {}", addr, city)),
    }
}

fn required(raw: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewInquiry {
        NewInquiry {
            full_name: " Priya Das ".to_string(),
            mobile: "9876543210".to_string(),
            journey_start_date: "2026-12-20".to_string(),
            passengers: "32".to_string(),
            email: Some("  ".to_string()),
            ..NewInquiry::default()
        }
    }

    #[test]
    fn test_build_inquiry() {
        let inquiry = build_inquiry(form(), "i-1".to_string(), Utc::now()).unwrap();
        assert_eq!(inquiry.full_name, "Priya Das");
        assert_eq!(inquiry.passenger_count, 32);
        assert_eq!(inquiry.status, InquiryStatus::New);
        assert!(inquiry.email.is_none());
    }

    #[test]
    fn test_unparseable_passengers_is_zero() {
        let mut f = form();
        f.passengers = "about forty".to_string();
        let inquiry = build_inquiry(f, "i-2".to_string(), Utc::now()).unwrap();
        assert_eq!(inquiry.passenger_count, 0);
    }

    #[test]
    fn test_missing_mobile() {
        let mut f = form();
        f.mobile = String::new();
        assert_eq!(
            build_inquiry(f, "i-3".to_string(), Utc::now()),
            Err(ValidationError::MissingField("mobile"))
        );
    }

    #[test]
    fn test_status_filter() {
        let now = Utc::now();
        let mut a = build_inquiry(form(), "a".to_string(), now).unwrap();
        let b = build_inquiry(form(), "b".to_string(), now).unwrap();
        a.status = InquiryStatus::Quoted;
        let all = vec![a, b];

        assert_eq!(filter_inquiries(&all, parse_status_filter("all")).len(), 2);
        assert_eq!(filter_inquiries(&all, parse_status_filter("bogus")).len(), 2);
        let quoted = filter_inquiries(&all, parse_status_filter("quoted"));
        assert_eq!(quoted.len(), 1);
        assert_eq!(quoted[0].id, "a");
    }

    #[test]
    fn test_merge_address() {
        assert_eq!(merge_address("12 MG Road", "Bhubaneswar").as_deref(), Some("12 MG Road, Bhubaneswar"));
        assert_eq!(merge_address("", "Cuttack").as_deref(), Some("Cuttack"));
        assert_eq!(merge_address("Plot 7", " ").as_deref(), Some("Plot 7"));
        assert_eq!(merge_address("", ""), None);
    }

    #[test]
    fn test_operator_form_requires_contact() {
        let form = OperatorForm {
            business_name: "Kalinga Travels".to_string(),
            ..OperatorForm::default()
        };
        let err = apply_operator_form(form, None, || "op-1".to_string(), Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("contact_number"));
    }

    #[test]
    fn test_operator_update_keeps_identity() {
        let created = apply_operator_form(
            OperatorForm {
                business_name: "Kalinga Travels".to_string(),
                contact_number: "0674-255000".to_string(),
                ..OperatorForm::default()
            },
            None,
            || "op-1".to_string(),
            Utc::now(),
        )
        .unwrap();

        let updated = apply_operator_form(
            OperatorForm {
                business_name: "Kalinga Tours".to_string(),
                contact_number: "0674-255001".to_string(),
                city: "Puri".to_string(),
                ..OperatorForm::default()
            },
            Some(&created),
            || unreachable!(),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(updated.id, "op-1");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.address.as_deref(), Some("Puri"));
    }

    #[test]
    fn test_owner_lead_requires_city() {
        let err = build_owner_lead("Ravi", "9000000000", "", None, "l".to_string(), Utc::now())
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("city"));
    }
}

//! Back-office use cases: fleet editing, lead pipeline, operators, dashboard

use chrono::Utc;

use rentbus_domain::model::VehicleForm;
use rentbus_domain::repository::RecordRepository;
use rentbus_domain::service::{
    apply_operator_form, build_inquiry, build_owner_lead, filter_inquiries, filter_owner_leads,
    parse_status_filter, DashboardStats,
};
use rentbus_types::{
    BusOwnerLead, Inquiry, InquiryStatus, NewInquiry, Operator, OperatorForm, OwnerLeadStatus,
    VehicleRecord,
};

use super::write_through::{AdminResult, AdminServiceError, WriteThroughCache};

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl<R: RecordRepository<VehicleRecord>> WriteThroughCache<VehicleRecord, R> {
    /// Create a vehicle from the admin form, or update `id` when given
    pub fn save_form(&mut self, form: VehicleForm, id: Option<&str>) -> AdminResult<VehicleRecord> {
        match id {
            Some(id) => {
                if self.get(id).is_none() {
                    return Err(AdminServiceError::NotFound(format!("vehicle {}", id)));
                }
                let record = form.into_record(id.to_string())?;
                self.update(record.clone())?;
                tracing::info!(id, "vehicle updated");
                Ok(record)
            }
            None => {
                let record = form.into_record(new_id())?;
                self.create(record.clone())?;
                tracing::info!(id = %record.id, "vehicle created");
                Ok(record)
            }
        }
    }

    /// Insert vehicles one by one; stops at the first rejected write
    pub fn import(&mut self, records: Vec<VehicleRecord>) -> AdminResult<usize> {
        let mut imported = 0;
        for record in records {
            self.create(record)?;
            imported += 1;
        }
        tracing::info!(imported, "vehicles imported");
        Ok(imported)
    }

    /// Insert the records whose IDs are not in the table yet
    pub fn seed(&mut self, records: Vec<VehicleRecord>) -> AdminResult<usize> {
        let fresh: Vec<_> = records
            .into_iter()
            .filter(|r| self.get(&r.id).is_none())
            .collect();
        self.import(fresh)
    }
}

impl<R: RecordRepository<Inquiry>> WriteThroughCache<Inquiry, R> {
    /// Inquiries under a status filter; `"all"` and unknown values show everything
    pub fn filtered(&self, status: &str) -> Vec<Inquiry> {
        filter_inquiries(self.snapshot(), parse_status_filter(status))
    }

    pub fn submit(&mut self, form: NewInquiry) -> AdminResult<Inquiry> {
        let inquiry = build_inquiry(form, new_id(), Utc::now())?;
        self.create(inquiry.clone())?;
        tracing::info!(id = %inquiry.id, "inquiry submitted");
        Ok(inquiry)
    }

    pub fn set_status(&mut self, id: &str, status: InquiryStatus) -> AdminResult<Inquiry> {
        self.modify(id, |inquiry| inquiry.status = status)
    }

    pub fn set_notes(&mut self, id: &str, notes: &str) -> AdminResult<Inquiry> {
        let notes = Some(notes.trim().to_string()).filter(|n| !n.is_empty());
        self.modify(id, |inquiry| inquiry.internal_notes = notes)
    }
}

impl<R: RecordRepository<BusOwnerLead>> WriteThroughCache<BusOwnerLead, R> {
    pub fn filtered(&self, status: &str) -> Vec<BusOwnerLead> {
        let status = match status.trim() {
            "" | "all" => None,
            other => OwnerLeadStatus::parse(other),
        };
        filter_owner_leads(self.snapshot(), status)
    }

    pub fn submit(
        &mut self,
        full_name: &str,
        mobile: &str,
        city: &str,
        vehicle_details: Option<String>,
    ) -> AdminResult<BusOwnerLead> {
        let lead = build_owner_lead(full_name, mobile, city, vehicle_details, new_id(), Utc::now())?;
        self.create(lead.clone())?;
        tracing::info!(id = %lead.id, "owner lead submitted");
        Ok(lead)
    }

    pub fn set_status(&mut self, id: &str, status: OwnerLeadStatus) -> AdminResult<BusOwnerLead> {
        self.modify(id, |lead| lead.status = status)
    }
}

impl<R: RecordRepository<Operator>> WriteThroughCache<Operator, R> {
    /// Create an operator, or update `id` when given
    pub fn save_form(&mut self, form: OperatorForm, id: Option<&str>) -> AdminResult<Operator> {
        let existing = match id {
            Some(id) => Some(
                self.get(id)
                    .cloned()
                    .ok_or_else(|| AdminServiceError::NotFound(format!("operator {}", id)))?,
            ),
            None => None,
        };

        let operator = apply_operator_form(form, existing.as_ref(), new_id, Utc::now())?;
        if existing.is_some() {
            self.update(operator.clone())?;
        } else {
            self.create(operator.clone())?;
        }
        Ok(operator)
    }
}

/// Dashboard counters from fresh table reads
pub fn load_dashboard<I, O, V, L>(
    inquiries: &I,
    operators: &O,
    vehicles: &V,
    owner_leads: &L,
) -> AdminResult<DashboardStats>
where
    I: RecordRepository<Inquiry>,
    O: RecordRepository<Operator>,
    V: RecordRepository<VehicleRecord>,
    L: RecordRepository<BusOwnerLead>,
{
    Ok(DashboardStats::from_snapshots(
        &inquiries.find_all()?,
        &operators.find_all()?,
        &vehicles.find_all()?,
        &owner_leads.find_all()?,
    ))
}

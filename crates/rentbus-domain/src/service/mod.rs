//! Domain services

pub mod catalog_query;
pub mod dashboard;
pub mod leads;

pub use catalog_query::{category_counts, matches, price_value, query, sort_records, CategoryCount};
pub use dashboard::DashboardStats;
pub use leads::{
    apply_operator_form, build_inquiry, build_owner_lead, filter_inquiries, filter_owner_leads,
    merge_address, parse_status_filter,
};

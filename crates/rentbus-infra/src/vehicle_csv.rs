//! CSV import for fleet listings
//!
//! Expected header (column order is free, extra columns are ignored):
//! name,type,category,seating_capacity,price_display,availability,amenities,description
//!
//! Amenities are `;`-separated inside their cell.

use std::io::Read;
use std::path::Path;

use thiserror::Error;

use rentbus_types::{AcCategory, Availability, VehicleRecord, VehicleType, PRICE_ON_REQUEST};

#[derive(Error, Debug)]
pub enum VehicleCsvError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid {column} in row {row}: {value:?}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

impl From<VehicleCsvError> for rentbus_types::Error {
    fn from(e: VehicleCsvError) -> Self {
        rentbus_types::Error::Import(e.to_string())
    }
}

/// Column positions resolved from the header row
struct Columns {
    name: usize,
    vehicle_type: usize,
    category: usize,
    seating_capacity: usize,
    price_display: Option<usize>,
    availability: Option<usize>,
    amenities: Option<usize>,
    description: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, VehicleCsvError> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let require = |name: &'static str| find(name).ok_or(VehicleCsvError::MissingColumn(name));

        Ok(Self {
            name: require("name")?,
            vehicle_type: require("type")?,
            category: require("category")?,
            seating_capacity: require("seating_capacity")?,
            price_display: find("price_display"),
            availability: find("availability"),
            amenities: find("amenities"),
            description: find("description"),
        })
    }
}

/// Load vehicles from a CSV file
pub fn load_vehicles<P: AsRef<Path>>(path: P) -> Result<Vec<VehicleRecord>, VehicleCsvError> {
    let file = std::fs::File::open(path)?;
    read_vehicles(file)
}

/// Parse vehicles from any CSV source; every row gets a fresh ID
pub fn read_vehicles<R: Read>(source: R) -> Result<Vec<VehicleRecord>, VehicleCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let columns = Columns::resolve(reader.headers()?)?;

    let mut vehicles = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        // header is row 1
        let row = row_idx + 2;
        vehicles.push(parse_record(&record, &columns, row)?);
    }

    tracing::info!(count = vehicles.len(), "parsed vehicle CSV");
    Ok(vehicles)
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &Columns,
    row: usize,
) -> Result<VehicleRecord, VehicleCsvError> {
    let cell = |idx: usize| record.get(idx).unwrap_or("");
    let optional = |idx: Option<usize>| idx.map(cell).unwrap_or("");
    let invalid = |column: &'static str, value: &str| VehicleCsvError::InvalidValue {
        row,
        column,
        value: value.to_string(),
    };

    let name = cell(columns.name);
    if name.is_empty() {
        return Err(invalid("name", name));
    }

    let raw_type = cell(columns.vehicle_type);
    let vehicle_type = VehicleType::parse(raw_type).ok_or_else(|| invalid("type", raw_type))?;

    let raw_category = cell(columns.category);
    let ac_category =
        AcCategory::parse(raw_category).ok_or_else(|| invalid("category", raw_category))?;

    let raw_seats = cell(columns.seating_capacity);
    let seating_capacity = raw_seats
        .parse::<u32>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| invalid("seating_capacity", raw_seats))?;

    let price_display = match optional(columns.price_display) {
        "" => PRICE_ON_REQUEST,
        price => price,
    };

    let availability = match optional(columns.availability) {
        "" => Availability::default(),
        raw => Availability::parse(raw).ok_or_else(|| invalid("availability", raw))?,
    };

    let amenities = optional(columns.amenities)
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty());

    Ok(
        VehicleRecord::new(name, vehicle_type, ac_category, seating_capacity, price_display)
            .with_amenities(amenities)
            .with_availability(availability)
            .with_description(optional(columns.description)),
    )
}

//! Use-case tests against the file-backed tables

use rentbus_app::app::{
    load_dashboard, BlogService, CatalogService, CatalogServiceError, WriteThroughCache,
};
use rentbus_app::constants::default_fleet;
use rentbus_domain::model::{QueryCriteria, VehicleForm};
use rentbus_infra::persistence::{
    FileBlogRepository, FileInquiryRepository, FileOperatorRepository, FileOwnerLeadRepository,
    FileVehicleRepository,
};
use rentbus_store::MemoryStore;
use rentbus_types::{
    AcCategory, Availability, BusOwnerLead, CreatePost, Inquiry, InquiryStatus, NewInquiry,
    Operator, OperatorForm, PostStatus, VehicleRecord, VehicleType,
};
use tempfile::TempDir;

fn vehicle_cache(dir: &TempDir) -> WriteThroughCache<VehicleRecord, FileVehicleRepository> {
    WriteThroughCache::load(FileVehicleRepository::open(dir.path()).unwrap()).unwrap()
}

fn seeded_vehicles(dir: &TempDir) -> FileVehicleRepository {
    vehicle_cache(dir).seed(default_fleet().unwrap()).unwrap();
    FileVehicleRepository::open(dir.path()).unwrap()
}

#[test]
fn test_browse_seeded_fleet() {
    let dir = TempDir::new().unwrap();
    let kv = MemoryStore::new();
    let catalog = CatalogService::new(seeded_vehicles(&dir), &kv);

    let buses = catalog
        .browse(&QueryCriteria::new().with_type("bus").with_sort("price_low_to_high"))
        .unwrap();
    let names: Vec<_> = buses.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Non-AC Deluxe Bus",
            "Mini Bus 25 Seater",
            "Executive AC Coach",
            "Luxury AC Sleeper Bus",
            "Luxury Volvo Coach",
        ]
    );

    let small = catalog
        .browse(&QueryCriteria::new().with_capacity("1-15"))
        .unwrap();
    assert_eq!(small.len(), 1);
    assert_eq!(small[0].name, "Tempo Traveller 12 Seater");
}

#[test]
fn test_custom_vehicles_follow_backend() {
    let dir = TempDir::new().unwrap();
    let kv = MemoryStore::new();
    let catalog = CatalogService::new(seeded_vehicles(&dir), &kv);

    let local = VehicleRecord::new(
        "Local Shuttle",
        VehicleType::Traveller,
        AcCategory::NonAc,
        9,
        "₹4,000",
    )
    .with_id("local-1");
    catalog.add_custom(local).unwrap();

    let snapshot = catalog.snapshot().unwrap();
    assert_eq!(snapshot.len(), 9);
    assert_eq!(snapshot.last().map(|v| v.id.as_str()), Some("local-1"));

    let counts = catalog.categories().unwrap();
    let tiles: Vec<_> = counts.iter().map(|c| (c.id, c.count)).collect();
    assert_eq!(tiles, vec![("ac-bus", 4), ("non-ac-bus", 1), ("tempo-traveller", 4)]);

    assert!(catalog.remove_custom("local-1").unwrap());
    assert_eq!(catalog.snapshot().unwrap().len(), 8);
}

#[test]
fn test_detail_and_similar() {
    let dir = TempDir::new().unwrap();
    let kv = MemoryStore::new();
    let catalog = CatalogService::new(seeded_vehicles(&dir), &kv);

    let tt12 = catalog.vehicle_detail("3").unwrap();
    let similar = catalog.similar(&tt12).unwrap();
    assert_eq!(similar.len(), 2);
    assert!(similar.iter().all(|v| v.vehicle_type == VehicleType::Traveller && v.id != "3"));

    assert!(matches!(
        catalog.vehicle_detail("missing"),
        Err(CatalogServiceError::VehicleNotFound(_))
    ));

    let featured = catalog.featured(3).unwrap();
    assert_eq!(featured.len(), 3);
    assert!(featured.iter().all(|v| v.availability == Availability::Available));
}

#[test]
fn test_seed_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut cache = vehicle_cache(&dir);
    assert_eq!(cache.seed(default_fleet().unwrap()).unwrap(), 8);
    assert_eq!(cache.seed(default_fleet().unwrap()).unwrap(), 0);
    assert_eq!(cache.snapshot().len(), 8);
}

#[test]
fn test_vehicle_form_round_trip() {
    let dir = TempDir::new().unwrap();
    let mut cache = vehicle_cache(&dir);

    let form = VehicleForm {
        name: "Sleeper Express".to_string(),
        seating_capacity: "36".to_string(),
        amenities: "WiFi, Blankets".to_string(),
        ..VehicleForm::default()
    };
    let created = cache.save_form(form, None).unwrap();
    assert_eq!(created.price_display, "On Request");

    let mut edit = VehicleForm::from_record(&created);
    edit.availability = Availability::Booked;
    cache.save_form(edit, Some(created.id.as_str())).unwrap();

    let mut fresh = vehicle_cache(&dir);
    assert_eq!(fresh.get(&created.id).unwrap().availability, Availability::Booked);

    let bad = VehicleForm {
        name: "No Seats".to_string(),
        seating_capacity: "zero".to_string(),
        ..VehicleForm::default()
    };
    assert!(fresh.save_form(bad, None).is_err());
    assert_eq!(fresh.snapshot().len(), 1);
}

#[test]
fn test_lead_pipeline_and_dashboard() {
    let dir = TempDir::new().unwrap();
    let mut inquiries: WriteThroughCache<Inquiry, _> =
        WriteThroughCache::load(FileInquiryRepository::open(dir.path()).unwrap()).unwrap();
    let mut operators: WriteThroughCache<Operator, _> =
        WriteThroughCache::load(FileOperatorRepository::open(dir.path()).unwrap()).unwrap();
    let mut owner_leads: WriteThroughCache<BusOwnerLead, _> =
        WriteThroughCache::load(FileOwnerLeadRepository::open(dir.path()).unwrap()).unwrap();

    let first = inquiries
        .submit(NewInquiry {
            full_name: "Priya Das".to_string(),
            mobile: "9876543210".to_string(),
            journey_start_date: "2026-12-20".to_string(),
            passengers: "40".to_string(),
            ..NewInquiry::default()
        })
        .unwrap();
    inquiries
        .submit(NewInquiry {
            full_name: "Ravi Kumar".to_string(),
            mobile: "9123456780".to_string(),
            journey_start_date: "2027-01-05".to_string(),
            passengers: "12".to_string(),
            ..NewInquiry::default()
        })
        .unwrap();
    inquiries.set_status(&first.id, InquiryStatus::Converted).unwrap();

    assert_eq!(inquiries.filtered("converted").len(), 1);
    assert_eq!(inquiries.filtered("all").len(), 2);

    operators
        .save_form(
            OperatorForm {
                business_name: "Kalinga Travels".to_string(),
                contact_number: "0674-255000".to_string(),
                address: "12 MG Road".to_string(),
                city: "Bhubaneswar".to_string(),
                ..OperatorForm::default()
            },
            None,
        )
        .unwrap();
    owner_leads
        .submit("Suresh", "9000000001", "Cuttack", Some("2 x 40 seater".to_string()))
        .unwrap();

    let vehicles = seeded_vehicles(&dir);
    let stats = load_dashboard(
        inquiries.repository(),
        operators.repository(),
        &vehicles,
        owner_leads.repository(),
    )
    .unwrap();

    assert_eq!(stats.total_inquiries, 2);
    assert_eq!(stats.new_inquiries, 1);
    assert_eq!(stats.converted_inquiries, 1);
    assert_eq!(stats.total_operators, 1);
    assert_eq!(stats.active_vehicles, 7);
    assert_eq!(stats.new_owner_leads, 1);
    assert_eq!(
        operators.snapshot()[0].address.as_deref(),
        Some("12 MG Road, Bhubaneswar")
    );
}

#[test]
fn test_blog_publishing() {
    let dir = TempDir::new().unwrap();
    let blog = BlogService::new(FileBlogRepository::open(dir.path()).unwrap());

    let draft = blog
        .create(CreatePost {
            title: "Planning a Pilgrimage to Puri".to_string(),
            content: "Book early for Rath Yatra.".to_string(),
            ..CreatePost::default()
        })
        .unwrap();
    assert_eq!(draft.slug, "planning-a-pilgrimage-to-puri");
    assert!(draft.published_at.is_none());
    assert_eq!(blog.published(1, 6).unwrap().count, 0);

    blog.publish(&draft.id).unwrap();
    let page = blog.published(1, 6).unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.posts[0].status, PostStatus::Published);
    assert!(page.posts[0].published_at.is_some());

    let by_slug = blog.by_slug("planning-a-pilgrimage-to-puri").unwrap();
    assert_eq!(by_slug.id, draft.id);

    blog.delete(&draft.id).unwrap();
    assert!(blog.by_slug("planning-a-pilgrimage-to-puri").is_err());
    assert_eq!(blog.all_posts(1, 10).unwrap().count, 0);
}

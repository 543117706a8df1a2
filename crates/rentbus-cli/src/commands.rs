//! Command handlers

use std::path::{Path, PathBuf};

use crate::cli::{
    AdminCommand, BlogCommand, Cli, Commands, InquiryCommand, OperatorCommand, OperatorFields,
    OwnerLeadCommand, SettingsCommand, VehicleCommand, VehicleFields,
};
use crate::output::{
    output_blog_settings, output_categories, output_dashboard, output_inquiries,
    output_operators, output_owner_leads, output_post, output_post_page, output_saved,
    output_taxonomy, output_vehicle_detail, output_vehicles, print_json,
};
use rentbus_app::app::{
    load_dashboard, slugify, BlogService, CatalogService, SessionService, SettingsService,
    WriteThroughCache,
};
use rentbus_app::config::Config;
use rentbus_app::constants::{default_fleet, ADMIN_POST_PAGE_SIZE};
use rentbus_app::repository::{
    open_blog_repo, open_inquiry_repo, open_kv_store, open_operator_repo, open_owner_lead_repo,
    open_settings_repo, open_vehicle_repo,
};
use rentbus_domain::model::{QueryCriteria, VehicleForm};
use rentbus_infra::fleet_loader::load_fleet_file;
use rentbus_infra::persistence::{
    FileInquiryRepository, FileOperatorRepository, FileOwnerLeadRepository, FileVehicleRepository,
};
use rentbus_infra::vehicle_csv::load_vehicles;
use rentbus_store::JsonFileStore;
use rentbus_types::{
    Author, Availability, BusLayout, BusOwnerLead, Category, CreatePost, Error,
    Inquiry, InquiryStatus, NewInquiry, Operator, OperatorForm, OutputFormat, OwnerLeadStatus,
    PostStatus, Result, Tag, ValidationError, VehicleRecord, VehicleType,
};

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref dir) = cli.store_dir {
        config.store_dir = Some(dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    tracing::debug!(store_dir = ?config.store_dir, format = %output_format, "loaded config");

    match cli.command {
        Commands::Vehicles { action } => cmd_vehicles(&config, output_format, action),
        Commands::Operators { action } => cmd_operators(&config, output_format, action),
        Commands::Inquiries { action } => cmd_inquiries(&config, output_format, action),
        Commands::OwnerLeads { action } => cmd_owner_leads(&config, output_format, action),
        Commands::Blog { action } => cmd_blog(&config, output_format, action),
        Commands::Settings { action } => cmd_settings(&config, output_format, action),
        Commands::Dashboard => cmd_dashboard(&config, output_format),
        Commands::Admin { action } => cmd_admin(&config, output_format, action),
        Commands::Config {
            show,
            set_output,
            set_page_size,
            set_store_dir,
            set_admin_email,
            set_admin_password,
            reset,
        } => cmd_config(
            show,
            set_output,
            set_page_size,
            set_store_dir,
            set_admin_email,
            set_admin_password,
            reset,
        ),
    }
}

/// Fail unless an admin session is active
fn require_admin(config: &Config, kv: &JsonFileStore) -> Result<()> {
    SessionService::new(config, kv).require_admin()
}

fn invalid(field: &'static str, value: &str) -> Error {
    ValidationError::InvalidValue {
        field,
        value: value.to_string(),
    }
    .into()
}

/// Strict parse for admin input; catalog filters use the lenient parsers instead
fn parse_or_invalid<T>(raw: &str, field: &'static str, parse: fn(&str) -> Option<T>) -> Result<T> {
    parse(raw).ok_or_else(|| invalid(field, raw))
}

fn vehicle_cache(config: &Config) -> Result<WriteThroughCache<VehicleRecord, FileVehicleRepository>> {
    Ok(WriteThroughCache::load(open_vehicle_repo(config)?)?)
}

fn operator_cache(config: &Config) -> Result<WriteThroughCache<Operator, FileOperatorRepository>> {
    Ok(WriteThroughCache::load(open_operator_repo(config)?)?)
}

fn inquiry_cache(config: &Config) -> Result<WriteThroughCache<Inquiry, FileInquiryRepository>> {
    Ok(WriteThroughCache::load(open_inquiry_repo(config)?)?)
}

fn owner_lead_cache(
    config: &Config,
) -> Result<WriteThroughCache<BusOwnerLead, FileOwnerLeadRepository>> {
    Ok(WriteThroughCache::load(open_owner_lead_repo(config)?)?)
}

impl VehicleFields {
    /// Overlay the given flags onto a form
    fn apply(self, mut form: VehicleForm) -> Result<VehicleForm> {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(raw) = self.vehicle_type {
            form.vehicle_type = parse_or_invalid(&raw, "type", VehicleType::parse)?;
        }
        if let Some(is_ac) = self.ac {
            form.is_ac = is_ac;
        }
        if let Some(seats) = self.seats {
            form.seating_capacity = seats;
        }
        if let Some(price) = self.price {
            form.price_display = price;
        }
        if let Some(amenities) = self.amenities {
            form.amenities = amenities;
        }
        if let Some(images) = self.images {
            form.images = images;
        }
        if let Some(ideal_for) = self.ideal_for {
            form.ideal_for = ideal_for;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(raw) = self.availability {
            form.availability = parse_or_invalid(&raw, "availability", Availability::parse)?;
        }
        if let Some(raw) = self.layout {
            form.bus_layout = parse_or_invalid(&raw, "bus_layout", BusLayout::parse)?;
        }
        if let Some(operator) = self.operator {
            form.operator_id = operator;
        }
        if let Some(contact) = self.agent_contact {
            form.agent_contact_number = contact;
        }
        Ok(form)
    }
}

impl OperatorFields {
    fn into_form(self, current: Option<&Operator>) -> OperatorForm {
        let keep = |field: Option<String>, existing: Option<&str>| {
            field.or_else(|| existing.map(str::to_string)).unwrap_or_default()
        };

        OperatorForm {
            business_name: keep(self.business_name, current.map(|o| o.business_name.as_str())),
            contact_person: keep(self.contact_person, current.map(|o| o.contact_person.as_str())),
            contact_number: keep(self.contact_number, current.map(|o| o.contact_number.as_str())),
            address: keep(self.address, current.and_then(|o| o.address.as_deref())),
            city: self.city.unwrap_or_default(),
        }
    }
}

fn cmd_vehicles(config: &Config, output_format: OutputFormat, action: VehicleCommand) -> Result<()> {
    let kv = open_kv_store(config)?;
    let catalog = CatalogService::new(open_vehicle_repo(config)?, &kv);

    match action {
        VehicleCommand::List {
            search,
            vehicle_type,
            category,
            capacity,
            availability,
            sort,
        } => {
            let criteria = QueryCriteria::new()
                .with_search(search.unwrap_or_default())
                .with_type(vehicle_type.as_deref().unwrap_or(""))
                .with_category(category.as_deref().unwrap_or(""))
                .with_capacity(capacity.as_deref().unwrap_or(""))
                .with_availability(availability.as_deref().unwrap_or(""))
                .with_sort(sort.as_deref().unwrap_or(""));
            output_vehicles(output_format, &catalog.browse(&criteria)?)
        }

        VehicleCommand::Show { id } => {
            let vehicle = catalog.vehicle_detail(&id)?;
            let similar = catalog.similar(&vehicle)?;
            output_vehicle_detail(output_format, &vehicle, &similar)
        }

        VehicleCommand::Featured { count } => {
            output_vehicles(output_format, &catalog.featured(count)?)
        }

        VehicleCommand::Categories => output_categories(output_format, &catalog.categories()?),

        VehicleCommand::Add { fields, local } => {
            require_admin(config, &kv)?;
            let form = fields.apply(VehicleForm::default())?;

            let record = if local {
                let record = form.into_record(uuid::Uuid::new_v4().to_string())?;
                catalog.add_custom(record.clone())?;
                record
            } else {
                vehicle_cache(config)?.save_form(form, None)?
            };
            output_saved(
                output_format,
                &format!("Added vehicle {} ({})", record.name, record.id),
                &record,
            )
        }

        VehicleCommand::Update { id, fields } => {
            require_admin(config, &kv)?;
            let mut cache = vehicle_cache(config)?;
            let current = cache
                .get(&id)
                .ok_or_else(|| Error::NotFound(format!("vehicle {}", id)))?;
            let form = fields.apply(VehicleForm::from_record(current))?;
            let record = cache.save_form(form, Some(id.as_str()))?;
            output_saved(
                output_format,
                &format!("Updated vehicle {} ({})", record.name, record.id),
                &record,
            )
        }

        VehicleCommand::Delete { id, local } => {
            require_admin(config, &kv)?;
            if local {
                if !catalog.remove_custom(&id)? {
                    return Err(Error::NotFound(format!("local vehicle {}", id)));
                }
            } else {
                vehicle_cache(config)?.delete(&id)?;
            }
            println!("Deleted vehicle {}", id);
            Ok(())
        }

        VehicleCommand::Import { file } => {
            require_admin(config, &kv)?;
            let records = read_fleet(&file)?;
            let count = vehicle_cache(config)?.import(records)?;
            println!("Imported {} vehicle(s) from {}", count, file.display());
            Ok(())
        }

        VehicleCommand::Seed => {
            require_admin(config, &kv)?;
            let count = vehicle_cache(config)?.seed(default_fleet()?)?;
            println!("Seeded {} vehicle(s)", count);
            Ok(())
        }
    }
}

/// TOML fleet files by extension, CSV otherwise
fn read_fleet(path: &Path) -> Result<Vec<VehicleRecord>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => load_fleet_file(path),
        _ => Ok(load_vehicles(path)?),
    }
}

fn cmd_operators(config: &Config, output_format: OutputFormat, action: OperatorCommand) -> Result<()> {
    require_admin(config, &open_kv_store(config)?)?;
    let mut operators = operator_cache(config)?;

    match action {
        OperatorCommand::List => output_operators(output_format, operators.snapshot()),

        OperatorCommand::Add { fields } => {
            let operator = operators.save_form(fields.into_form(None), None)?;
            output_saved(
                output_format,
                &format!("Added operator {} ({})", operator.business_name, operator.id),
                &operator,
            )
        }

        OperatorCommand::Update { id, fields } => {
            let current = operators
                .get(&id)
                .ok_or_else(|| Error::NotFound(format!("operator {}", id)))?;
            let form = fields.into_form(Some(current));
            let operator = operators.save_form(form, Some(id.as_str()))?;
            output_saved(
                output_format,
                &format!("Updated operator {}", operator.business_name),
                &operator,
            )
        }
    }
}

fn cmd_inquiries(config: &Config, output_format: OutputFormat, action: InquiryCommand) -> Result<()> {
    let kv = open_kv_store(config)?;
    let mut inquiries = inquiry_cache(config)?;

    match action {
        InquiryCommand::List { status } => {
            require_admin(config, &kv)?;
            output_inquiries(output_format, &inquiries.filtered(&status))
        }

        InquiryCommand::Submit {
            name,
            mobile,
            email,
            vehicle_type,
            vehicle,
            start_date,
            end_date,
            pickup,
            drop,
            passengers,
            message,
        } => {
            let inquiry = inquiries.submit(NewInquiry {
                full_name: name,
                mobile,
                email,
                vehicle_type,
                preferred_vehicle: vehicle,
                journey_start_date: start_date,
                journey_end_date: end_date,
                pickup_location: pickup,
                drop_location: drop,
                passengers,
                message,
            })?;
            output_saved(
                output_format,
                &format!("Inquiry received ({}). We will call you back shortly.", inquiry.id),
                &inquiry,
            )
        }

        InquiryCommand::SetStatus { id, status } => {
            require_admin(config, &kv)?;
            let status = parse_or_invalid(&status, "status", InquiryStatus::parse)?;
            let inquiry = inquiries.set_status(&id, status)?;
            output_saved(
                output_format,
                &format!("Inquiry {} is now {}", inquiry.id, inquiry.status),
                &inquiry,
            )
        }

        InquiryCommand::Notes { id, text } => {
            require_admin(config, &kv)?;
            let inquiry = inquiries.set_notes(&id, &text)?;
            output_saved(output_format, &format!("Notes saved for {}", inquiry.id), &inquiry)
        }
    }
}

fn cmd_owner_leads(
    config: &Config,
    output_format: OutputFormat,
    action: OwnerLeadCommand,
) -> Result<()> {
    let kv = open_kv_store(config)?;
    let mut leads = owner_lead_cache(config)?;

    match action {
        OwnerLeadCommand::List { status } => {
            require_admin(config, &kv)?;
            output_owner_leads(output_format, &leads.filtered(&status))
        }

        OwnerLeadCommand::Submit {
            name,
            mobile,
            city,
            details,
        } => {
            let lead = leads.submit(&name, &mobile, &city, details)?;
            output_saved(
                output_format,
                &format!("Partnership request received ({})", lead.id),
                &lead,
            )
        }

        OwnerLeadCommand::SetStatus { id, status } => {
            require_admin(config, &kv)?;
            let status = parse_or_invalid(&status, "status", OwnerLeadStatus::parse)?;
            let lead = leads.set_status(&id, status)?;
            output_saved(
                output_format,
                &format!("Lead {} is now {}", lead.id, lead.status),
                &lead,
            )
        }
    }
}

fn cmd_blog(config: &Config, output_format: OutputFormat, action: BlogCommand) -> Result<()> {
    let kv = open_kv_store(config)?;
    let blog = BlogService::new(open_blog_repo(config)?);

    match action {
        BlogCommand::List { page, all } => {
            let page = page.max(1);
            if all {
                require_admin(config, &kv)?;
                let posts = blog.all_posts(page, ADMIN_POST_PAGE_SIZE)?;
                output_post_page(output_format, &posts, page, ADMIN_POST_PAGE_SIZE)
            } else {
                let posts = blog.published(page, config.page_size)?;
                output_post_page(output_format, &posts, page, config.page_size)
            }
        }

        BlogCommand::Show { slug } => output_post(output_format, &blog.by_slug(&slug)?),

        BlogCommand::Create {
            title,
            content,
            content_file,
            slug,
            excerpt,
            image,
            author,
            categories,
            tags,
            publish,
        } => {
            require_admin(config, &kv)?;
            let content = match (content, content_file) {
                (Some(content), _) => content,
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => String::new(),
            };
            let post = blog.create(CreatePost {
                title,
                slug: slug.unwrap_or_default(),
                content,
                excerpt,
                featured_image: image,
                author_id: author,
                status: if publish {
                    PostStatus::Published
                } else {
                    PostStatus::Draft
                },
                category_ids: categories,
                tag_ids: tags,
            })?;
            output_saved(
                output_format,
                &format!("Created {} post {} ({})", post.status, post.slug, post.id),
                &post,
            )
        }

        BlogCommand::Publish { id } => {
            require_admin(config, &kv)?;
            blog.publish(&id)?;
            println!("Published post {}", id);
            Ok(())
        }

        BlogCommand::Delete { id } => {
            require_admin(config, &kv)?;
            blog.delete(&id)?;
            println!("Deleted post {}", id);
            Ok(())
        }

        BlogCommand::Taxonomy => output_taxonomy(
            output_format,
            &blog.authors()?,
            &blog.categories()?,
            &blog.tags()?,
        ),

        BlogCommand::AddAuthor { name, bio } => {
            require_admin(config, &kv)?;
            if name.trim().is_empty() {
                return Err(ValidationError::MissingField("name").into());
            }
            let author = Author {
                id: uuid::Uuid::new_v4().to_string(),
                name: name.trim().to_string(),
                bio,
                avatar_url: None,
            };
            open_blog_repo(config)?.add_author(author.clone())?;
            output_saved(output_format, &format!("Added author {}", author.id), &author)
        }

        BlogCommand::AddCategory { name } => {
            require_admin(config, &kv)?;
            let (name, slug) = named_slug(&name)?;
            let category = Category {
                id: uuid::Uuid::new_v4().to_string(),
                name,
                slug,
            };
            open_blog_repo(config)?.add_category(category.clone())?;
            output_saved(output_format, &format!("Added category {}", category.id), &category)
        }

        BlogCommand::AddTag { name } => {
            require_admin(config, &kv)?;
            let (name, slug) = named_slug(&name)?;
            let tag = Tag {
                id: uuid::Uuid::new_v4().to_string(),
                name,
                slug,
            };
            open_blog_repo(config)?.add_tag(tag.clone())?;
            output_saved(output_format, &format!("Added tag {}", tag.id), &tag)
        }
    }
}

fn named_slug(name: &str) -> Result<(String, String)> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(invalid("name", name));
    }
    Ok((name.trim().to_string(), slug))
}

fn cmd_settings(config: &Config, output_format: OutputFormat, action: SettingsCommand) -> Result<()> {
    let kv = open_kv_store(config)?;
    let settings = SettingsService::new(open_settings_repo(config)?);

    match action {
        SettingsCommand::Blog {
            enable,
            disable,
            set_title,
            set_subtitle,
            set_limit,
        } => {
            let mut section = settings.blog_settings();
            let mut modified = false;

            if enable || disable {
                section.enabled = enable;
                modified = true;
            }
            if let Some(title) = set_title {
                section.title = title;
                modified = true;
            }
            if let Some(subtitle) = set_subtitle {
                section.subtitle = subtitle;
                modified = true;
            }
            if let Some(limit) = set_limit {
                section.limit = limit;
                modified = true;
            }

            if modified {
                require_admin(config, &kv)?;
                settings.update_blog_settings(&section)?;
                if output_format == OutputFormat::Table {
                    println!("Blog section updated\n");
                }
            }
            output_blog_settings(output_format, &section)
        }

        SettingsCommand::Get { key } => {
            let setting = settings
                .get(&key)?
                .ok_or_else(|| Error::NotFound(format!("setting {}", key)))?;
            print_json(&setting.value)
        }

        SettingsCommand::Set { key, value } => {
            require_admin(config, &kv)?;
            // Bare words are stored as JSON strings
            let value = serde_json::from_str(&value)
                .unwrap_or_else(|_| serde_json::Value::String(value.clone()));
            let setting = settings.set(&key, value)?;
            output_saved(output_format, &format!("Saved setting {}", setting.key), &setting)
        }
    }
}

fn cmd_dashboard(config: &Config, output_format: OutputFormat) -> Result<()> {
    require_admin(config, &open_kv_store(config)?)?;
    let stats = load_dashboard(
        &open_inquiry_repo(config)?,
        &open_operator_repo(config)?,
        &open_vehicle_repo(config)?,
        &open_owner_lead_repo(config)?,
    )?;
    output_dashboard(output_format, &stats)
}

fn cmd_admin(config: &Config, output_format: OutputFormat, action: AdminCommand) -> Result<()> {
    let kv = open_kv_store(config)?;
    let session = SessionService::new(config, &kv);

    match action {
        AdminCommand::Login { email, password } => {
            session.login(&email, &password)?;
            println!("Logged in as {}", config.admin_email);
        }
        AdminCommand::Logout => {
            session.logout()?;
            println!("Logged out");
        }
        AdminCommand::Status => {
            let authenticated = session.is_authenticated();
            if output_format == OutputFormat::Json {
                print_json(&serde_json::json!({ "authenticated": authenticated }))?;
            } else if authenticated {
                println!("Admin session active ({})", config.admin_email);
            } else {
                println!("Not logged in");
            }
        }
    }
    Ok(())
}

fn cmd_config(
    show: bool,
    set_output: Option<OutputFormat>,
    set_page_size: Option<usize>,
    set_store_dir: Option<PathBuf>,
    set_admin_email: Option<String>,
    set_admin_password: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(page_size) = set_page_size {
        if page_size == 0 {
            return Err(invalid("page_size", "0"));
        }
        config.page_size = page_size;
        modified = true;
    }

    if let Some(dir) = set_store_dir {
        config.store_dir = Some(dir);
        modified = true;
    }

    if let Some(email) = set_admin_email {
        config.admin_email = email.trim().to_string();
        modified = true;
    }

    if let Some(password) = set_admin_password {
        if password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }
        config.set_admin_password(&password);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentbus_types::AcCategory;

    #[test]
    fn test_vehicle_fields_overlay() {
        let fields = VehicleFields {
            seats: Some("17".to_string()),
            vehicle_type: Some("traveller".to_string()),
            ac: Some(false),
            ..VehicleFields::default()
        };
        let base = VehicleForm {
            name: "Force Urbania".to_string(),
            ..VehicleForm::default()
        };

        let form = fields.apply(base).unwrap();
        assert_eq!(form.name, "Force Urbania");
        assert_eq!(form.seating_capacity, "17");
        assert_eq!(form.vehicle_type, VehicleType::Traveller);

        let record = form.into_record("v1".to_string()).unwrap();
        assert_eq!(record.ac_category, AcCategory::NonAc);
    }

    #[test]
    fn test_vehicle_fields_reject_unknown_values() {
        let fields = VehicleFields {
            availability: Some("soon".to_string()),
            ..VehicleFields::default()
        };
        assert!(matches!(
            fields.apply(VehicleForm::default()),
            Err(Error::Validation(ValidationError::InvalidValue { field: "availability", .. }))
        ));
    }

    #[test]
    fn test_operator_fields_keep_current_values() {
        let current = Operator {
            id: "op-1".to_string(),
            business_name: "Kalinga Travels".to_string(),
            contact_person: "Manoj".to_string(),
            contact_number: "9437000000".to_string(),
            address: Some("12 MG Road, Bhubaneswar".to_string()),
            created_at: chrono::Utc::now(),
        };
        let fields = OperatorFields {
            contact_number: Some("9437111111".to_string()),
            ..OperatorFields::default()
        };

        let form = fields.into_form(Some(&current));
        assert_eq!(form.business_name, "Kalinga Travels");
        assert_eq!(form.contact_number, "9437111111");
        assert_eq!(form.address, "12 MG Road, Bhubaneswar");
        assert_eq!(form.city, "");
    }

    #[test]
    fn test_named_slug() {
        assert_eq!(
            named_slug(" Travel Tips ").unwrap(),
            ("Travel Tips".to_string(), "travel-tips".to_string())
        );
        assert!(named_slug("!!!").is_err());
    }
}

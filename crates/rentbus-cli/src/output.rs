//! Output formatting module

use serde::Serialize;

use rentbus_domain::service::{CategoryCount, DashboardStats};
use rentbus_types::{
    Author, BlogPost, BlogSectionSettings, BusOwnerLead, Category, Inquiry, Operator,
    OutputFormat, PostPage, Result, Tag, VehicleRecord,
};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Confirmation line for a write, or the written record as JSON
pub fn output_saved<T: Serialize>(output_format: OutputFormat, message: &str, record: &T) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(record),
        OutputFormat::Table => {
            println!("{}", message);
            Ok(())
        }
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

pub fn output_vehicles(output_format: OutputFormat, vehicles: &[VehicleRecord]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(vehicles);
    }

    if vehicles.is_empty() {
        println!("No vehicles match the current filters.");
        return Ok(());
    }

    println!(
        "{:<10} {:<30} {:<16} {:<7} {:>5} {:>12} {:<10}",
        "ID", "Name", "Type", "AC", "Seats", "Price", "Status"
    );
    println!("{}", "-".repeat(96));

    for v in vehicles {
        println!(
            "{:<10} {:<30} {:<16} {:<7} {:>5} {:>12} {:<10}",
            truncate(&v.id, 10),
            truncate(&v.name, 30),
            v.vehicle_type.label(),
            v.ac_category.label(),
            v.seating_capacity,
            v.price_display,
            v.availability
        );
    }

    println!();
    println!("{} vehicle(s)", vehicles.len());
    Ok(())
}

pub fn output_vehicle_detail(
    output_format: OutputFormat,
    vehicle: &VehicleRecord,
    similar: &[VehicleRecord],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "vehicle": vehicle,
            "similar": similar,
        }));
    }

    println!("\n{}", vehicle.name);
    println!("{}", "=".repeat(vehicle.name.chars().count().max(8)));
    println!("ID:            {}", vehicle.id);
    println!(
        "Type:          {} ({})",
        vehicle.vehicle_type.label(),
        vehicle.ac_category.label()
    );
    println!("Seats:         {}", vehicle.seating_capacity);
    println!("Layout:        {}", vehicle.bus_layout.as_str());
    println!("Price:         {}", vehicle.price_display);
    println!("Availability:  {}", vehicle.availability.label());
    println!("Operator:      {}", or_dash(vehicle.operator_id.as_deref()));
    println!(
        "Agent contact: {}",
        or_dash(vehicle.agent_contact_number.as_deref())
    );

    if !vehicle.amenities.is_empty() {
        println!("Amenities:     {}", vehicle.amenities.join(", "));
    }
    if !vehicle.ideal_for.is_empty() {
        println!("Ideal for:     {}", vehicle.ideal_for.join(", "));
    }
    if !vehicle.description.is_empty() {
        println!("\n{}", vehicle.description);
    }

    if !similar.is_empty() {
        println!("\nSimilar vehicles:");
        for v in similar {
            println!(
                "  {:<10} {:<30} {:>3} seats  {}",
                truncate(&v.id, 10),
                truncate(&v.name, 30),
                v.seating_capacity,
                v.price_display
            );
        }
    }

    Ok(())
}

pub fn output_categories(output_format: OutputFormat, categories: &[CategoryCount]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(categories);
    }

    for c in categories {
        println!("{:<18} {:>3}  {}", c.name, c.count, c.description);
    }
    Ok(())
}

pub fn output_operators(output_format: OutputFormat, operators: &[Operator]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(operators);
    }

    if operators.is_empty() {
        println!("No operators registered.");
        return Ok(());
    }

    println!(
        "{:<10} {:<28} {:<18} {:<14} {:<30}",
        "ID", "Business", "Contact", "Phone", "Address"
    );
    println!("{}", "-".repeat(104));
    for o in operators {
        println!(
            "{:<10} {:<28} {:<18} {:<14} {:<30}",
            truncate(&o.id, 10),
            truncate(&o.business_name, 28),
            truncate(or_dash(Some(&o.contact_person)), 18),
            o.contact_number,
            truncate(or_dash(o.address.as_deref()), 30)
        );
    }
    Ok(())
}

pub fn output_inquiries(output_format: OutputFormat, inquiries: &[Inquiry]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(inquiries);
    }

    if inquiries.is_empty() {
        println!("No inquiries found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<22} {:<13} {:<11} {:>4} {:<24} {:<10}",
        "ID", "Name", "Mobile", "Journey", "Pax", "Route", "Status"
    );
    println!("{}", "-".repeat(100));
    for i in inquiries {
        let route = format!(
            "{} -> {}",
            or_dash(i.pickup_location.as_deref()),
            or_dash(i.drop_location.as_deref())
        );
        println!(
            "{:<10} {:<22} {:<13} {:<11} {:>4} {:<24} {:<10}",
            truncate(&i.id, 10),
            truncate(&i.full_name, 22),
            i.mobile,
            i.journey_start_date,
            i.passenger_count,
            truncate(&route, 24),
            i.status
        );
        if let Some(ref notes) = i.internal_notes {
            println!("{:>11}note: {}", "", notes);
        }
    }

    println!();
    println!("{} inquiry(ies)", inquiries.len());
    Ok(())
}

pub fn output_owner_leads(output_format: OutputFormat, leads: &[BusOwnerLead]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(leads);
    }

    if leads.is_empty() {
        println!("No owner leads found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<22} {:<13} {:<16} {:<24} {:<10}",
        "ID", "Name", "Mobile", "City", "Fleet", "Status"
    );
    println!("{}", "-".repeat(98));
    for l in leads {
        println!(
            "{:<10} {:<22} {:<13} {:<16} {:<24} {:<10}",
            truncate(&l.id, 10),
            truncate(&l.full_name, 22),
            l.mobile,
            truncate(&l.city, 16),
            truncate(or_dash(l.vehicle_details.as_deref()), 24),
            l.status
        );
    }
    Ok(())
}

pub fn output_post_page(
    output_format: OutputFormat,
    page: &PostPage,
    page_number: usize,
    page_size: usize,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(page);
    }

    if page.posts.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    println!(
        "{:<10} {:<40} {:<10} {:<12} {:<20}",
        "ID", "Title", "Status", "Published", "Author"
    );
    println!("{}", "-".repeat(96));
    for p in &page.posts {
        let published = p
            .published_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let author = p.author.as_ref().map(|a| a.name.as_str());
        println!(
            "{:<10} {:<40} {:<10} {:<12} {:<20}",
            truncate(&p.id, 10),
            truncate(&p.title, 40),
            p.status,
            published,
            truncate(or_dash(author), 20)
        );
    }

    let pages = page.count.div_ceil(page_size.max(1));
    println!();
    println!("Page {} of {} ({} post(s))", page_number, pages.max(1), page.count);
    Ok(())
}

pub fn output_post(output_format: OutputFormat, post: &BlogPost) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(post);
    }

    println!("\n{}", post.title);
    println!("{}", "=".repeat(post.title.chars().count().max(8)));
    println!("Slug:       {}", post.slug);
    println!("Status:     {}", post.status);
    if let Some(published) = post.published_at {
        println!("Published:  {}", published.format("%Y-%m-%d %H:%M"));
    }
    if let Some(ref author) = post.author {
        println!("Author:     {}", author.name);
    }
    if !post.categories.is_empty() {
        let names: Vec<_> = post.categories.iter().map(|c| c.name.as_str()).collect();
        println!("Categories: {}", names.join(", "));
    }
    if !post.tags.is_empty() {
        let names: Vec<_> = post.tags.iter().map(|t| t.name.as_str()).collect();
        println!("Tags:       {}", names.join(", "));
    }
    if let Some(ref excerpt) = post.excerpt {
        println!("\n{}", excerpt);
    }
    println!("\n{}", post.content);
    Ok(())
}

pub fn output_taxonomy(
    output_format: OutputFormat,
    authors: &[Author],
    categories: &[Category],
    tags: &[Tag],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "authors": authors,
            "categories": categories,
            "tags": tags,
        }));
    }

    println!("Authors:");
    for a in authors {
        println!("  {:<38} {}", a.id, a.name);
    }
    println!("Categories:");
    for c in categories {
        println!("  {:<38} {} ({})", c.id, c.name, c.slug);
    }
    println!("Tags:");
    for t in tags {
        println!("  {:<38} {} ({})", t.id, t.name, t.slug);
    }
    Ok(())
}

pub fn output_blog_settings(output_format: OutputFormat, settings: &BlogSectionSettings) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(settings);
    }

    println!("Homepage blog section");
    println!("=====================");
    println!("Enabled:   {}", if settings.enabled { "Yes" } else { "No" });
    println!("Title:     {}", settings.title);
    println!("Subtitle:  {}", settings.subtitle);
    println!("Posts:     {}", settings.limit);
    Ok(())
}

pub fn output_dashboard(output_format: OutputFormat, stats: &DashboardStats) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(stats);
    }

    println!("\nDashboard");
    println!("=========");
    println!("Inquiries:        {}", stats.total_inquiries);
    println!("  New:            {}", stats.new_inquiries);
    println!(
        "  Converted:      {} ({:.1}%)",
        stats.converted_inquiries,
        stats.conversion_rate()
    );
    println!("Operators:        {}", stats.total_operators);
    println!("Active vehicles:  {}", stats.active_vehicles);
    println!("New owner leads:  {}", stats.new_owner_leads);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Mini Bus", 10), "Mini Bus");
        assert_eq!(truncate("Luxury AC Sleeper Bus", 10), "Luxury ...");
        assert_eq!(truncate("₹₹₹₹₹₹₹₹₹₹₹₹", 6), "₹₹₹...");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("Cuttack")), "Cuttack");
    }
}

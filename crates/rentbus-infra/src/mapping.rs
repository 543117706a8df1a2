//! Backend row schemas and their adapters
//!
//! The backend stores vehicles with snake_case columns (`is_ac`,
//! `availability_status`, ...) and returns blog posts with nested join
//! objects. These adapters pin both shapes to fixed structs so the rest of
//! the workspace only sees [`VehicleRecord`] and [`BlogPost`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rentbus_domain::repository::Keyed;
use rentbus_types::{
    AcCategory, Author, Availability, BlogPost, BusLayout, Category, PostStatus, Tag,
    ValidationError, VehicleRecord, VehicleType, PRICE_ON_REQUEST,
};

/// A row of the `vehicles` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub is_ac: Option<bool>,
    #[serde(default)]
    pub seating_capacity: Option<i64>,
    #[serde(default)]
    pub price_display: Option<String>,
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ideal_for: Option<Vec<String>>,
    #[serde(default)]
    pub availability_status: Option<String>,
    #[serde(default)]
    pub bus_layout: Option<String>,
    #[serde(default)]
    pub operator_id: Option<String>,
    #[serde(default)]
    pub agent_contact_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Keyed for VehicleRow {
    fn key(&self) -> &str {
        &self.id
    }
}

impl TryFrom<VehicleRow> for VehicleRecord {
    type Error = ValidationError;

    /// Missing columns take the catalog defaults: bus, non-AC (an unset
    /// `is_ac` is falsy), "On Request", available, 2x2. A row without a
    /// positive seating capacity is rejected.
    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let seating_capacity = row
            .seating_capacity
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n >= 1)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "seating_capacity",
                value: format!("{:?} (vehicle {})", row.seating_capacity, row.id),
            })?;

        let price_display = row
            .price_display
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| PRICE_ON_REQUEST.to_string());

        Ok(VehicleRecord {
            id: row.id,
            name: row.name,
            vehicle_type: row
                .vehicle_type
                .as_deref()
                .and_then(VehicleType::parse)
                .unwrap_or_default(),
            ac_category: AcCategory::from_is_ac(row.is_ac.unwrap_or(false)),
            seating_capacity,
            price_display,
            amenities: row.amenities.unwrap_or_default(),
            images: row.images.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            ideal_for: row.ideal_for.unwrap_or_default(),
            availability: row
                .availability_status
                .as_deref()
                .and_then(Availability::parse)
                .unwrap_or_default(),
            bus_layout: row
                .bus_layout
                .as_deref()
                .and_then(BusLayout::parse)
                .unwrap_or_default(),
            operator_id: row.operator_id,
            agent_contact_number: row.agent_contact_number,
        })
    }
}

impl VehicleRow {
    /// Row for a record, stamped with the given creation time
    pub fn from_record(record: &VehicleRecord, created_at: DateTime<Utc>) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            vehicle_type: Some(record.vehicle_type.as_str().to_string()),
            is_ac: Some(record.ac_category.is_ac()),
            seating_capacity: Some(i64::from(record.seating_capacity)),
            price_display: Some(record.price_display.clone()),
            amenities: Some(record.amenities.clone()),
            images: Some(record.images.clone()),
            description: Some(record.description.clone()),
            ideal_for: Some(record.ideal_for.clone()),
            availability_status: Some(record.availability.as_str().to_string()),
            bus_layout: Some(record.bus_layout.as_str().to_string()),
            operator_id: record.operator_id.clone(),
            agent_contact_number: record.agent_contact_number.clone(),
            created_at,
        }
    }
}

/// A row of the `blog_posts` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRow {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Keyed for PostRow {
    fn key(&self) -> &str {
        &self.id
    }
}

/// A row of `blog_post_categories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCategoryLink {
    pub post_id: String,
    pub category_id: String,
}

/// A row of `blog_post_tags`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTagLink {
    pub post_id: String,
    pub tag_id: String,
}

/// Nested category join object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryJoin {
    #[serde(default)]
    pub blog_categories: Option<Category>,
}

/// Nested tag join object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagJoin {
    #[serde(default)]
    pub blog_tags: Option<Tag>,
}

/// A post as returned by the joined select
/// (`*, author:blog_authors(*), blog_post_categories(blog_categories(*)), blog_post_tags(blog_tags(*))`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostJoinRow {
    #[serde(flatten)]
    pub post: PostRow,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub blog_post_categories: Vec<CategoryJoin>,
    #[serde(default)]
    pub blog_post_tags: Vec<TagJoin>,
}

impl From<PostJoinRow> for BlogPost {
    /// Flatten the join objects; links whose target row is gone are dropped
    fn from(join: PostJoinRow) -> Self {
        let PostJoinRow {
            post,
            author,
            blog_post_categories,
            blog_post_tags,
        } = join;

        BlogPost {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            excerpt: post.excerpt,
            featured_image: post.featured_image,
            author_id: post.author_id,
            published_at: post.published_at,
            status: post.status,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author,
            categories: blog_post_categories
                .into_iter()
                .filter_map(|c| c.blog_categories)
                .collect(),
            tags: blog_post_tags.into_iter().filter_map(|t| t.blog_tags).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_row() -> VehicleRow {
        VehicleRow {
            id: "v-1".to_string(),
            name: "Mini Bus".to_string(),
            vehicle_type: None,
            is_ac: None,
            seating_capacity: Some(25),
            price_display: None,
            amenities: None,
            images: None,
            description: None,
            ideal_for: None,
            availability_status: None,
            bus_layout: None,
            operator_id: None,
            agent_contact_number: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_defaults() {
        let record = VehicleRecord::try_from(bare_row()).unwrap();
        assert_eq!(record.vehicle_type, VehicleType::Bus);
        assert_eq!(record.ac_category, AcCategory::NonAc);
        assert_eq!(record.price_display, PRICE_ON_REQUEST);
        assert_eq!(record.availability, Availability::Available);
        assert_eq!(record.bus_layout, BusLayout::TwoByTwo);
        assert!(record.amenities.is_empty());
    }

    #[test]
    fn test_row_without_capacity_rejected() {
        let mut row = bare_row();
        row.seating_capacity = Some(0);
        assert!(VehicleRecord::try_from(row.clone()).is_err());
        row.seating_capacity = None;
        assert!(VehicleRecord::try_from(row).is_err());
    }

    #[test]
    fn test_record_row_round_trip() {
        let record = VehicleRecord::new("Volvo", VehicleType::Bus, AcCategory::Ac, 40, "₹25,000")
            .with_amenities(["WiFi", "Toilet"])
            .with_availability(Availability::Limited);
        let row = VehicleRow::from_record(&record, Utc::now());
        assert_eq!(row.is_ac, Some(true));
        assert_eq!(row.availability_status.as_deref(), Some("limited"));
        assert_eq!(VehicleRecord::try_from(row).unwrap(), record);
    }

    #[test]
    fn test_flatten_join_response() {
        let raw = serde_json::json!({
            "id": "p-1",
            "title": "Planning a pilgrimage to Puri",
            "slug": "puri-pilgrimage",
            "content": "…",
            "status": "published",
            "published_at": "2026-09-01T06:00:00Z",
            "created_at": "2026-08-30T10:00:00Z",
            "updated_at": "2026-09-01T06:00:00Z",
            "author": {"id": "a-1", "name": "Editorial Desk"},
            "blog_post_categories": [
                {"blog_categories": {"id": "c-1", "name": "Travel Tips", "slug": "travel-tips"}},
                {"blog_categories": null}
            ],
            "blog_post_tags": [
                {"blog_tags": {"id": "t-1", "name": "Odisha", "slug": "odisha"}}
            ]
        });

        let join: PostJoinRow = serde_json::from_value(raw).unwrap();
        let post = BlogPost::from(join);
        assert_eq!(post.slug, "puri-pilgrimage");
        assert_eq!(post.author.map(|a| a.name).as_deref(), Some("Editorial Desk"));
        assert_eq!(post.categories.len(), 1);
        assert_eq!(post.categories[0].slug, "travel-tips");
        assert_eq!(post.tags[0].name, "Odisha");
        assert_eq!(post.status, PostStatus::Published);
    }
}

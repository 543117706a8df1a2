//! Repository trait definitions for the backend tables

use chrono::{DateTime, Utc};

use rentbus_types::{
    Author, BlogPost, BusOwnerLead, Category, CreatePost, Error, Inquiry, Operator, PostPage,
    PostStatus, SiteSetting, Tag, UpdatePost, VehicleRecord,
};

/// Records addressable by a string ID
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for VehicleRecord {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Operator {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Inquiry {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for BusOwnerLead {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Author {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Category {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Tag {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Settings are addressed by their key, not their row ID
impl Keyed for SiteSetting {
    fn key(&self) -> &str {
        &self.key
    }
}

/// CRUD access to one backend table
pub trait RecordRepository<T> {
    /// All rows, newest first
    fn find_all(&self) -> Result<Vec<T>, Error>;

    /// Find a row by its ID
    fn find_by_id(&self, id: &str) -> Result<Option<T>, Error>;

    /// Insert a new row; fails if the ID already exists
    fn insert(&self, record: &T) -> Result<(), Error>;

    /// Replace an existing row; fails if the ID is unknown
    fn update(&self, record: &T) -> Result<(), Error>;

    /// Delete a row; fails if the ID is unknown
    fn delete(&self, id: &str) -> Result<(), Error>;
}

/// Column used to order post listings (always newest first)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrder {
    PublishedAt,
    CreatedAt,
}

/// One page of a post listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub status: Option<PostStatus>,
    pub order: PostOrder,
    /// 1-based page number
    pub page: usize,
    pub limit: usize,
}

impl PostQuery {
    /// Row offset of the first post on the page
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Blog posts with their author, category and tag joins
pub trait BlogRepository {
    fn find_posts(&self, query: &PostQuery) -> Result<PostPage, Error>;

    fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, Error>;

    fn find_by_id(&self, id: &str) -> Result<Option<BlogPost>, Error>;

    /// Insert a post and its category/tag links
    fn insert_post(
        &self,
        post: &CreatePost,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<BlogPost, Error>;

    /// Apply a partial update; `published_at` is only written when `Some`
    fn update_post(
        &self,
        id: &str,
        update: &UpdatePost,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<(), Error>;

    fn delete_post(&self, id: &str) -> Result<(), Error>;

    fn authors(&self) -> Result<Vec<Author>, Error>;

    fn categories(&self) -> Result<Vec<Category>, Error>;

    fn tags(&self) -> Result<Vec<Tag>, Error>;
}

/// Site settings keyed by name
pub trait SettingsRepository {
    fn get(&self, key: &str) -> Result<Option<SiteSetting>, Error>;

    /// Replace the value of an existing setting
    fn update(&self, key: &str, value: serde_json::Value) -> Result<SiteSetting, Error>;

    fn insert(&self, setting: &SiteSetting) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: usize) -> PostQuery {
        PostQuery {
            status: Some(PostStatus::Published),
            order: PostOrder::PublishedAt,
            page,
            limit: 6,
        }
    }

    #[test]
    fn test_offset() {
        assert_eq!(page(0).offset(), 0);
        assert_eq!(page(1).offset(), 0);
        assert_eq!(page(3).offset(), 12);
    }

    #[test]
    fn test_offset_saturates_on_huge_page() {
        assert_eq!(page(usize::MAX).offset(), usize::MAX);
    }
}

//! Blog publishing use cases

use chrono::Utc;

use rentbus_domain::repository::{BlogRepository, PostOrder, PostQuery};
use rentbus_types::{
    Author, BlogPost, Category, CreatePost, Error, PostPage, PostStatus, Result, Tag, UpdatePost,
    ValidationError,
};

/// URL slug from a title: lowercase ASCII alphanumerics joined by single dashes
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub struct BlogService<R> {
    repo: R,
}

impl<R: BlogRepository> BlogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Published posts, newest publication first
    pub fn published(&self, page: usize, limit: usize) -> Result<PostPage> {
        self.repo.find_posts(&PostQuery {
            status: Some(PostStatus::Published),
            order: PostOrder::PublishedAt,
            page,
            limit,
        })
    }

    /// Every post regardless of status, newest first
    pub fn all_posts(&self, page: usize, limit: usize) -> Result<PostPage> {
        self.repo.find_posts(&PostQuery {
            status: None,
            order: PostOrder::CreatedAt,
            page,
            limit,
        })
    }

    pub fn by_slug(&self, slug: &str) -> Result<BlogPost> {
        self.repo
            .find_by_slug(slug)?
            .ok_or_else(|| Error::NotFound(format!("post {}", slug)))
    }

    /// Create a post; a blank slug is derived from the title
    pub fn create(&self, mut post: CreatePost) -> Result<BlogPost> {
        if post.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title").into());
        }
        if post.content.trim().is_empty() {
            return Err(ValidationError::MissingField("content").into());
        }
        if post.slug.trim().is_empty() {
            post.slug = slugify(&post.title);
        }
        if post.slug.is_empty() {
            return Err(ValidationError::MissingField("slug").into());
        }

        let published_at = (post.status == PostStatus::Published).then(Utc::now);
        let created = self.repo.insert_post(&post, published_at)?;
        tracing::info!(id = %created.id, slug = %created.slug, status = %created.status, "post created");
        Ok(created)
    }

    /// Apply an edit; moving to published stamps a new publication time
    pub fn update(&self, id: &str, update: &UpdatePost) -> Result<()> {
        let published_at = (update.status == Some(PostStatus::Published)).then(Utc::now);
        self.repo.update_post(id, update, published_at)?;
        tracing::info!(id, "post updated");
        Ok(())
    }

    pub fn publish(&self, id: &str) -> Result<()> {
        self.update(
            id,
            &UpdatePost {
                status: Some(PostStatus::Published),
                ..UpdatePost::default()
            },
        )
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.repo.delete_post(id)?;
        tracing::info!(id, "post deleted");
        Ok(())
    }

    pub fn authors(&self) -> Result<Vec<Author>> {
        self.repo.authors()
    }

    pub fn categories(&self) -> Result<Vec<Category>> {
        self.repo.categories()
    }

    pub fn tags(&self) -> Result<Vec<Tag>> {
        self.repo.tags()
    }
}

//! File-backed blog tables
//!
//! Posts, authors, categories and tags live in their own tables with two
//! link tables between them. Reads assemble the same nested join object the
//! hosted backend returns and flatten it through the mapping adapter.

use std::path::Path;

use chrono::{DateTime, Utc};

use rentbus_domain::repository::{BlogRepository, PostOrder, PostQuery};
use rentbus_types::{
    Author, BlogPost, Category, CreatePost, PostPage, Result, StoreError, Tag, UpdatePost,
};

use super::json_table::JsonTable;
use crate::mapping::{CategoryJoin, PostCategoryLink, PostJoinRow, PostRow, PostTagLink, TagJoin};

pub struct FileBlogRepository {
    posts: JsonTable<PostRow>,
    authors: JsonTable<Author>,
    categories: JsonTable<Category>,
    tags: JsonTable<Tag>,
    post_categories: JsonTable<PostCategoryLink>,
    post_tags: JsonTable<PostTagLink>,
}

impl FileBlogRepository {
    pub fn open(store_dir: &Path) -> Result<Self> {
        Ok(Self {
            posts: JsonTable::open(store_dir, "blog_posts")?,
            authors: JsonTable::open(store_dir, "blog_authors")?,
            categories: JsonTable::open(store_dir, "blog_categories")?,
            tags: JsonTable::open(store_dir, "blog_tags")?,
            post_categories: JsonTable::open(store_dir, "blog_post_categories")?,
            post_tags: JsonTable::open(store_dir, "blog_post_tags")?,
        })
    }

    /// Resolve the author and link tables for one post row
    fn join(&self, post: PostRow) -> PostJoinRow {
        let author = post.author_id.as_deref().and_then(|id| self.authors.get(id));
        let blog_post_categories = self
            .post_categories
            .select(|link| link.post_id == post.id)
            .into_iter()
            .map(|link| CategoryJoin {
                blog_categories: self.categories.get(&link.category_id),
            })
            .collect();
        let blog_post_tags = self
            .post_tags
            .select(|link| link.post_id == post.id)
            .into_iter()
            .map(|link| TagJoin {
                blog_tags: self.tags.get(&link.tag_id),
            })
            .collect();

        PostJoinRow {
            post,
            author,
            blog_post_categories,
            blog_post_tags,
        }
    }

    fn ensure_slug_free(&self, slug: &str, except_id: Option<&str>) -> Result<()> {
        let taken = self
            .posts
            .select(|p| p.slug == slug)
            .iter()
            .any(|p| Some(p.id.as_str()) != except_id);
        if taken {
            return Err(StoreError::DuplicateSlug(slug.to_string()).into());
        }
        Ok(())
    }

    fn replace_categories(&self, post_id: &str, category_ids: &[String]) -> Result<()> {
        self.post_categories.mutate(|links| {
            links.retain(|link| link.post_id != post_id);
            links.extend(category_ids.iter().map(|category_id| PostCategoryLink {
                post_id: post_id.to_string(),
                category_id: category_id.clone(),
            }));
            Ok(())
        })
    }

    fn replace_tags(&self, post_id: &str, tag_ids: &[String]) -> Result<()> {
        self.post_tags.mutate(|links| {
            links.retain(|link| link.post_id != post_id);
            links.extend(tag_ids.iter().map(|tag_id| PostTagLink {
                post_id: post_id.to_string(),
                tag_id: tag_id.clone(),
            }));
            Ok(())
        })
    }

    fn links_of(&self, post_id: &str) -> PostLinks {
        PostLinks {
            category_ids: self
                .post_categories
                .select(|link| link.post_id == post_id)
                .into_iter()
                .map(|link| link.category_id)
                .collect(),
            tag_ids: self
                .post_tags
                .select(|link| link.post_id == post_id)
                .into_iter()
                .map(|link| link.tag_id)
                .collect(),
        }
    }

    /// Rewrite the link rows of a post; `None` leaves that table alone.
    /// Returns the links held before the write.
    fn write_links(
        &self,
        post_id: &str,
        category_ids: Option<&[String]>,
        tag_ids: Option<&[String]>,
    ) -> Result<PostLinks> {
        let previous = self.links_of(post_id);
        if let Some(ids) = category_ids {
            self.replace_categories(post_id, ids)?;
        }
        if let Some(ids) = tag_ids {
            if let Err(e) = self.replace_tags(post_id, ids) {
                if category_ids.is_some() {
                    self.restore_links(post_id, &previous);
                }
                return Err(e);
            }
        }
        Ok(previous)
    }

    /// Put back links saved by `write_links` after the post write failed
    fn restore_links(&self, post_id: &str, previous: &PostLinks) {
        let restored = self
            .replace_categories(post_id, &previous.category_ids)
            .and_then(|_| self.replace_tags(post_id, &previous.tag_ids));
        if let Err(e) = restored {
            tracing::warn!(post_id, error = %e, "could not restore post links");
        }
    }

    fn require_post(&self, id: &str) -> Result<()> {
        if self.posts.get(id).is_none() {
            return Err(StoreError::NotFound {
                table: self.posts.name(),
                id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn add_author(&self, author: Author) -> Result<()> {
        self.authors.insert(author)
    }

    pub fn add_category(&self, category: Category) -> Result<()> {
        self.categories.insert(category)
    }

    pub fn add_tag(&self, tag: Tag) -> Result<()> {
        self.tags.insert(tag)
    }
}

/// Category and tag IDs linked to one post
struct PostLinks {
    category_ids: Vec<String>,
    tag_ids: Vec<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

impl BlogRepository for FileBlogRepository {
    fn find_posts(&self, query: &PostQuery) -> Result<PostPage> {
        let mut rows = self
            .posts
            .select(|p| query.status.map_or(true, |status| p.status == status));
        match query.order {
            PostOrder::PublishedAt => rows.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
            PostOrder::CreatedAt => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }

        let count = rows.len();
        let posts = rows
            .into_iter()
            .skip(query.offset())
            .take(query.limit)
            .map(|row| BlogPost::from(self.join(row)))
            .collect();
        tracing::debug!(page = query.page, limit = query.limit, count, "listed posts");

        Ok(PostPage { posts, count })
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>> {
        Ok(self
            .posts
            .select(|p| p.slug == slug)
            .into_iter()
            .next()
            .map(|row| BlogPost::from(self.join(row))))
    }

    fn find_by_id(&self, id: &str) -> Result<Option<BlogPost>> {
        Ok(self.posts.get(id).map(|row| BlogPost::from(self.join(row))))
    }

    fn insert_post(
        &self,
        post: &CreatePost,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<BlogPost> {
        self.ensure_slug_free(&post.slug, None)?;

        let now = Utc::now();
        let row = PostRow {
            id: uuid::Uuid::new_v4().to_string(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: post.content.clone(),
            excerpt: non_empty(&post.excerpt),
            featured_image: non_empty(&post.featured_image),
            author_id: non_empty(&post.author_id),
            published_at,
            status: post.status,
            created_at: now,
            updated_at: now,
        };
        let id = row.id.clone();

        // Links go first so a visible post always has its taxonomy
        let category_ids = Some(post.category_ids.as_slice()).filter(|ids| !ids.is_empty());
        let tag_ids = Some(post.tag_ids.as_slice()).filter(|ids| !ids.is_empty());
        let previous = self.write_links(&id, category_ids, tag_ids)?;
        if let Err(e) = self.posts.insert(row.clone()) {
            self.restore_links(&id, &previous);
            return Err(e);
        }

        Ok(BlogPost::from(self.join(row)))
    }

    fn update_post(
        &self,
        id: &str,
        update: &UpdatePost,
        published_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        if let Some(slug) = &update.slug {
            self.ensure_slug_free(slug, Some(id))?;
        }
        self.require_post(id)?;

        let previous =
            self.write_links(id, update.category_ids.as_deref(), update.tag_ids.as_deref())?;
        let modified = self.posts.modify(id, |row| {
            if let Some(title) = &update.title {
                row.title = title.clone();
            }
            if let Some(slug) = &update.slug {
                row.slug = slug.clone();
            }
            if let Some(content) = &update.content {
                row.content = content.clone();
            }
            if update.excerpt.is_some() {
                row.excerpt = non_empty(&update.excerpt);
            }
            if update.featured_image.is_some() {
                row.featured_image = non_empty(&update.featured_image);
            }
            if update.author_id.is_some() {
                row.author_id = non_empty(&update.author_id);
            }
            if let Some(status) = update.status {
                row.status = status;
            }
            if published_at.is_some() {
                row.published_at = published_at;
            }
            row.updated_at = Utc::now();
            Ok(())
        });
        if modified.is_err() {
            self.restore_links(id, &previous);
        }
        modified
    }

    /// Delete a post and its link rows
    fn delete_post(&self, id: &str) -> Result<()> {
        self.require_post(id)?;

        let previous = self.write_links(id, Some(&[][..]), Some(&[][..]))?;
        if let Err(e) = self.posts.remove(id) {
            self.restore_links(id, &previous);
            return Err(e);
        }
        Ok(())
    }

    fn authors(&self) -> Result<Vec<Author>> {
        Ok(self.authors.snapshot())
    }

    fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.snapshot())
    }

    fn tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.snapshot())
    }
}

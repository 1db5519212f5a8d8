//! Blog service: enriched listings, ownership-guarded mutation.

use std::collections::HashMap;

use blognest_common::{AppError, AppResult, IdGenerator};
use blognest_db::{
    entities::{blog, category, user},
    repositories::{BlogRepository, CategoryRepository, UserRepository},
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::interaction::{InteractionService, ReactionCounts};

/// Safe projection of a user for embedding in responses.
///
/// Never carries the password digest.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<user::Model> for UserView {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
        }
    }
}

/// A blog enriched for presentation: like/dislike counts are computed
/// projections attached at assembly time, never persisted on the row.
#[derive(Debug, Clone, Serialize)]
pub struct BlogView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub published: bool,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    pub likes: i64,
    pub dislikes: i64,
    pub creator: UserView,
    pub category: category::Model,
}

/// Input for creating a blog.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(min = 1, max = 2048))]
    pub description: String,

    #[validate(length(min = 1))]
    pub body: String,

    pub category_id: String,
}

/// Input for updating a blog. Replaces title/description/body/category_id;
/// owner and creation time are immutable.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBlogInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(min = 1, max = 2048))]
    pub description: String,

    #[validate(length(min = 1))]
    pub body: String,

    pub category_id: String,
}

/// Blog service for business logic.
#[derive(Clone)]
pub struct BlogService {
    blog_repo: BlogRepository,
    category_repo: CategoryRepository,
    user_repo: UserRepository,
    interactions: InteractionService,
    id_gen: IdGenerator,
}

impl BlogService {
    /// Create a new blog service.
    #[must_use]
    pub fn new(
        blog_repo: BlogRepository,
        category_repo: CategoryRepository,
        user_repo: UserRepository,
        interactions: InteractionService,
    ) -> Self {
        Self {
            blog_repo,
            category_repo,
            user_repo,
            interactions,
            id_gen: IdGenerator::new(),
        }
    }

    // ==================== Read path ====================

    /// List all blogs, newest first, optionally filtered by a substring
    /// match on title or description.
    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<BlogView>> {
        let blogs = self.blog_repo.find_all(search).await?;
        self.enrich_many(blogs).await
    }

    /// Get one blog by ID.
    pub async fn get(&self, id: &str) -> AppResult<BlogView> {
        let blog = self.blog_repo.get_by_id(id).await?;
        self.enrich_one(blog).await
    }

    /// List blogs in a category. The category must exist.
    pub async fn list_by_category(
        &self,
        category_id: &str,
        search: Option<&str>,
    ) -> AppResult<Vec<BlogView>> {
        self.category_repo.get_by_id(category_id).await?;

        let blogs = self.blog_repo.find_by_category(category_id, search).await?;
        self.enrich_many(blogs).await
    }

    /// List blogs owned by a user, newest first.
    pub async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<BlogView>> {
        let blogs = self.blog_repo.find_by_user(user_id).await?;
        self.enrich_many(blogs).await
    }

    /// List blogs a user currently likes.
    pub async fn list_liked_by_user(&self, user_id: &str) -> AppResult<Vec<BlogView>> {
        let blog_ids = self.interactions.liked_blog_ids(user_id).await?;
        let blogs = self.blog_repo.find_by_ids(&blog_ids).await?;
        self.enrich_many(blogs).await
    }

    // ==================== Write path ====================

    /// Create a blog owned by `owner_id`.
    pub async fn create(&self, input: CreateBlogInput, owner_id: &str) -> AppResult<BlogView> {
        input.validate()?;

        // Referencing a missing category fails before any write
        let category = self.category_repo.get_by_id(&input.category_id).await?;
        let creator = self.user_repo.get_by_id(owner_id).await?;

        let model = blog::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            description: Set(input.description),
            body: Set(input.body),
            published: Set(true),
            created_at: Set(chrono::Utc::now().into()),
            user_id: Set(owner_id.to_string()),
            category_id: Set(input.category_id),
        };

        let blog = self.blog_repo.create(model).await?;

        tracing::info!(blog_id = %blog.id, user_id = %owner_id, "Created blog");

        // A fresh blog has no interactions yet
        Ok(Self::assemble(blog, ReactionCounts::default(), creator, category))
    }

    /// Update a blog. Only the owner may update; a changed category must
    /// exist before anything is written.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateBlogInput,
        acting_user_id: &str,
    ) -> AppResult<BlogView> {
        input.validate()?;

        let blog = self.blog_repo.get_by_id(id).await?;
        Self::authorize_mutation(&blog, acting_user_id)?;

        if input.category_id != blog.category_id {
            self.category_repo.get_by_id(&input.category_id).await?;
        }

        let mut active: blog::ActiveModel = blog.into();
        active.title = Set(input.title);
        active.description = Set(input.description);
        active.body = Set(input.body);
        active.category_id = Set(input.category_id);

        let updated = self.blog_repo.update(active).await?;
        self.enrich_one(updated).await
    }

    /// Delete a blog and all its interactions. Only the owner may delete.
    pub async fn delete(&self, id: &str, acting_user_id: &str) -> AppResult<()> {
        let blog = self.blog_repo.get_by_id(id).await?;
        Self::authorize_mutation(&blog, acting_user_id)?;

        let blog_id = blog.id.clone();
        self.blog_repo.delete_with_interactions(blog).await?;

        tracing::info!(blog_id = %blog_id, user_id = %acting_user_id, "Deleted blog");
        Ok(())
    }

    /// Ownership guard for mutations: only the creating user may modify
    /// or delete a blog.
    pub fn authorize_mutation(blog: &blog::Model, acting_user_id: &str) -> AppResult<()> {
        if blog.user_id == acting_user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Not authorized to modify this blog".to_string(),
            ))
        }
    }

    // ==================== Enrichment ====================

    async fn enrich_one(&self, blog: blog::Model) -> AppResult<BlogView> {
        let mut views = self.enrich_many(vec![blog]).await?;
        views
            .pop()
            .ok_or_else(|| AppError::Internal("Enrichment dropped a blog".to_string()))
    }

    /// Attach counts, creator and category to blog rows, preserving order.
    ///
    /// One grouped count query per kind plus one batched fetch each for
    /// creators and categories, regardless of how many blogs are listed.
    async fn enrich_many(&self, blogs: Vec<blog::Model>) -> AppResult<Vec<BlogView>> {
        if blogs.is_empty() {
            return Ok(vec![]);
        }

        let blog_ids: Vec<String> = blogs.iter().map(|b| b.id.clone()).collect();
        let counts = self.interactions.counts_for(&blog_ids).await?;

        let mut user_ids: Vec<String> = blogs.iter().map(|b| b.user_id.clone()).collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let users: HashMap<String, user::Model> = self
            .user_repo
            .find_by_ids(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        let mut category_ids: Vec<String> = blogs.iter().map(|b| b.category_id.clone()).collect();
        category_ids.sort_unstable();
        category_ids.dedup();
        let categories: HashMap<String, category::Model> = self
            .category_repo
            .find_by_ids(&category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        blogs
            .into_iter()
            .map(|blog| {
                let creator = users.get(&blog.user_id).cloned().ok_or_else(|| {
                    AppError::Internal(format!("Blog {} references missing user", blog.id))
                })?;
                let category = categories.get(&blog.category_id).cloned().ok_or_else(|| {
                    AppError::Internal(format!("Blog {} references missing category", blog.id))
                })?;
                let count = counts.get(&blog.id).copied().unwrap_or_default();

                Ok(Self::assemble(blog, count, creator, category))
            })
            .collect()
    }

    fn assemble(
        blog: blog::Model,
        counts: ReactionCounts,
        creator: user::Model,
        category: category::Model,
    ) -> BlogView {
        BlogView {
            id: blog.id,
            title: blog.title,
            description: blog.description,
            body: blog.body,
            published: blog.published,
            created_at: blog.created_at,
            likes: counts.likes,
            dislikes: counts.dislikes,
            creator: creator.into(),
            category,
        }
    }
}

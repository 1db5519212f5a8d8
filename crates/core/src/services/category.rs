//! Category service: catalog listing with per-category blog counts.

use std::collections::HashMap;

use blognest_common::AppResult;
use blognest_db::{
    entities::category,
    repositories::{BlogRepository, CategoryRepository},
};
use serde::Serialize;

/// A category with the number of blogs filed under it.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: category::Model,
    pub blog_count: i64,
}

/// Category service for business logic.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
    blog_repo: BlogRepository,
}

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub fn new(category_repo: CategoryRepository, blog_repo: BlogRepository) -> Self {
        Self {
            category_repo,
            blog_repo,
        }
    }

    /// List all categories alphabetically, each with its blog count.
    ///
    /// Counts come from one grouped query over blogs; categories with no
    /// blogs report zero.
    pub async fn list(&self) -> AppResult<Vec<CategoryView>> {
        let categories = self.category_repo.find_all().await?;
        let counts: HashMap<String, i64> =
            self.blog_repo.count_per_category().await?.into_iter().collect();

        Ok(categories
            .into_iter()
            .map(|category| {
                let blog_count = counts.get(&category.id).copied().unwrap_or(0);
                CategoryView {
                    category,
                    blog_count,
                }
            })
            .collect())
    }

    /// Get one category by ID.
    pub async fn get(&self, id: &str) -> AppResult<category::Model> {
        self.category_repo.get_by_id(id).await
    }

    /// Insert the default category catalog when the table is empty.
    ///
    /// Returns the number of categories inserted.
    pub async fn seed_defaults(&self) -> AppResult<usize> {
        blognest_db::seed::seed_categories(&self.category_repo).await
    }
}

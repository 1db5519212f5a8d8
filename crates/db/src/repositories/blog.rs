//! Blog repository.

use std::sync::Arc;

use crate::entities::{Blog, BlogInteraction, blog, blog_interaction};
use blognest_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

/// Blog repository for database operations.
#[derive(Clone)]
pub struct BlogRepository {
    db: Arc<DatabaseConnection>,
}

impl BlogRepository {
    /// Create a new blog repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a blog by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<blog::Model>> {
        Blog::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a blog by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<blog::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::BlogNotFound(id.to_string()))
    }

    /// Get all blogs, newest first, optionally filtered by a substring
    /// match on title or description.
    pub async fn find_all(&self, search: Option<&str>) -> AppResult<Vec<blog::Model>> {
        let mut query = Blog::find();

        if let Some(term) = search {
            query = query.filter(Self::search_condition(term));
        }

        query
            .order_by_desc(blog::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get blogs in a category, newest first, with the same optional search
    /// filter as [`find_all`](Self::find_all).
    pub async fn find_by_category(
        &self,
        category_id: &str,
        search: Option<&str>,
    ) -> AppResult<Vec<blog::Model>> {
        let mut query = Blog::find().filter(blog::Column::CategoryId.eq(category_id));

        if let Some(term) = search {
            query = query.filter(Self::search_condition(term));
        }

        query
            .order_by_desc(blog::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get blogs owned by a user, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<blog::Model>> {
        Blog::find()
            .filter(blog::Column::UserId.eq(user_id))
            .order_by_desc(blog::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find blogs by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<blog::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Blog::find()
            .filter(blog::Column::Id.is_in(ids.to_vec()))
            .order_by_desc(blog::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count blogs per category in one grouped query.
    pub async fn count_per_category(&self) -> AppResult<Vec<(String, i64)>> {
        Blog::find()
            .select_only()
            .column(blog::Column::CategoryId)
            .column_as(blog::Column::Id.count(), "count")
            .group_by(blog::Column::CategoryId)
            .into_tuple::<(String, i64)>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new blog.
    pub async fn create(&self, model: blog::ActiveModel) -> AppResult<blog::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a blog.
    pub async fn update(&self, model: blog::ActiveModel) -> AppResult<blog::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a blog together with all its interactions.
    ///
    /// Both deletes run in one transaction so an interruption can never
    /// leave interaction rows referencing a missing blog.
    pub async fn delete_with_interactions(&self, blog: blog::Model) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        BlogInteraction::delete_many()
            .filter(blog_interaction::Column::BlogId.eq(blog.id.clone()))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        blog.delete(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    fn search_condition(term: &str) -> Condition {
        Condition::any()
            .add(blog::Column::Title.contains(term))
            .add(blog::Column::Description.contains(term))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_blog(id: &str, title: &str, user_id: &str, category_id: &str) -> blog::Model {
        blog::Model {
            id: id.to_string(),
            title: title.to_string(),
            description: "a description".to_string(),
            body: "a body".to_string(),
            published: true,
            created_at: Utc::now().into(),
            user_id: user_id.to_string(),
            category_id: category_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let blog = create_test_blog("b1", "Hello", "u1", "c1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[blog.clone()]])
                .into_connection(),
        );

        let repo = BlogRepository::new(db);
        let result = repo.find_by_id("b1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().title, "Hello");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<blog::Model>::new()])
                .into_connection(),
        );

        let repo = BlogRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(matches!(result, Err(AppError::BlogNotFound(_))));
    }

    #[tokio::test]
    async fn test_find_all_with_search_filters_on_title_or_description() {
        let blog = create_test_blog("b1", "Rust tips", "u1", "c1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[blog]])
                .into_connection(),
        );

        let repo = BlogRepository::new(db);
        let result = repo.find_all(Some("Rust")).await.unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_search_condition_targets_title_and_description() {
        use sea_orm::{DatabaseBackend as Backend, QueryTrait};

        let sql = Blog::find()
            .filter(BlogRepository::search_condition("rust"))
            .build(Backend::Postgres)
            .to_string();

        assert!(sql.contains("title"));
        assert!(sql.contains("description"));
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let b1 = create_test_blog("b1", "First", "u1", "c1");
        let b2 = create_test_blog("b2", "Second", "u1", "c2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[b1, b2]])
                .into_connection(),
        );

        let repo = BlogRepository::new(db);
        let result = repo.find_by_user("u1").await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_input_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = BlogRepository::new(db);
        let result = repo.find_by_ids(&[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_delete_with_interactions_runs_in_one_transaction() {
        let blog = create_test_blog("b1", "Doomed", "u1", "c1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 2,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );

        let repo = BlogRepository::new(db);
        // Interaction delete and blog delete both consume exec results
        // inside a single committed transaction.
        repo.delete_with_interactions(blog).await.unwrap();
    }
}

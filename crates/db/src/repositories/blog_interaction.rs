//! Blog interaction repository.

use std::sync::Arc;

use crate::entities::{
    BlogInteraction,
    blog_interaction::{self, InteractionKind},
};
use blognest_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QuerySelect, Set, TransactionTrait,
};

/// The write performed by a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleWrite {
    /// No prior interaction existed; a new row was inserted.
    Inserted,
    /// A row of the other kind existed; its kind was flipped in place.
    Switched,
    /// A row of the same kind existed; it was deleted (untoggle).
    Removed,
}

/// Blog interaction repository for database operations.
#[derive(Clone)]
pub struct BlogInteractionRepository {
    db: Arc<DatabaseConnection>,
}

impl BlogInteractionRepository {
    /// Create a new blog interaction repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Count interactions of one kind on a blog.
    pub async fn count_by_blog(&self, blog_id: &str, kind: InteractionKind) -> AppResult<u64> {
        BlogInteraction::find()
            .filter(blog_interaction::Column::BlogId.eq(blog_id))
            .filter(blog_interaction::Column::Kind.eq(kind))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count interactions of one kind across many blogs in a single
    /// grouped query. Blogs without matching rows are absent from the
    /// result; callers default them to zero.
    pub async fn count_by_blogs(
        &self,
        blog_ids: &[String],
        kind: InteractionKind,
    ) -> AppResult<Vec<(String, i64)>> {
        if blog_ids.is_empty() {
            return Ok(vec![]);
        }

        BlogInteraction::find()
            .select_only()
            .column(blog_interaction::Column::BlogId)
            .column_as(blog_interaction::Column::Id.count(), "count")
            .filter(blog_interaction::Column::BlogId.is_in(blog_ids.to_vec()))
            .filter(blog_interaction::Column::Kind.eq(kind))
            .group_by(blog_interaction::Column::BlogId)
            .into_tuple::<(String, i64)>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the IDs of blogs a user has reacted to with the given kind.
    /// Callers sort the resolved blogs themselves, so no order is imposed
    /// here.
    pub async fn find_blog_ids_by_user(
        &self,
        user_id: &str,
        kind: InteractionKind,
    ) -> AppResult<Vec<String>> {
        BlogInteraction::find()
            .select_only()
            .column(blog_interaction::Column::BlogId)
            .filter(blog_interaction::Column::UserId.eq(user_id))
            .filter(blog_interaction::Column::Kind.eq(kind))
            .into_tuple::<String>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Apply a toggle for `(user_id, blog_id)` with the desired kind.
    ///
    /// The check-then-act sequence runs in one transaction. The unique
    /// index on `(user_id, blog_id)` is the backstop for the remaining
    /// race window: a violating concurrent insert rolls back and is
    /// reported as `Conflict` instead of a raw store error.
    pub async fn toggle(
        &self,
        new_id: &str,
        user_id: &str,
        blog_id: &str,
        kind: InteractionKind,
    ) -> AppResult<ToggleWrite> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let existing = BlogInteraction::find()
            .filter(blog_interaction::Column::UserId.eq(user_id))
            .filter(blog_interaction::Column::BlogId.eq(blog_id))
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let write = match existing {
            Some(row) if row.kind == kind => {
                row.delete(&txn)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                ToggleWrite::Removed
            }
            Some(row) => {
                let mut active: blog_interaction::ActiveModel = row.into();
                active.kind = Set(kind);
                // A concurrent untoggle can delete the row between the
                // check and this update; report it like the insert race.
                active.update(&txn).await.map_err(|e| match e {
                    DbErr::RecordNotUpdated => AppError::Conflict(
                        "Concurrent reaction to this blog, please retry".to_string(),
                    ),
                    e => AppError::Database(e.to_string()),
                })?;
                ToggleWrite::Switched
            }
            None => {
                let model = blog_interaction::ActiveModel {
                    id: Set(new_id.to_string()),
                    user_id: Set(user_id.to_string()),
                    blog_id: Set(blog_id.to_string()),
                    kind: Set(kind),
                    created_at: Set(chrono::Utc::now().into()),
                };

                model.insert(&txn).await.map_err(|e| {
                    super::classify_write_error(e, "Concurrent reaction to this blog, please retry")
                })?;
                ToggleWrite::Inserted
            }
        };

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(write)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn create_test_interaction(
        id: &str,
        user_id: &str,
        blog_id: &str,
        kind: InteractionKind,
    ) -> blog_interaction::Model {
        blog_interaction::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            blog_id: blog_id.to_string(),
            kind,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_count_by_blogs_empty_input_skips_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = BlogInteractionRepository::new(db);
        let result = repo.count_by_blogs(&[], InteractionKind::Like).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_inserts_when_no_prior_interaction() {
        let inserted = create_test_interaction("i1", "u1", "b1", InteractionKind::Like);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // check finds nothing
                .append_query_results([Vec::<blog_interaction::Model>::new()])
                // insert returns the new row
                .append_query_results([[inserted]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = BlogInteractionRepository::new(db);
        let write = repo
            .toggle("i1", "u1", "b1", InteractionKind::Like)
            .await
            .unwrap();

        assert_eq!(write, ToggleWrite::Inserted);
    }

    #[tokio::test]
    async fn test_toggle_removes_on_repeated_kind() {
        let existing = create_test_interaction("i1", "u1", "b1", InteractionKind::Like);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = BlogInteractionRepository::new(db);
        let write = repo
            .toggle("i2", "u1", "b1", InteractionKind::Like)
            .await
            .unwrap();

        assert_eq!(write, ToggleWrite::Removed);
    }

    #[tokio::test]
    async fn test_toggle_switches_kind_in_place() {
        let existing = create_test_interaction("i1", "u1", "b1", InteractionKind::Like);
        let switched = create_test_interaction("i1", "u1", "b1", InteractionKind::Dislike);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .append_query_results([[switched]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = BlogInteractionRepository::new(db);
        let write = repo
            .toggle("i2", "u1", "b1", InteractionKind::Dislike)
            .await
            .unwrap();

        assert_eq!(write, ToggleWrite::Switched);
    }

    #[tokio::test]
    async fn test_toggle_switch_reports_conflict_when_row_vanishes() {
        let existing = create_test_interaction("i1", "u1", "b1", InteractionKind::Like);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                // update returns no row, as after a concurrent untoggle
                .append_query_results([Vec::<blog_interaction::Model>::new()])
                .into_connection(),
        );

        let repo = BlogInteractionRepository::new(db);
        let result = repo.toggle("i2", "u1", "b1", InteractionKind::Dislike).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }
}

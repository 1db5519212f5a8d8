//! Repositories for database access.

use blognest_common::AppError;
use sea_orm::{DbErr, SqlErr};

pub mod blog;
pub mod blog_interaction;
pub mod category;
pub mod user;

pub use blog::BlogRepository;
pub use blog_interaction::{BlogInteractionRepository, ToggleWrite};
pub use category::CategoryRepository;
pub use user::UserRepository;

/// Map a failed write, re-classifying a unique-constraint violation as
/// `Conflict` with the given message.
pub(crate) fn classify_write_error(err: DbErr, conflict_message: &str) -> AppError {
    classify_sql_error(err.sql_err(), conflict_message, err.to_string())
}

fn classify_sql_error(sql_err: Option<SqlErr>, conflict_message: &str, detail: String) -> AppError {
    if matches!(sql_err, Some(SqlErr::UniqueConstraintViolation(_))) {
        AppError::Conflict(conflict_message.to_string())
    } else {
        AppError::Database(detail)
    }
}

//! Business logic services.

#![allow(missing_docs)]

pub mod blog;
pub mod category;
pub mod interaction;
pub mod user;

pub use blog::{BlogService, BlogView, CreateBlogInput, UpdateBlogInput, UserView};
pub use category::{CategoryService, CategoryView};
pub use interaction::{AppliedKind, InteractionService, ToggleOutcome};
pub use user::{CreateUserInput, UserService};

//! Database entities.

pub mod blog;
pub mod blog_interaction;
pub mod category;
pub mod user;

pub use blog::Entity as Blog;
pub use blog_interaction::Entity as BlogInteraction;
pub use category::Entity as Category;
pub use user::Entity as User;

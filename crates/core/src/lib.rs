//! Core business logic for blognest.

pub mod services;

pub use services::*;

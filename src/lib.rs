pub mod auth;
pub mod config;
pub mod error;
pub mod kafka;
pub mod topic;

pub use error::{CatalogError, CatalogResult};

//! Domain layer - Core business logic
//!
//! Contains value objects and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod page;

// Re-export common types
pub use config::{SiteConfig, SiteLayout};
pub use error::*;
pub use page::{OutputName, PageName, SourceName, Template, Title};

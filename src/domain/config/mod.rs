//! Configuration domain module

mod site_config;

pub use site_config::{SiteConfig, SiteLayout, DEFAULT_BIND};

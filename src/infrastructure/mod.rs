//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the filesystem, pulldown-cmark, and the config file.

pub mod config;
pub mod markdown;
pub mod storage;

// Re-export adapters
pub use config::XdgConfigStore;
pub use markdown::PulldownRenderer;
pub use storage::LocalSiteStore;

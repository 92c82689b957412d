//! Storage infrastructure module

mod local;

pub use local::LocalSiteStore;

//! Application layer - Use cases and port interfaces
//!
//! Contains the core site operations and trait definitions
//! for external system interactions.

pub mod generate;
pub mod pages;
pub mod ports;
pub mod publish;

// Re-export use cases
pub use generate::{
    GenerateCallbacks, GenerateError, GenerateReport, GenerateSiteUseCase, PageResult,
};
pub use pages::{PageCatalog, PageDownload};
pub use publish::{PublishError, PublishOutput, PublishUploadUseCase, DOWNLOAD_ROUTE};

// Library exports for the CLI binary and tests

pub mod config;
pub mod error;
pub mod ocr;
pub mod pdf;
pub mod processor;
pub mod report;
pub mod text;

// Re-export commonly used types
pub use config::OcrConfig;
pub use error::OcrError;
pub use processor::{process_directory, PdfOcrProcessor};
pub use report::{DocumentResult, DocumentStatus, PageResult, PageStatus};

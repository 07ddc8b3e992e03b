use thiserror::Error;

/// Errors produced by the OCR processing pipeline.
///
/// Per-page OCR failures are recovered into the page status and never
/// surface as this type; everything here aborts the whole run.
#[derive(Debug, Error)]
pub enum OcrError {
    /// Requested languages are not installed in the OCR engine.
    #[error("unsupported languages: {missing:?} (available: {available:?})")]
    UnsupportedLanguage {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// The input PDF is missing, malformed, or could not be rendered.
    #[error("PDF processing failed: {0}")]
    PdfProcessing(String),

    /// The OCR engine could not be initialized.
    #[error("OCR engine initialization failed: {0}")]
    Init(String),

    /// The result document could not be serialized or written.
    #[error("failed to write results: {0}")]
    Output(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OcrError>;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::{OcrError, Result};

/// Configuration for the OCR processing pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Languages passed to the OCR engine, in priority order.
    pub languages: Vec<String>,
    /// Directory the JSON reports are written to.
    pub output_dir: PathBuf,
    /// Render resolution for rasterized pages, in DPI.
    pub dpi: u32,
    /// Render pages in grayscale (faster OCR, smaller rasters).
    pub grayscale: bool,
    /// Inputs larger than this are rejected before rendering.
    pub max_pdf_size: u64,
    /// Always rasterize and OCR, even when the PDF has an embedded text layer.
    pub force_ocr: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: vec!["eng".to_string()],
            output_dir: PathBuf::from("output"),
            dpi: 300,
            grayscale: true,
            max_pdf_size: 100 * 1024 * 1024,
            force_ocr: false,
        }
    }
}

impl OcrConfig {
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(OcrError::Init(
                "language list must not be empty".to_string(),
            ));
        }
        if self.languages.iter().any(|l| l.trim().is_empty()) {
            return Err(OcrError::Init(
                "language codes must not be blank".to_string(),
            ));
        }
        if self.dpi == 0 {
            return Err(OcrError::Init("dpi must be > 0".to_string()));
        }
        if self.max_pdf_size == 0 {
            return Err(OcrError::Init("max_pdf_size must be > 0".to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for OcrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = OcrConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.languages, vec!["eng"]);
        assert_eq!(config.dpi, 300);
    }

    #[test]
    fn test_empty_languages_rejected() {
        let config = OcrConfig {
            languages: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_language_rejected() {
        let config = OcrConfig {
            languages: vec!["eng".to_string(), "  ".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_dpi_rejected() {
        let config = OcrConfig {
            dpi: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: OcrConfig =
            serde_json::from_str(r#"{"languages": ["deu"], "dpi": 150}"#).unwrap();
        assert_eq!(config.languages, vec!["deu"]);
        assert_eq!(config.dpi, 150);
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert!(config.grayscale);
    }
}

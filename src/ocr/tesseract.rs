use std::path::Path;
use std::process::Command;
use tracing::info;

use crate::error::{OcrError, Result};

/// Wrapper around the external Tesseract binary.
///
/// Construction probes the binary and validates the requested languages,
/// so an unsupported language fails before any page is processed.
#[derive(Debug)]
pub struct TesseractEngine {
    lang_spec: String,
}

impl TesseractEngine {
    pub fn new(languages: &[String]) -> Result<Self> {
        let check = Command::new("tesseract").arg("--version").output();
        if check.is_err() {
            return Err(OcrError::Init(
                "tesseract is not installed or not in PATH".to_string(),
            ));
        }

        let available = installed_languages()?;
        let missing = missing_languages(languages, &available);
        if !missing.is_empty() {
            return Err(OcrError::UnsupportedLanguage { missing, available });
        }

        let lang_spec = languages.join("+");
        info!("Tesseract ready with languages: {}", lang_spec);

        Ok(Self { lang_spec })
    }

    /// Run recognition on a single page image, returning the trimmed text.
    ///
    /// A non-zero exit status is an error; the caller decides whether it
    /// aborts the run or is recorded against the page.
    pub fn recognize(&self, image_path: &Path) -> Result<String> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang_spec)
            .output()
            .map_err(|e| OcrError::Init(format!("failed to invoke tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::PdfProcessing(format!(
                "tesseract failed for {:?}: {}",
                image_path,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Query the languages installed in the local Tesseract.
pub fn installed_languages() -> Result<Vec<String>> {
    let output = Command::new("tesseract")
        .arg("--list-langs")
        .output()
        .map_err(|e| OcrError::Init(format!("failed to list tesseract languages: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OcrError::Init(format!(
            "tesseract --list-langs failed: {}",
            stderr.trim()
        )));
    }

    Ok(parse_language_list(&String::from_utf8_lossy(&output.stdout)))
}

/// Requested languages that are not installed, in request order.
fn missing_languages(requested: &[String], available: &[String]) -> Vec<String> {
    requested
        .iter()
        .filter(|lang| !available.contains(*lang))
        .cloned()
        .collect()
}

/// Parse `tesseract --list-langs` output.
///
/// The first line is a banner ("List of available languages (N):"),
/// the rest are one language code per line.
fn parse_language_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("List of"))
        .map(|line| line.to_string())
        .collect()
}

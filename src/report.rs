use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{OcrError, Result};

/// Recognition outcome for a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Success,
    Failed,
}

/// Aggregate outcome for a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Success,
    Partial,
    Failed,
}

/// Recognized text and status for one page. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-indexed page number.
    pub page_number: u32,
    pub text: String,
    pub status: PageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageResult {
    pub fn success(page_number: u32, text: String) -> Self {
        Self {
            page_number,
            text,
            status: PageStatus::Success,
            error: None,
        }
    }

    pub fn failed(page_number: u32, error: String) -> Self {
        Self {
            page_number,
            text: String::new(),
            status: PageStatus::Failed,
            error: Some(error),
        }
    }
}

/// The serialized result of one processing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResult {
    pub pdf_path: String,
    pub pages: Vec<PageResult>,
    pub languages: Vec<String>,
    pub status: DocumentStatus,
    pub page_count: u32,
}

impl DocumentResult {
    /// Build a result from per-page outcomes, computing the overall status.
    pub fn new(pdf_path: &Path, languages: Vec<String>, pages: Vec<PageResult>) -> Self {
        let status = overall_status(&pages);
        let page_count = pages.len() as u32;
        Self {
            pdf_path: pdf_path.display().to_string(),
            pages,
            languages,
            status,
            page_count,
        }
    }
}

fn overall_status(pages: &[PageResult]) -> DocumentStatus {
    let succeeded = pages
        .iter()
        .filter(|p| p.status == PageStatus::Success)
        .count();

    if succeeded == pages.len() {
        DocumentStatus::Success
    } else if succeeded == 0 {
        DocumentStatus::Failed
    } else {
        DocumentStatus::Partial
    }
}

/// Write a result document as pretty-printed JSON, creating directories
/// as needed. Returns the path of the written file.
pub fn save_to_json(result: &DocumentResult, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join(report_file_name(result));

    let json = serde_json::to_string_pretty(result)
        .map_err(|e| OcrError::Output(format!("failed to serialize result: {}", e)))?;

    fs::write(&output_path, json)
        .map_err(|e| OcrError::Output(format!("failed to write {:?}: {}", output_path, e)))?;

    info!("Results saved to {:?}", output_path);
    Ok(output_path)
}

/// `result_<pdf-stem>_<lang1>_<lang2>.json`
fn report_file_name(result: &DocumentResult) -> String {
    let stem = Path::new(&result.pdf_path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    let langs = result.languages.join("_");
    format!("result_{}_{}.json", stem, langs)
}

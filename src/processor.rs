use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{OcrError, Result};
use crate::ocr::TesseractEngine;
use crate::pdf::{extract_text_layer, render_to_images, validate_pdf_path, RenderOptions};
use crate::report::{save_to_json, DocumentResult, PageResult};
use crate::text::clean_ocr_text;

/// The convert → recognize → collect pipeline for a single PDF.
///
/// Construction validates the configuration and the OCR engine, so
/// language problems surface before any page is touched.
#[derive(Debug)]
pub struct PdfOcrProcessor {
    config: OcrConfig,
    engine: TesseractEngine,
}

impl PdfOcrProcessor {
    pub fn new(config: OcrConfig) -> Result<Self> {
        config.validate()?;
        let engine = TesseractEngine::new(&config.languages)?;
        Ok(Self { config, engine })
    }

    /// Process one PDF, returning per-page results in page order.
    ///
    /// Per-page OCR failures are recorded in the page status; only input
    /// validation, rendering, and engine problems abort the run.
    pub fn process(&self, pdf_path: &Path) -> Result<DocumentResult> {
        validate_pdf_path(pdf_path, self.config.max_pdf_size)?;

        if !self.config.force_ocr {
            let layer = extract_text_layer(pdf_path)?;
            if layer.has_text {
                info!("PDF has an embedded text layer, skipping OCR: {:?}", pdf_path);
                return Ok(self.result_from_text_layer(pdf_path, layer.pages));
            }
            info!("PDF appears to be scanned, running OCR: {:?}", pdf_path);
        }

        let scratch = TempDir::new()?;
        let images = render_to_images(
            pdf_path,
            scratch.path(),
            RenderOptions {
                dpi: self.config.dpi,
                grayscale: self.config.grayscale,
            },
        )?;

        let pages = self.recognize_pages(&images);
        Ok(DocumentResult::new(
            pdf_path,
            self.config.languages.clone(),
            pages,
        ))
    }

    /// Process and write the JSON report in one step.
    pub fn process_to_file(&self, pdf_path: &Path) -> Result<(DocumentResult, PathBuf)> {
        let result = self.process(pdf_path)?;
        let written = save_to_json(&result, &self.config.output_dir)?;
        Ok((result, written))
    }

    fn recognize_pages(&self, images: &[PathBuf]) -> Vec<PageResult> {
        let mut pages = Vec::with_capacity(images.len());

        for (idx, image_path) in images.iter().enumerate() {
            let page_number = idx as u32 + 1;

            match self.engine.recognize(image_path) {
                Ok(text) => {
                    let text = clean_ocr_text(&text);
                    if text.is_empty() {
                        warn!("Page {} produced no text", page_number);
                    }
                    info!("Processed page {}/{}", page_number, images.len());
                    pages.push(PageResult::success(page_number, text));
                }
                Err(e) => {
                    warn!("OCR failed for page {}: {}", page_number, e);
                    pages.push(PageResult::failed(page_number, e.to_string()));
                }
            }
        }

        pages
    }

    fn result_from_text_layer(&self, pdf_path: &Path, raw_pages: Vec<String>) -> DocumentResult {
        let pages = raw_pages
            .into_iter()
            .enumerate()
            .map(|(idx, text)| PageResult::success(idx as u32 + 1, clean_ocr_text(&text)))
            .collect();

        DocumentResult::new(pdf_path, self.config.languages.clone(), pages)
    }
}

/// Process every PDF under a directory, continuing past per-file failures.
///
/// Returns the paths of the written reports.
pub fn process_directory(processor: &PdfOcrProcessor, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdf_files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|s| s.to_str())
                .map(|s| s.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    pdf_files.sort();

    if pdf_files.is_empty() {
        return Err(OcrError::PdfProcessing(format!(
            "no PDF files found under {:?}",
            dir
        )));
    }

    info!("Found {} PDF files under {:?}", pdf_files.len(), dir);

    let mut written = Vec::new();
    for (idx, pdf_path) in pdf_files.iter().enumerate() {
        info!(
            "Processing document {}/{}: {:?}",
            idx + 1,
            pdf_files.len(),
            pdf_path
        );
        match processor.process_to_file(pdf_path) {
            Ok((result, path)) => {
                info!(
                    "Document {:?}: {} pages, status {:?}",
                    pdf_path, result.page_count, result.status
                );
                written.push(path);
            }
            Err(e) => {
                warn!("Failed to process {:?}: {}", pdf_path, e);
            }
        }
    }

    Ok(written)
}

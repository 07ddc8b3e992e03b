use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

use crate::error::{OcrError, Result};

/// Render settings for the pdftoppm invocation.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub dpi: u32,
    pub grayscale: bool,
}

/// Render every page of a PDF to a PNG in `scratch_dir` using pdftoppm
/// (part of poppler-utils).
///
/// Returns the page images sorted by page number. The caller owns the
/// scratch directory and its lifetime.
pub fn render_to_images(
    pdf_path: &Path,
    scratch_dir: &Path,
    options: RenderOptions,
) -> Result<Vec<PathBuf>> {
    info!("Converting PDF to images: {:?} at {} dpi", pdf_path, options.dpi);

    let prefix = scratch_dir.join("page");
    let mut cmd = Command::new("pdftoppm");
    cmd.arg("-png")
        .arg("-r")
        .arg(options.dpi.to_string());
    if options.grayscale {
        cmd.arg("-gray");
    }
    cmd.arg(pdf_path).arg(&prefix);

    let output = cmd.output().map_err(|_| {
        OcrError::PdfProcessing(
            "pdftoppm not found; install poppler-utils to render PDF pages".to_string(),
        )
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OcrError::PdfProcessing(format!(
            "pdftoppm failed for {:?}: {}",
            pdf_path,
            stderr.trim()
        )));
    }

    let mut pages = collect_page_images(scratch_dir)?;
    if pages.is_empty() {
        return Err(OcrError::PdfProcessing(format!(
            "no pages rendered from {:?}",
            pdf_path
        )));
    }
    pages.sort_by_key(|(number, _)| *number);

    for (number, path) in &pages {
        match image::image_dimensions(path) {
            Ok((w, h)) => info!("Rendered page {}: {}x{}", number, w, h),
            Err(e) => warn!("Rendered page {} is not a readable image: {}", number, e),
        }
    }

    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

fn collect_page_images(scratch_dir: &Path) -> Result<Vec<(u32, PathBuf)>> {
    let mut pages = Vec::new();

    for entry in std::fs::read_dir(scratch_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("png") {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
            if let Some(number) = parse_page_number(name) {
                pages.push((number, path));
            }
        }
    }

    Ok(pages)
}

/// Extract the page number from a pdftoppm output filename.
///
/// pdftoppm zero-pads the index depending on page count, so both
/// `page-3.png` and `page-003.png` must parse.
fn parse_page_number(file_name: &str) -> Option<u32> {
    let re = Regex::new(r"^page-(\d+)\.png$").ok()?;
    re.captures(file_name)?
        .get(1)?
        .as_str()
        .parse::<u32>()
        .ok()
}

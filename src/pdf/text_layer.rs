use std::path::Path;
use tracing::{info, warn};

use crate::error::{OcrError, Result};

/// Embedded text pulled straight from a PDF, one entry per physical page.
#[derive(Debug, Clone)]
pub struct PdfTextLayer {
    pub pages: Vec<String>,
    pub has_text: bool,
}

/// Extract the embedded text layer of a PDF, if any.
///
/// `has_text` is false for scanned documents, where every page comes
/// back blank.
pub fn extract_text_layer(path: &Path) -> Result<PdfTextLayer> {
    info!("Extracting text layer from PDF: {:?}", path);

    let raw_pages = pdf_extract::extract_text_by_pages(path)
        .map_err(|e| OcrError::PdfProcessing(format!("failed to read {:?}: {}", path, e)))?;

    let pages: Vec<String> = raw_pages.iter().map(|p| p.trim().to_string()).collect();
    let has_text = pages.iter().any(|p| !p.is_empty());
    if !has_text {
        warn!("PDF has no extractable text, OCR required: {:?}", path);
    }

    info!("Text layer has {} pages", pages.len());
    Ok(PdfTextLayer { pages, has_text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Assemble a minimal but well-formed PDF with one Helvetica text
    /// page per entry, including a valid xref table.
    fn build_pdf(page_texts: &[&str]) -> Vec<u8> {
        let n = page_texts.len();
        let font_obj = 3 + 2 * n;
        let mut objects: Vec<String> = Vec::new();

        objects.push("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string());

        let kids: Vec<String> = (0..n).map(|i| format!("{} 0 R", 3 + i)).collect();
        objects.push(format!(
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            n
        ));

        for i in 0..n {
            objects.push(format!(
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Contents {} 0 R /Resources << /Font << /F1 {} 0 R >> >> >>\nendobj\n",
                3 + i,
                3 + n + i,
                font_obj
            ));
        }

        for (i, text) in page_texts.iter().enumerate() {
            let stream = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text);
            objects.push(format!(
                "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
                3 + n + i,
                stream.len(),
                stream
            ));
        }

        objects.push(format!(
            "{} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n",
            font_obj
        ));

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for obj in &objects {
            offsets.push(pdf.len());
            pdf.extend_from_slice(obj.as_bytes());
        }

        let xref_pos = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in &offsets {
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        pdf.extend_from_slice(xref.as_bytes());
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_pos
            )
            .as_bytes(),
        );
        pdf
    }

    fn write_pdf(dir: &TempDir, texts: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join("doc.pdf");
        fs::write(&path, build_pdf(texts)).unwrap();
        path
    }

    #[test]
    fn test_multi_page_pdf_yields_one_entry_per_page() {
        let dir = TempDir::new().unwrap();
        let path = write_pdf(&dir, &["alpha page", "beta page"]);

        let layer = extract_text_layer(&path).unwrap();

        assert!(layer.has_text);
        assert_eq!(layer.pages.len(), 2);
        assert!(layer.pages[0].contains("alpha page"));
        assert!(!layer.pages[0].contains("beta"));
        assert!(layer.pages[1].contains("beta page"));
    }

    #[test]
    fn test_pages_without_text_detected_as_scanned() {
        let dir = TempDir::new().unwrap();
        let path = write_pdf(&dir, &["", ""]);

        let layer = extract_text_layer(&path).unwrap();

        assert!(!layer.has_text);
        assert_eq!(layer.pages.len(), 2);
    }

    #[test]
    fn test_unreadable_pdf_is_processing_error() {
        let err = extract_text_layer(Path::new("/nonexistent/file.pdf")).unwrap_err();
        assert!(matches!(err, OcrError::PdfProcessing(_)));
    }
}

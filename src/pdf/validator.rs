use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{OcrError, Result};

const PDF_MAGIC: [u8; 5] = *b"%PDF-";

/// Check that a path points at a plausible PDF before attempting to render it.
///
/// Rejects missing files, non-`.pdf` extensions, empty files, files above
/// the configured size limit, and files without the `%PDF-` magic.
pub fn validate_pdf_path(path: &Path, max_size: u64) -> Result<()> {
    if !path.exists() {
        return Err(OcrError::PdfProcessing(format!(
            "file not found: {:?}",
            path
        )));
    }

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    if ext.as_deref() != Some("pdf") {
        return Err(OcrError::PdfProcessing(format!(
            "not a PDF file: {:?}",
            path
        )));
    }

    let size = fs::metadata(path)?.len();
    if size == 0 {
        return Err(OcrError::PdfProcessing(format!("empty PDF file: {:?}", path)));
    }
    if size > max_size {
        return Err(OcrError::PdfProcessing(format!(
            "PDF exceeds size limit of {} bytes ({} bytes): {:?}",
            max_size, size, path
        )));
    }

    let mut header = [0u8; 5];
    let mut file = fs::File::open(path)?;
    file.read_exact(&mut header).map_err(|_| {
        OcrError::PdfProcessing(format!("file too short to be a PDF: {:?}", path))
    })?;
    if header != PDF_MAGIC {
        return Err(OcrError::PdfProcessing(format!(
            "missing %PDF- header: {:?}",
            path
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LIMIT: u64 = 100 * 1024 * 1024;

    fn write_pdf(dir: &TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = validate_pdf_path(Path::new("/nonexistent/file.pdf"), LIMIT).unwrap_err();
        assert!(matches!(err, OcrError::PdfProcessing(_)));
    }

    #[test]
    fn test_wrong_extension_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_pdf(&dir, "notes.txt", b"%PDF-1.4 something");
        assert!(validate_pdf_path(&path, LIMIT).is_err());
    }

    #[test]
    fn test_empty_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_pdf(&dir, "empty.pdf", b"");
        let err = validate_pdf_path(&path, LIMIT).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_missing_magic_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_pdf(&dir, "garbage.pdf", b"this is not a pdf at all");
        let err = validate_pdf_path(&path, LIMIT).unwrap_err();
        assert!(matches!(err, OcrError::PdfProcessing(_)));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_pdf(&dir, "big.pdf", b"%PDF-1.4 0123456789");
        let err = validate_pdf_path(&path, 10).unwrap_err();
        assert!(err.to_string().contains("size limit"));
    }

    #[test]
    fn test_valid_header_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_pdf(&dir, "ok.pdf", b"%PDF-1.7\n1 0 obj\nendobj\n%%EOF");
        assert!(validate_pdf_path(&path, LIMIT).is_ok());
    }

    #[test]
    fn test_uppercase_extension_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_pdf(&dir, "scan.PDF", b"%PDF-1.4\n%%EOF");
        assert!(validate_pdf_path(&path, LIMIT).is_ok());
    }
}

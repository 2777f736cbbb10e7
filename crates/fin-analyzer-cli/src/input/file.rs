use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use fin_analyzer_core::extraction::{normalize_pages, normalize_text};

const PDF_MAGIC: &[u8] = b"%PDF-";
const PAGE_BREAK: char = '\u{0c}';

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Read a document as normalized text. PDFs (by extension or magic bytes) go
/// through the PDF text layer and are normalized page by page, with a blank
/// line between pages; anything else must be UTF-8 text.
pub fn read_document(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let bytes = fs::read(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    if is_pdf(&canonical, &bytes) {
        debug!(path = %canonical.display(), bytes = bytes.len(), "extracting PDF text");
        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            format!("Failed to extract text from '{}': {}", canonical.display(), e)
        })?;
        return Ok(pdf_text_to_document(&text));
    }

    let text = String::from_utf8(bytes)
        .map_err(|_| format!("'{}' is neither a PDF nor UTF-8 text", canonical.display()))?;
    Ok(normalize_text(&text))
}

/// The PDF text layer marks page ends with form feeds.
fn pdf_text_to_document(raw: &str) -> String {
    let pages: Vec<&str> = raw.split(PAGE_BREAK).collect();
    debug!(pages = pages.len(), "normalizing PDF pages");
    normalize_pages(&pages)
}

fn is_pdf(path: &Path, head: &[u8]) -> bool {
    let by_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    by_extension || head.starts_with(PDF_MAGIC)
}

/// Resolve and validate the path, preventing directory traversal.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    // Basic existence check
    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_detection() {
        assert!(is_pdf(Path::new("report.PDF"), b""));
        assert!(is_pdf(Path::new("upload.bin"), b"%PDF-1.7\n"));
        assert!(!is_pdf(Path::new("notes.txt"), b"Revenue: 10"));
    }

    #[test]
    fn test_pdf_pages_are_normalized_separately() {
        let raw = "  Revenue: 10 \n\u{0c} \n\u{0c}Equity: 40\n";
        assert_eq!(pdf_text_to_document(raw), "Revenue: 10\n\nEquity: 40");
    }

    #[test]
    fn test_pdf_page_breaks_keep_figures_apart() {
        let document = pdf_text_to_document("Revenue: 1,000\u{0c}Net Income: 50");
        let fields = fin_analyzer_core::extract(&document);
        assert_eq!(fields.get(fin_analyzer_core::FieldName::Revenue), Some(1000.0));
        assert_eq!(fields.get(fin_analyzer_core::FieldName::NetIncome), Some(50.0));
    }

    #[test]
    fn test_missing_file() {
        let err = read_document("definitely/not/here.pdf").unwrap_err();
        assert!(err.to_string().starts_with("File not found"));
    }
}

//! Document text extraction (PDF / plain text).
//!
//! Never fails: unreadable or unsupported documents produce an empty string so an
//! upload is never aborted over its contents.

use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Result};
use bytes::Bytes;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
    Unsupported,
}

impl DocumentFormat {
    /// Classifies by file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => DocumentFormat::Pdf,
            Some("txt") => DocumentFormat::PlainText,
            _ => DocumentFormat::Unsupported,
        }
    }
}

/// Extracts the full text of the document at `path`.
pub fn extract_text(path: &Path) -> String {
    match DocumentFormat::from_path(path) {
        DocumentFormat::Pdf => extract_pdf(path).unwrap_or_else(|e| {
            warn!("Error extracting PDF text from {}: {e}", path.display());
            String::new()
        }),
        DocumentFormat::PlainText => std::fs::read_to_string(path).unwrap_or_else(|e| {
            warn!("Error reading text file {}: {e}", path.display());
            String::new()
        }),
        DocumentFormat::Unsupported => {
            debug!("Unsupported document format: {}", path.display());
            String::new()
        }
    }
}

/// Extracts text from uploaded bytes. The extension of `filename` picks the format.
/// Parsing runs on the blocking pool; a panicking parser degrades to empty text.
pub async fn extract_text_from_upload(filename: &str, data: Bytes) -> String {
    let suffix = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    let result = tokio::task::spawn_blocking(move || -> Result<String> {
        let mut file = tempfile::Builder::new()
            .prefix("skillmatch-")
            .suffix(&suffix)
            .tempfile()?;
        file.write_all(&data)?;
        file.flush()?;
        Ok(extract_text(file.path()))
    })
    .await;

    match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Failed to stage upload {filename} for extraction: {e}");
            String::new()
        }
        Err(e) => {
            warn!("Text extraction task for {filename} aborted: {e}");
            String::new()
        }
    }
}

/// Page-by-page extraction: a page that cannot be decoded contributes "".
/// When no page yields anything, retries the whole document with pdf-extract,
/// which understands more font encodings.
fn extract_pdf(path: &Path) -> Result<String> {
    let doc = lopdf::Document::load(path).map_err(|e| anyhow!("failed to load PDF: {e}"))?;

    let pages: Vec<String> = doc
        .get_pages()
        .keys()
        .map(|&page| {
            doc.extract_text(&[page]).unwrap_or_else(|e| {
                debug!("No extractable text on page {page} of {}: {e}", path.display());
                String::new()
            })
        })
        .collect();

    if pages.iter().any(|p| !p.trim().is_empty()) {
        return Ok(pages.join("\n"));
    }

    match std::panic::catch_unwind(|| pdf_extract::extract_text(path)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => {
            debug!("pdf-extract found no text in {}: {e}", path.display());
            Ok(pages.join("\n"))
        }
        Err(_) => Err(anyhow!("pdf-extract panicked on {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("cv.PDF")), DocumentFormat::Pdf);
        assert_eq!(
            DocumentFormat::from_path(Path::new("notes.txt")),
            DocumentFormat::PlainText
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("cv.docx")),
            DocumentFormat::Unsupported
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("README")),
            DocumentFormat::Unsupported
        );
    }

    #[test]
    fn test_plain_text_read_in_full() {
        let file = write_temp(".txt", "Python, Docker\nLeadership, ünïcode".as_bytes());
        assert_eq!(
            extract_text(file.path()),
            "Python, Docker\nLeadership, ünïcode"
        );
    }

    #[test]
    fn test_uppercase_txt_extension() {
        let file = write_temp(".TXT", b"SQL");
        assert_eq!(extract_text(file.path()), "SQL");
    }

    #[test]
    fn test_docx_is_unsupported_and_empty() {
        let file = write_temp(".docx", b"PK\x03\x04 not really a docx");
        assert_eq!(extract_text(file.path()), "");
    }

    #[test]
    fn test_invalid_utf8_text_is_empty() {
        let file = write_temp(".txt", &[0xff, 0xfe, 0xfd]);
        assert_eq!(extract_text(file.path()), "");
    }

    #[test]
    fn test_missing_file_is_empty() {
        assert_eq!(extract_text(Path::new("/nonexistent/resume.txt")), "");
        assert_eq!(extract_text(Path::new("/nonexistent/resume.pdf")), "");
    }

    #[test]
    fn test_corrupt_pdf_is_empty() {
        let file = write_temp(".pdf", b"%PDF-1.4 this is not a real pdf");
        assert_eq!(extract_text(file.path()), "");
    }

    /// Builds a PDF with one page per entry; `None` is a page with an empty content stream.
    fn write_pdf(pages: &[Option<&str>]) -> tempfile::NamedTempFile {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Document, Object, Stream};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let operations = match text {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        doc.save_to(&mut file).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_pdf_pages_in_order_with_blank_page() {
        let file = write_pdf(&[Some("Python page one"), None, Some("Docker page three")]);
        let text = extract_text(file.path());

        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines, vec!["Python page one", "Docker page three"]);

        // Three pages joined: the blank page still occupies a slot between the others.
        let first = text.find("Python page one").unwrap();
        let third = text.find("Docker page three").unwrap();
        assert!(first < third);
        assert!(text[first..third].matches('\n').count() >= 2);
    }

    #[test]
    fn test_pdf_single_page() {
        let file = write_pdf(&[Some("Kubernetes")]);
        assert_eq!(extract_text(file.path()).trim(), "Kubernetes");
    }

    #[tokio::test]
    async fn test_upload_bytes_use_filename_extension() {
        let text =
            extract_text_from_upload("resume.txt", Bytes::from_static(b"Kubernetes and Git")).await;
        assert_eq!(text, "Kubernetes and Git");

        let text = extract_text_from_upload("resume.rtf", Bytes::from_static(b"{\\rtf1 Git}")).await;
        assert_eq!(text, "");
    }
}

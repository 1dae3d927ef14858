// src/documents/pdf_text.rs
use lopdf::Document;
use std::path::Path;

/// Pulls the raw text layer out of an uploaded document.
pub trait TextExtractor: Send + Sync {
    /// Page texts in document order, each followed by a newline.
    /// Returns `""` when nothing can be read; never fails.
    fn extract_text(&self, path: &Path) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> String {
        let document = match Document::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("Could not open PDF {}: {e}", path.display());
                return String::new();
            }
        };

        let mut text = String::new();
        for page_number in document.get_pages().keys() {
            match document.extract_text(&[*page_number]) {
                Ok(page_text) => {
                    text.push_str(page_text.trim_end());
                    text.push('\n');
                }
                Err(e) => log::debug!("No text on page {page_number}: {e}"),
            }
        }

        // A scanned brochure yields only whitespace.
        if text.trim().is_empty() {
            return String::new();
        }
        text
    }
}

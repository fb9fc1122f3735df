use std::path::Path;

use thiserror::Error;

pub mod cleanup;
pub mod outline;

pub use outline::OutlineEntry;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// DocumentReader trait
// ---------------------------------------------------------------------------

/// The two narrow views the extraction pipeline needs from a document:
/// the bookmark outline and concatenated page-range text.
///
/// This trait exists so that higher-level orchestration can be tested
/// against fixture readers without a real PDF on disk.
pub trait DocumentReader {
    /// Total number of pages in the document.
    fn page_count(&self) -> u32;

    /// The flattened bookmark outline, in document order.
    ///
    /// Entries whose destination cannot be resolved to a page are omitted.
    fn outline(&self) -> Vec<OutlineEntry>;

    /// Text of the 1-indexed page window `start..end` (end-exclusive,
    /// capped at the page count), one newline between pages.
    fn read_range(&self, start: u32, end: u32) -> Result<String, PdfError>;
}

// ---------------------------------------------------------------------------
// Pdf
// ---------------------------------------------------------------------------

/// A loaded PDF document backed by [`lopdf::Document`].
pub struct Pdf {
    doc: lopdf::Document,
}

impl Pdf {
    /// Load a PDF from a file path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PdfError> {
        let doc = lopdf::Document::load(path).map_err(|e| PdfError::Parse(e.to_string()))?;
        Self::from_document(doc)
    }

    /// Parse a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PdfError> {
        let doc = lopdf::Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;
        Self::from_document(doc)
    }

    fn from_document(doc: lopdf::Document) -> Result<Self, PdfError> {
        if doc.is_encrypted() {
            return Err(PdfError::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Direct access to the underlying `lopdf::Document`.
    pub fn raw_doc(&self) -> &lopdf::Document {
        &self.doc
    }
}

impl DocumentReader for Pdf {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn outline(&self) -> Vec<OutlineEntry> {
        outline::extract_outline(&self.doc)
    }

    fn read_range(&self, start: u32, end: u32) -> Result<String, PdfError> {
        let mut text = String::new();
        for page in page_window(start, end, self.page_count()) {
            // A single undecodable page should not sink the whole range;
            // downstream parsing is tolerant of gaps.
            let page_text = self.doc.extract_text(&[page]).unwrap_or_default();
            text.push_str(&page_text);
            text.push('\n');
        }
        Ok(cleanup::cleanup_text(&text))
    }
}

/// The 1-indexed pages covered by the window `start..end`.
///
/// `end` is exclusive and the window is capped at `page_count`, mirroring
/// how callers pass the next segment's start page as the end boundary.
pub fn page_window(start: u32, end: u32, page_count: u32) -> std::ops::RangeInclusive<u32> {
    let last = end.saturating_sub(1).min(page_count);
    if start == 0 || start > last {
        // Empty window, canonical form.
        #[allow(clippy::reversed_empty_ranges)]
        return 1..=0;
    }
    start..=last
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_window_basic() {
        assert_eq!(page_window(3, 7, 100), 3..=6);
    }

    #[test]
    fn page_window_capped_at_page_count() {
        assert_eq!(page_window(98, 200, 100), 98..=100);
    }

    #[test]
    fn page_window_single_page() {
        assert_eq!(page_window(5, 6, 100), 5..=5);
    }

    #[test]
    fn page_window_empty_when_end_not_after_start() {
        assert!(page_window(5, 5, 100).is_empty());
        assert!(page_window(5, 4, 100).is_empty());
    }

    #[test]
    fn page_window_empty_when_start_past_document() {
        assert!(page_window(101, 200, 100).is_empty());
    }

    #[test]
    fn page_window_rejects_page_zero() {
        assert!(page_window(0, 5, 100).is_empty());
    }

    #[test]
    fn from_bytes_rejects_garbage() {
        assert!(Pdf::from_bytes(b"not a pdf").is_err());
    }
}

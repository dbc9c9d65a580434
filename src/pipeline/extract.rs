//! Per-file text extraction.
//!
//! [`extract_resume`] never fails: a read error, a corrupt PDF or a page
//! without a usable text layer turns into an [`ExtractedResume`] whose text
//! is the placeholder message, so one bad file cannot block the batch.
//!
//! PDF parsing is CPU-bound and `lopdf` is synchronous, so the whole
//! document is handled inside `tokio::task::spawn_blocking`. Pages are read
//! strictly in page order on that one thread because their text must be
//! concatenated in reading order.

use crate::error::ExtractionError;
use crate::model::{ContentKind, ExtractedResume, ResumeDraft};
use crate::pipeline::{clean, input};
use lopdf::Document;
use std::sync::Arc;
use tracing::{debug, warn};

/// Convert one draft into text, recording failures as placeholder text.
pub async fn extract_resume(draft: &ResumeDraft) -> ExtractedResume {
    let bytes = match input::read_draft(draft).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read {}: {}", draft.name, e);
            return ExtractedResume::failed(draft, e);
        }
    };

    let result = match draft.kind {
        ContentKind::Text => Ok(clean::decode_text(&bytes)),
        ContentKind::Pdf => extract_pdf(bytes).await,
    };

    match result {
        Ok(text) => {
            debug!("Extracted {} ({} chars)", draft.name, text.len());
            ExtractedResume::ok(draft, text)
        }
        Err(e) => {
            warn!("Failed to extract {}: {}", draft.name, e);
            ExtractedResume::failed(draft, e)
        }
    }
}

/// Extract the text layer of every page, off the async worker threads.
pub async fn extract_pdf(bytes: Arc<[u8]>) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_pdf_blocking(&bytes))
        .await
        .map_err(|e| ExtractionError::PdfLoadFailed {
            detail: format!("extraction task panicked: {e}"),
        })?
}

/// Blocking implementation of PDF text extraction.
///
/// Each page's fragments are joined with a single space; pages are joined
/// with a newline in page order.
pub fn extract_pdf_blocking(bytes: &[u8]) -> Result<String, ExtractionError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::PdfLoadFailed {
        detail: e.to_string(),
    })?;

    let pages = doc.get_pages();
    debug!("PDF has {} pages", pages.len());

    let mut texts = Vec::with_capacity(pages.len());
    for &page_num in pages.keys() {
        let raw = doc
            .extract_text(&[page_num])
            .map_err(|e| ExtractionError::PageFailed {
                page: page_num,
                detail: e.to_string(),
            })?;
        texts.push(clean::join_fragments(&raw));
    }

    Ok(texts.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn text_draft_is_read_verbatim() {
        let draft = ResumeDraft::from_bytes("resume1.txt", b"5 years Go experience".to_vec());
        let out = extract_resume(&draft).await;
        assert!(out.is_ok());
        assert_eq!(out.text, "5 years Go experience");
        assert_eq!(out.size_bytes, 21);
    }

    #[tokio::test]
    async fn malformed_pdf_becomes_placeholder() {
        let draft = ResumeDraft::from_bytes("broken.pdf", b"%PDF-1.4 garbage".to_vec());
        let out = extract_resume(&draft).await;
        assert_eq!(out.name, "broken.pdf");
        assert!(out.text.starts_with("Error extracting text"), "got: {}", out.text);
        assert!(matches!(out.error, Some(ExtractionError::PdfLoadFailed { .. })));
    }

    #[test]
    fn non_pdf_bytes_fail_to_load() {
        let err = extract_pdf_blocking(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, ExtractionError::PdfLoadFailed { .. }));
    }
}

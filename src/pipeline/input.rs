//! Input resolution: user-selected paths to drafts, drafts to bytes.
//!
//! Selecting a file only stats it; the bytes are read when the extractor
//! reaches that draft. A file that disappears in between is therefore a
//! per-file [`ExtractionError`], not a fatal error.

use crate::error::{ExtractionError, MatchError};
use crate::model::{DraftSource, ResumeDraft};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Build drafts for every path, in the order given.
///
/// Fails on the first path that does not exist or cannot be read, mirroring
/// a file picker that only ever hands back real files.
pub fn drafts_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<ResumeDraft>, MatchError> {
    paths
        .iter()
        .map(|p| {
            let draft = ResumeDraft::from_path(p)?;
            debug!(
                "Selected {} ({:?}, {} bytes)",
                draft.name, draft.kind, draft.size_bytes
            );
            Ok(draft)
        })
        .collect()
}

/// Read the full contents of a draft.
pub async fn read_draft(draft: &ResumeDraft) -> Result<Arc<[u8]>, ExtractionError> {
    match &draft.source {
        DraftSource::Bytes(bytes) => Ok(Arc::clone(bytes)),
        DraftSource::Path(path) => tokio::fs::read(path)
            .await
            .map(Arc::from)
            .map_err(|e| ExtractionError::ReadFailed {
                detail: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentKind;
    use std::io::Write;

    #[test]
    fn drafts_keep_path_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("b.txt");
        let b = dir.path().join("a.pdf");
        std::fs::write(&a, "text").unwrap();
        std::fs::write(&b, "%PDF-1.4").unwrap();

        let drafts = drafts_from_paths(&[&a, &b]).unwrap();
        assert_eq!(drafts[0].name, "b.txt");
        assert_eq!(drafts[0].kind, ContentKind::Text);
        assert_eq!(drafts[1].name, "a.pdf");
        assert_eq!(drafts[1].kind, ContentKind::Pdf);
    }

    #[test]
    fn pdf_magic_without_extension() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"%PDF-1.7\n").unwrap();
        let drafts = drafts_from_paths(&[f.path()]).unwrap();
        assert_eq!(drafts[0].kind, ContentKind::Pdf);
    }

    #[test]
    fn missing_path_is_fatal() {
        let err = drafts_from_paths(&["/no/such/resume.txt"]).unwrap_err();
        assert!(matches!(err, MatchError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn vanished_file_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("gone.txt");
        std::fs::write(&p, "x").unwrap();
        let draft = ResumeDraft::from_path(&p).unwrap();
        std::fs::remove_file(&p).unwrap();

        let err = read_draft(&draft).await.unwrap_err();
        assert!(matches!(err, ExtractionError::ReadFailed { .. }));
    }
}

//! Data types flowing through a review: drafts in, extracted texts across
//! the wire, match results back.

use crate::error::{ExtractionError, MatchError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Declared content category of a resume file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Paginated PDF document; text comes from each page's text layer.
    Pdf,
    /// Anything else, read verbatim as text.
    Text,
}

impl ContentKind {
    /// Classify a file by name, falling back to the `%PDF` magic bytes.
    pub fn detect(name: &str, head: &[u8]) -> Self {
        if name.to_ascii_lowercase().ends_with(".pdf") || head.starts_with(b"%PDF") {
            ContentKind::Pdf
        } else {
            ContentKind::Text
        }
    }
}

/// Where a draft's bytes live until extraction reads them.
#[derive(Clone)]
pub enum DraftSource {
    /// A file on disk, read lazily by the extractor.
    Path(PathBuf),
    /// An in-memory buffer (uploads, tests).
    Bytes(Arc<[u8]>),
}

impl fmt::Debug for DraftSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftSource::Path(p) => f.debug_tuple("Path").field(p).finish(),
            DraftSource::Bytes(b) => write!(f, "Bytes(<{} bytes>)", b.len()),
        }
    }
}

/// A user-selected resume that has not been converted to text yet.
#[derive(Debug, Clone)]
pub struct ResumeDraft {
    pub name: String,
    pub source: DraftSource,
    pub size_bytes: u64,
    pub kind: ContentKind,
}

impl ResumeDraft {
    /// Select a resume file on disk.
    ///
    /// Only the metadata and the first four bytes are touched here; the full
    /// read happens during extraction.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MatchError> {
        let path = path.as_ref().to_path_buf();
        let meta = std::fs::metadata(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => MatchError::PermissionDenied { path: path.clone() },
            _ => MatchError::FileNotFound { path: path.clone() },
        })?;
        if !meta.is_file() {
            return Err(MatchError::FileNotFound { path });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut head = [0u8; 4];
        let head_len = std::fs::File::open(&path)
            .and_then(|mut f| f.read(&mut head))
            .unwrap_or(0);

        Ok(Self {
            kind: ContentKind::detect(&name, &head[..head_len]),
            name,
            size_bytes: meta.len(),
            source: DraftSource::Path(path),
        })
    }

    /// Wrap an in-memory buffer, classifying it by name and magic bytes.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        let bytes: Vec<u8> = bytes.into();
        Self {
            kind: ContentKind::detect(&name, &bytes),
            size_bytes: bytes.len() as u64,
            source: DraftSource::Bytes(bytes.into()),
            name,
        }
    }

    /// Override the detected content kind.
    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Text derived from one [`ResumeDraft`].
///
/// When extraction fails, `text` holds the placeholder message and `error`
/// records what went wrong; the entry is still submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedResume {
    pub name: String,
    pub text: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ExtractionError>,
}

impl ExtractedResume {
    pub(crate) fn ok(draft: &ResumeDraft, text: String) -> Self {
        Self {
            name: draft.name.clone(),
            text,
            size_bytes: draft.size_bytes,
            error: None,
        }
    }

    pub(crate) fn failed(draft: &ResumeDraft, error: ExtractionError) -> Self {
        Self {
            name: draft.name.clone(),
            text: error.to_string(),
            size_bytes: draft.size_bytes,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// One score returned by the scoring service.
///
/// The wire shape is `{"Resume": "<name>", "Score": <0..1>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "Resume")]
    pub resume_name: String,
    /// Similarity as a fraction in `0.0..=1.0`.
    #[serde(rename = "Score")]
    pub score: f64,
}

impl MatchResult {
    /// Score scaled to a percentage.
    pub fn percent(&self) -> f64 {
        self.score * 100.0
    }
}

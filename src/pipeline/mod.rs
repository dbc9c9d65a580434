//! Pipeline stages for a resume review.
//!
//! Each submodule implements exactly one step, so each is testable on its
//! own and the orchestration in [`crate::review`] stays a short sequence of
//! calls.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ clean ──▶ submit ──▶ render
//! (bytes)   (lopdf/txt) (fragments) (POST)   (lines/JSON)
//! ```
//!
//! 1. [`input`]   — turn user-selected paths into drafts and read their bytes
//! 2. [`extract`] — PDF text layer or plain text per draft; failures become
//!    placeholder text instead of errors
//! 3. [`clean`]   — trim and join text fragments, strip invisible code points
//! 4. [`submit`]  — the single multipart request to the scoring service
//! 5. [`render`]  — pure projection of results to loading/populated/empty

pub mod clean;
pub mod extract;
pub mod input;
pub mod render;
pub mod submit;

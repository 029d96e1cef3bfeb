//! Error taxonomy (see spec.md §7): the only fallible surface in this
//! crate is allocation during reservation/resize. Everything else —
//! bounds, malformed input — is handled by clamping or no-op, never by
//! returning an error.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TermError {
    #[error("allocation failed while reserving capacity")]
    Alloc,
}

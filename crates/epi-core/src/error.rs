//! Workspace error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `EpiError` via `From` impls, or keep them separate and wrap `EpiError` as
//! one variant.  Both patterns are acceptable; prefer whichever keeps error
//! sites clean.
//!
//! Note that contract violations (an event addressed to the wrong agent) are
//! NOT represented here: they are programming errors in the driver and abort
//! via assertion rather than returning an error.

use thiserror::Error;

/// The top-level error type for `epi-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EpiError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Shorthand result type for all `epi-*` crates.
pub type EpiResult<T> = Result<T, EpiError>;

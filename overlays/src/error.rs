use pagedom::DomError;
use thiserror::Error;

/// Errors surfaced by overlay operations.
///
/// Redundant calls, vetoed closes and unknown ids are not errors. The only
/// failure that reaches the caller is an overlay that cannot be mounted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    #[error("overlay cannot be mounted: {0}")]
    Dom(#[from] DomError),
}

pub type Result<T> = std::result::Result<T, OverlayError>;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The element an operation should attach to is not in the document.
    #[error("target element '{0}' is not attached to the document")]
    MissingTarget(String),
    /// An element with this id is already attached.
    #[error("element id '{0}' is already in use")]
    DuplicateId(String),
    #[error("element '{0}' not found")]
    NotFound(String),
}

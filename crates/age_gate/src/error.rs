use dom::DomError;
use thiserror::Error;

/// Refusals and faults raised while building or toggling the overlay.
///
/// The first four variants are precondition refusals: nothing in the
/// document has been touched when they are returned.
#[derive(Debug, Error)]
pub enum ModalError {
    #[error("`{0}` is not a modal element (expected curtain, dialog or content)")]
    DisallowedElement(String),
    #[error("modal elements have already been created")]
    AlreadyCreated,
    #[error("modal is already shown")]
    AlreadyShown,
    #[error("modal is already hidden")]
    AlreadyHidden,
    #[error(transparent)]
    Dom(#[from] DomError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid age gate configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("age gate configuration must be a JSON object")]
    NotAnObject,
}

//! Error taxonomy shared across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`WardHubError`]
//! through `From`, so handlers only ever match on three outcomes: the input
//! was malformed, the record was missing, or storage failed.

/// Top-level error returned by services and repository ports.
#[derive(Debug, thiserror::Error)]
pub enum WardHubError {
    /// The caller sent something unusable. No storage access happened.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record matches the requested domain identity.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Any other failure reported by the persistence adapter.
    #[error("storage error: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Malformed-input errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required text field is missing or empty.
    #[error("field `{0}` is required")]
    MissingField(&'static str),

    /// A space capacity of zero.
    #[error("field `capacity` must be at least 1")]
    ZeroCapacity,

    /// A path identifier is not a well-formed UUID.
    #[error("invalid {entity} ID")]
    InvalidId {
        /// Kind of record the identifier refers to (e.g. `"space"`).
        entity: &'static str,
    },

    /// The request body could not be bound to the expected shape.
    #[error("{0}")]
    MalformedBody(String),
}

/// A lookup by domain identity found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Kind of record (e.g. `"Space"`).
    pub entity: &'static str,
    /// The identity that was looked up.
    pub id: String,
}

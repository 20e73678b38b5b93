use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Repositories and handlers map into these variants; the API crate owns the
/// translation to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity does not exist, or is not owned by the acting user.
    ///
    /// Ownership failures deliberately surface as `NotFound` rather than
    /// `Forbidden` so callers cannot probe for other users' ids.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

use crate::types::ScanId;

/// Domain-level errors for the pure core.
///
/// The core only fails on contract-violating input; remote conditions
/// are handled by the client layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: ScanId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

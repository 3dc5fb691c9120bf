use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Field-level failures collected by `validator` derives.
    #[error("Validation failed: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),
}

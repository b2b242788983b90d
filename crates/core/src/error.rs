use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// No credential was presented, or it names an identity that no longer exists.
    #[error("Permission required: {0}")]
    PermissionRequired(String),

    /// The credential could not be parsed or its signature does not verify.
    #[error("Permission invalid: {0}")]
    PermissionInvalid(String),

    /// The credential verified but is past its validity window.
    #[error("Permission expired: {0}")]
    PermissionExpired(String),

    /// The credential is valid but the caller is not allowed to touch the resource.
    #[error("Insufficient permissions: {0}")]
    InsufficientPermissions(String),

    /// Login with an unknown username or a wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    Internal(String),
}

//! Bearer-credential evaluation for mutating requests.
//!
//! Every author-only operation runs the same five-state check:
//!
//! ```text
//! Missing            -> PermissionRequired
//! Invalid            -> PermissionInvalid
//! Expired            -> PermissionExpired
//! Valid(id != author)-> InsufficientPermissions
//! Valid(id == author)-> proceed
//! ```
//!
//! The first three states are decided by [`authenticate`] before the target
//! resource is looked up; the last two by [`ensure_author`] once it is.

use crate::error::CoreError;
use crate::types::DbId;

/// Outcome of decoding the bearer credential attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    /// No `Authorization` header.
    Missing,
    /// Header present but malformed, or the token fails verification.
    Invalid,
    /// Token verified but its `exp` is in the past.
    Expired,
    /// Token verified; carries the caller's user id.
    Valid(DbId),
}

/// Resolve a credential to the caller's identity, or the matching error.
pub fn authenticate(credential: Credential) -> Result<DbId, CoreError> {
    match credential {
        Credential::Missing => Err(CoreError::PermissionRequired(
            "Missing Authorization header".into(),
        )),
        Credential::Invalid => Err(CoreError::PermissionInvalid(
            "Invalid bearer token".into(),
        )),
        Credential::Expired => Err(CoreError::PermissionExpired(
            "Bearer token has expired".into(),
        )),
        Credential::Valid(user_id) => Ok(user_id),
    }
}

/// Require that `caller` is the author of the resource.
pub fn ensure_author(caller: DbId, author_id: DbId, entity: &str) -> Result<(), CoreError> {
    if caller != author_id {
        return Err(CoreError::InsufficientPermissions(format!(
            "Only the author can modify this {}",
            entity.to_lowercase()
        )));
    }
    Ok(())
}

/// Run the full check against a resource authored by `author_id`.
pub fn authorize(
    credential: Credential,
    author_id: DbId,
    entity: &str,
) -> Result<DbId, CoreError> {
    let caller = authenticate(credential)?;
    ensure_author(caller, author_id, entity)?;
    Ok(caller)
}

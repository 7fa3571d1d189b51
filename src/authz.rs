/// Ownership and identity guards
///
/// Pure comparison logic over already-loaded identifiers; never touches the
/// store. Route handlers call these before any mutation that targets a
/// user-scoped resource.
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Reject mutation of a resource the caller does not own.
pub fn require_ownership(owner_id: Uuid, caller_id: Uuid) -> Result<()> {
    if owner_id != caller_id {
        return Err(AppError::Forbidden("Not authorized".to_string()));
    }
    Ok(())
}

/// Reject access to another user's "own data" routes.
pub fn require_same_identity(path_user_id: Uuid, caller_id: Uuid) -> Result<()> {
    if path_user_id != caller_id {
        return Err(AppError::Forbidden(
            "Access denied. You can only access your own data.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_passes_ownership_check() {
        let id = Uuid::new_v4();
        assert!(require_ownership(id, id).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let err = require_ownership(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn same_identity_passes() {
        let id = Uuid::new_v4();
        assert!(require_same_identity(id, id).is_ok());
    }

    #[test]
    fn different_identity_is_forbidden() {
        let err = require_same_identity(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}

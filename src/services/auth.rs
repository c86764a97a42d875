//! Auth Context Bridge
//!
//! Resolves an external session identity to the internal caller context
//! (user id + organization id + role). The wire-level session handling is
//! the embedding application's concern; this bridge only answers "who is
//! calling and which organization scopes their queries".

use guildhall_core::context::{CallerContext, OrgRole};

use crate::storage::Database;
use crate::utils::error::{AppError, AppResult};

/// Resolve the caller context from an external session identity.
///
/// Fails `Unauthorized` when no session identity is present, and `NotFound`
/// when the identity has no backing user/organization record yet (e.g. the
/// signup webhook has not landed).
pub fn resolve_caller(db: &Database, external_id: Option<&str>) -> AppResult<CallerContext> {
    let external_id =
        external_id.ok_or_else(|| AppError::unauthorized("No session identity"))?;

    let user = db
        .get_user_by_external_id(external_id)?
        .ok_or_else(|| AppError::not_found("User has no backing organization record"))?;

    Ok(CallerContext::new(
        user.id,
        user.organization_id,
        OrgRole::from_str(&user.role),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_session_is_unauthorized() {
        let db = Database::new_in_memory().unwrap();
        let err = resolve_caller(&db, None).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_unknown_identity_is_not_found() {
        let db = Database::new_in_memory().unwrap();
        let err = resolve_caller(&db, Some("ext_ghost")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_known_identity_resolves_org_scope() {
        let db = Database::new_in_memory().unwrap();
        let org = db.insert_organization("Acme", "acme").unwrap();
        let user = db
            .insert_user("ext_1", "owner@acme.com", &org.id, "owner")
            .unwrap();

        let ctx = resolve_caller(&db, Some("ext_1")).unwrap();
        assert_eq!(ctx.user_id, user.id);
        assert_eq!(ctx.org_id, org.id);
        assert_eq!(ctx.role, OrgRole::Owner);
    }
}

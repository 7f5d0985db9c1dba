//! Ownership guard shared by every mutating content operation.

use uuid::Uuid;

use crate::error::{Result, SocialError};

/// Check that `actor` owns the resource it is about to change.
///
/// `resource` names the kind of record for the error message ("post",
/// "comment", "learning plan"). Ownership is never cached; callers load the
/// current owner and call this on every request.
pub fn authorize(actor: Uuid, owner: Uuid, resource: &'static str) -> Result<()> {
    if actor == owner {
        Ok(())
    } else {
        tracing::warn!(%actor, %owner, resource, "Ownership check failed");
        Err(SocialError::Forbidden(resource))
    }
}

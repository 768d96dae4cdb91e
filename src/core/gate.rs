//! Staff portal access check.

use crate::errors::{AppError, AppResult};
use subtle::ConstantTimeEq;

/// Compare the supplied portal key against the configured one in constant
/// time. Without a configured key the portal stays locked.
pub fn check_portal_key(expected: Option<&str>, supplied: Option<&str>) -> AppResult<()> {
    let expected = expected
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(AppError::PortalLocked)?;

    let supplied = supplied.map(str::trim).unwrap_or_default();

    if supplied.is_empty() {
        return Err(AppError::Unauthorized);
    }

    if bool::from(expected.as_bytes().ct_eq(supplied.as_bytes())) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

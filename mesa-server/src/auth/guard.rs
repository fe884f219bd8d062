//! Role guards
//!
//! Handlers call these after extraction; a mismatch is a 403 with the
//! matching message key.

use shared::error::{AppError, ErrorCode};
use shared::models::Role;

use super::extractor::CurrentAccount;

impl CurrentAccount {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admin-only endpoints (employee management)
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            tracing::warn!(id = self.id, role = %self.role, "Admin guard denied");
            Err(AppError::forbidden(ErrorCode::AdminRequired))
        }
    }

    /// Staff endpoints (tables, staff-created guests). Every account role
    /// qualifies today; the guard keeps the check explicit at call sites.
    pub fn require_staff(&self) -> Result<(), AppError> {
        match self.role {
            Role::Admin | Role::Employee => Ok(()),
        }
    }
}

//! Back-office store errors.

use thiserror::Error;

/// Errors from the admin session store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminAuthError {
    /// Email and password do not match the admin account.
    #[error("Invalid admin credentials")]
    InvalidCredentials,
}

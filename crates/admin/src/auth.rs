//! Admin session store.
//!
//! The back office has a single development account checked locally:
//! no backend call is made to log in.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use boutique_client::TokenStorage;
use boutique_core::{Email, User, UserId};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::error::AdminAuthError;

/// Email of the development admin account.
pub const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin123";
const ADMIN_TOKEN: &str = "fake-admin-token-123";

/// Admin authentication state. Clones share state.
#[derive(Debug, Clone)]
pub struct AdminAuthStore {
    inner: Arc<AdminAuthStoreInner>,
}

#[derive(Debug)]
struct AdminAuthStoreInner {
    tokens: TokenStorage,
    state: RwLock<SessionState>,
    loading: AtomicBool,
}

#[derive(Debug, Default)]
struct SessionState {
    current_user: Option<User>,
    error: Option<String>,
}

fn admin_user() -> User {
    User {
        id: UserId::new("admin-001"),
        email: Email::new_unchecked(ADMIN_EMAIL),
        first_name: "Admin".to_string(),
        last_name: "User".to_string(),
    }
}

impl AdminAuthStore {
    /// Create a logged-out store.
    #[must_use]
    pub fn new(tokens: TokenStorage) -> Self {
        Self {
            inner: Arc::new(AdminAuthStoreInner {
                tokens,
                state: RwLock::new(SessionState::default()),
                loading: AtomicBool::new(false),
            }),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        f(&self.inner.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write(&self, f: impl FnOnce(&mut SessionState)) {
        f(&mut self.inner.state.write().unwrap_or_else(PoisonError::into_inner));
    }

    /// The logged-in admin.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.read(|state| state.current_user.clone())
    }

    /// Returns true if an admin is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read(|state| state.current_user.is_some())
    }

    /// Returns true while a login is being checked.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    /// Message of the last failed login, cleared by a successful one.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read(|state| state.error.clone())
    }

    /// Restore the session from storage.
    pub fn initialize(&self) {
        if self.inner.tokens.get_token().is_none() {
            self.write(|state| state.current_user = None);
            return;
        }

        if let Some(user) = self.inner.tokens.get_user() {
            debug!(user_id = %user.id, "Restored admin session from storage");
            self.write(|state| state.current_user = Some(user));
        }
    }

    /// Log in with the development admin account.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidCredentials` for any other pair; the
    /// message is also kept in [`error`](Self::error).
    pub fn login(&self, email: &str, password: &SecretString) -> Result<User, AdminAuthError> {
        self.inner.loading.store(true, Ordering::SeqCst);
        self.write(|state| state.error = None);

        let result = if email == ADMIN_EMAIL && password.expose_secret() == ADMIN_PASSWORD {
            let user = admin_user();
            self.inner
                .tokens
                .set_token(&SecretString::from(ADMIN_TOKEN.to_string()));
            self.inner.tokens.set_user(&user);
            self.write(|state| state.current_user = Some(user.clone()));
            info!(user_id = %user.id, "Admin logged in");
            Ok(user)
        } else {
            let err = AdminAuthError::InvalidCredentials;
            warn!(email, "Rejected admin login");
            self.write(|state| state.error = Some(err.to_string()));
            Err(err)
        };

        self.inner.loading.store(false, Ordering::SeqCst);
        result
    }

    /// Forget the session and any login error.
    pub fn logout(&self) {
        self.inner.tokens.clear();
        self.write(|state| *state = SessionState::default());
        info!("Admin logged out");
    }
}

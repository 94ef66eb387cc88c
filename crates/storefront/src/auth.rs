//! Customer session store.
//!
//! Holds the logged-in user and mirrors it, with the session token, into
//! [`TokenStorage`] so a restart can restore the session without a network
//! call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use boutique_client::{ProfilingService, TokenStorage};
use boutique_core::{CreateUserRequest, LoginRequest, User};
use secrecy::SecretString;
use tracing::{debug, info, instrument};

use crate::error::AuthError;

/// Customer authentication state. Clones share state.
#[derive(Debug, Clone)]
pub struct AuthStore {
    inner: Arc<AuthStoreInner>,
}

#[derive(Debug)]
struct AuthStoreInner {
    profiling: Arc<dyn ProfilingService>,
    tokens: TokenStorage,
    current_user: RwLock<Option<User>>,
    loading: AtomicBool,
}

/// Sets the loading flag for its lifetime.
struct Loading<'a>(&'a AtomicBool);

impl<'a> Loading<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl AuthStore {
    /// Create a logged-out store.
    #[must_use]
    pub fn new(profiling: Arc<dyn ProfilingService>, tokens: TokenStorage) -> Self {
        Self {
            inner: Arc::new(AuthStoreInner {
                profiling,
                tokens,
                current_user: RwLock::new(None),
                loading: AtomicBool::new(false),
            }),
        }
    }

    /// The logged-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.inner
            .current_user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true if a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .current_user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Returns true while a login, registration or refresh is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    /// The persisted session token.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.inner.tokens.get_token()
    }

    /// The logged-in user, or `AuthError::NotAuthenticated`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if nobody is logged in.
    pub fn require_user(&self) -> Result<User, AuthError> {
        self.current_user().ok_or(AuthError::NotAuthenticated)
    }

    fn set_user(&self, user: Option<User>) {
        *self
            .inner
            .current_user
            .write()
            .unwrap_or_else(PoisonError::into_inner) = user;
    }

    /// Restore the session from storage.
    ///
    /// Without a stored token the store is logged out. With a token and a
    /// cached user, the cached user is trusted as-is.
    pub fn initialize(&self) {
        if self.inner.tokens.get_token().is_none() {
            self.set_user(None);
            return;
        }

        if let Some(user) = self.inner.tokens.get_user() {
            debug!(user_id = %user.id, "Restored session from storage");
            self.set_user(Some(user));
        }
    }

    /// Log in and persist the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Profiling` if the credentials are rejected or the
    /// backend fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<User, AuthError> {
        let _loading = Loading::start(&self.inner.loading);
        self.login_and_persist(request).await
    }

    async fn login_and_persist(&self, request: &LoginRequest) -> Result<User, AuthError> {
        let response = self.inner.profiling.login(request).await?;

        if let Some(token) = response.token {
            self.inner.tokens.set_token(&SecretString::from(token));
        }
        self.inner.tokens.set_user(&response.user);
        self.set_user(Some(response.user.clone()));

        info!(user_id = %response.user.id, "Logged in");
        Ok(response.user)
    }

    /// Create an account, then log in with the same credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Profiling` if registration or the follow-up
    /// login fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &CreateUserRequest) -> Result<User, AuthError> {
        let _loading = Loading::start(&self.inner.loading);
        let user = self.inner.profiling.register(request).await?;
        debug!(user_id = %user.id, "Registered");
        self.login_and_persist(&request.login_request()).await
    }

    /// Forget the session, locally and in storage.
    pub fn logout(&self) {
        self.inner.tokens.clear();
        self.set_user(None);
        info!("Logged out");
    }

    /// Re-fetch the logged-in user and update the cache.
    ///
    /// Does nothing when logged out.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Profiling` if the user cannot be fetched.
    pub async fn refresh_user(&self) -> Result<Option<User>, AuthError> {
        let Some(current) = self.current_user() else {
            return Ok(None);
        };

        let _loading = Loading::start(&self.inner.loading);
        let user = self.inner.profiling.get_user(&current.id).await?;
        self.inner.tokens.set_user(&user);
        self.set_user(Some(user.clone()));
        Ok(Some(user))
    }
}

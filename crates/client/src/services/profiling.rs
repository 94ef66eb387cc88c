//! Profiling service: registration, login and user profiles.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use boutique_core::{
    CreateUserRequest, Email, LoginRequest, LoginResponse, ProfilingError, User, UserId,
};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use url::Url;

use super::collection::{Collection, prefixed_id};
use super::fixtures;
use crate::http::{ApiRequest, RestClient};
use crate::latency::Latency;

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const EMAIL_TAKEN: &str = "Email already exists";

/// User account operations.
#[async_trait]
pub trait ProfilingService: Send + Sync + std::fmt::Debug {
    /// Create an account. Fails with status 409 if the email is taken.
    async fn register(&self, request: &CreateUserRequest) -> Result<User, ProfilingError>;

    /// Exchange credentials for a user and session token.
    ///
    /// Fails with status 401 on bad credentials.
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ProfilingError>;

    /// Fetch one user.
    async fn get_user(&self, id: &UserId) -> Result<User, ProfilingError>;
}

fn not_found(id: &UserId) -> ProfilingError {
    ProfilingError::not_found(format!("User with ID {id} not found"))
}

/// Profiling backend over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteProfilingService {
    client: RestClient<ProfilingError>,
}

impl RemoteProfilingService {
    /// Client for the profiling API at `base_url`.
    #[must_use]
    pub const fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            client: RestClient::new(http, base_url),
        }
    }
}

#[async_trait]
impl ProfilingService for RemoteProfilingService {
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: &CreateUserRequest) -> Result<User, ProfilingError> {
        let request = ApiRequest::post("register user", &["users"])
            .json(request)
            .on_status(409, EMAIL_TAKEN);
        let response = self.client.send(request).await?;

        // 201 with an empty body leaves us without an id to log in with
        if !response.has_body() {
            return Err(ProfilingError::with_status(
                "Registration successful but user data not returned",
                response.status(),
            ));
        }
        response.item("user")
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ProfilingError> {
        let request = ApiRequest::post("log in", &["login"])
            .json(request)
            .on_status(401, INVALID_CREDENTIALS);
        let response = self.client.send(request).await?;

        let token = response.bearer_token();
        let user = response.item("user")?;
        Ok(LoginResponse { user, token })
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn get_user(&self, id: &UserId) -> Result<User, ProfilingError> {
        let request = ApiRequest::get("fetch user", &["users", id.as_str()])
            .on_not_found(format!("User with ID {id} not found"))
            .on_status(403, "Access denied");
        self.client.send(request).await?.item("user")
    }
}

/// Users plus their passwords, keyed by lowercased email.
#[derive(Debug)]
struct Directory {
    users: Collection<User>,
    credentials: HashMap<String, SecretString>,
}

/// Profiling backed by fixture users. Clones share state.
#[derive(Debug, Clone)]
pub struct InMemoryProfilingService {
    directory: Arc<RwLock<Directory>>,
    latency: Latency,
}

impl InMemoryProfilingService {
    /// Seeded with the fixture users and their development passwords.
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        let accounts = fixtures::users()
            .into_iter()
            .map(|(user, password)| (user, password.to_string()))
            .collect();
        Self::with_accounts(accounts, latency)
    }

    /// Seeded with `(user, password)` pairs.
    #[must_use]
    pub fn with_accounts(accounts: Vec<(User, String)>, latency: Latency) -> Self {
        let credentials = accounts
            .iter()
            .map(|(user, password)| (user.email.normalized(), SecretString::from(password.clone())))
            .collect();
        let users = accounts.into_iter().map(|(user, _)| user).collect();

        Self {
            directory: Arc::new(RwLock::new(Directory {
                users: Collection::seeded(users),
                credentials,
            })),
            latency,
        }
    }
}

impl Default for InMemoryProfilingService {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

#[async_trait]
impl ProfilingService for InMemoryProfilingService {
    async fn register(&self, request: &CreateUserRequest) -> Result<User, ProfilingError> {
        self.latency.wait(500).await;

        let email = Email::parse(&request.email)
            .map_err(|e| ProfilingError::with_status(format!("Invalid email: {e}"), 400))?;

        let mut directory = self.directory.write().await;
        if directory.users.find(|u| u.email.matches(email.as_str())).is_some() {
            return Err(ProfilingError::with_status(EMAIL_TAKEN, 409));
        }

        let user = User {
            id: UserId::new(prefixed_id("user", directory.users.next_id())),
            email,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
        };
        directory.credentials.insert(
            user.email.normalized(),
            SecretString::from(request.password.clone()),
        );
        debug!(user_id = %user.id, "Registered mock user");
        Ok(directory.users.insert(user))
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ProfilingError> {
        self.latency.wait(400).await;

        let key = request.email.trim().to_ascii_lowercase();
        let directory = self.directory.read().await;

        let valid = directory
            .credentials
            .get(&key)
            .is_some_and(|stored| stored.expose_secret() == request.password);
        if !valid {
            return Err(ProfilingError::with_status(INVALID_CREDENTIALS, 401));
        }

        let user = directory
            .users
            .find(|u| u.email.matches(&key))
            .cloned()
            .ok_or_else(|| ProfilingError::with_status(INVALID_CREDENTIALS, 401))?;

        let token = format!("mock-jwt-token-{}-{}", user.id, Utc::now().timestamp_millis());
        debug!(user_id = %user.id, "Mock login succeeded");
        Ok(LoginResponse {
            user,
            token: Some(token),
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, ProfilingError> {
        self.latency.wait(200).await;

        self.directory
            .read()
            .await
            .users
            .find(|u| &u.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }
}

//! Shared REST plumbing for the remote services.
//!
//! Every remote service talks JSON over HTTP to its own base URL. The
//! [`RestClient`] turns an [`ApiRequest`] into a call and maps failures
//! into the caller's domain error type:
//!
//! - transport and decode failures are wrapped with the cause preserved
//! - non-2xx statuses become `"Failed to <action>: <reason phrase>"`,
//!   unless the request registered a message for that status
//!
//! Backends are not consistent about envelopes, so [`ApiResponse`] accepts
//! both bare bodies and bodies wrapped under a resource key.

use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use boutique_core::{DomainError, NOT_FOUND};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Per-request timeout for every backend call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const BEARER_PREFIX: &str = "Bearer ";

/// Build the HTTP client shared by all remote services.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()
}

// =============================================================================
// Request
// =============================================================================

/// A call to one backend endpoint.
#[derive(Debug)]
pub struct ApiRequest {
    method: Method,
    action: &'static str,
    path: Vec<String>,
    query: Vec<(&'static str, String)>,
    body: Option<Result<Value, serde_json::Error>>,
    status_messages: Vec<(u16, String)>,
}

impl ApiRequest {
    fn new(method: Method, action: &'static str, path: &[&str]) -> Self {
        Self {
            method,
            action,
            path: path.iter().map(|segment| (*segment).to_owned()).collect(),
            query: Vec::new(),
            body: None,
            status_messages: Vec::new(),
        }
    }

    /// `GET` request. `action` completes "Failed to ..." in error messages.
    #[must_use]
    pub fn get(action: &'static str, path: &[&str]) -> Self {
        Self::new(Method::GET, action, path)
    }

    /// `POST` request.
    #[must_use]
    pub fn post(action: &'static str, path: &[&str]) -> Self {
        Self::new(Method::POST, action, path)
    }

    /// `PUT` request.
    #[must_use]
    pub fn put(action: &'static str, path: &[&str]) -> Self {
        Self::new(Method::PUT, action, path)
    }

    /// Add a query parameter if it has a value.
    #[must_use]
    pub fn query(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.query.push((key, value.to_owned()));
        }
        self
    }

    /// Attach a JSON body. Serialization errors surface when the request is sent.
    #[must_use]
    pub fn json(mut self, body: &impl Serialize) -> Self {
        self.body = Some(serde_json::to_value(body));
        self
    }

    /// Use `message` instead of the generic one when the backend answers `status`.
    #[must_use]
    pub fn on_status(mut self, status: u16, message: impl Into<String>) -> Self {
        self.status_messages.push((status, message.into()));
        self
    }

    /// Shorthand for `on_status(404, message)`.
    #[must_use]
    pub fn on_not_found(self, message: impl Into<String>) -> Self {
        self.on_status(NOT_FOUND, message)
    }

    fn message_for(&mut self, status: StatusCode) -> String {
        let code = status.as_u16();
        match self.status_messages.iter().position(|(s, _)| *s == code) {
            Some(index) => self.status_messages.swap_remove(index).1,
            None => format!(
                "Failed to {}: {}",
                self.action,
                status.canonical_reason().unwrap_or_else(|| status.as_str())
            ),
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// JSON client bound to one domain's base URL, reporting errors as `E`.
pub struct RestClient<E> {
    http: reqwest::Client,
    base_url: Url,
    _error: PhantomData<fn() -> E>,
}

impl<E> Clone for RestClient<E> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            _error: PhantomData,
        }
    }
}

impl<E> fmt::Debug for RestClient<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl<E: DomainError> RestClient<E> {
    /// Create a client for `base_url` sharing `http`'s connection pool.
    #[must_use]
    pub const fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            _error: PhantomData,
        }
    }

    /// The domain's base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve the full URL of a request.
    ///
    /// Path segments are percent-encoded; a trailing slash on the base URL
    /// is dropped first.
    #[must_use]
    pub fn url(&self, request: &ApiRequest) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(&request.path);
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(key, value)| (*key, value.as_str())),
            );
        }
        url
    }

    /// Send a request and read its JSON body.
    ///
    /// # Errors
    ///
    /// Returns `E` when the request cannot be sent, the backend answers with
    /// a non-2xx status, or the body is not JSON.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse<E>, E> {
        let url = self.url(&request);
        let action = request.action;

        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(body) = request.body.take() {
            let body = body
                .map_err(|e| E::wrap(format!("Failed to {action}: invalid request body"), e))?;
            builder = builder.json(&body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| E::wrap(format!("Failed to {action}"), e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                method = %request.method,
                url = %url,
                status = status.as_u16(),
                "Backend rejected request to {action}"
            );
            return Err(E::with_status(
                request.message_for(status),
                status.as_u16(),
            ));
        }

        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| E::wrap(format!("Failed to {action}"), e))?;

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| E::wrap(format!("Failed to {action}: invalid response body"), e))?
        };

        debug!(
            method = %request.method,
            url = %url,
            status = status.as_u16(),
            "Backend request succeeded"
        );

        Ok(ApiResponse {
            status: status.as_u16(),
            headers,
            body,
            action,
            _error: PhantomData,
        })
    }
}

// =============================================================================
// Response
// =============================================================================

/// A successful backend response.
pub struct ApiResponse<E> {
    status: u16,
    headers: HeaderMap,
    body: Value,
    action: &'static str,
    _error: PhantomData<fn() -> E>,
}

impl<E> fmt::Debug for ApiResponse<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiResponse")
            .field("status", &self.status)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

impl<E: DomainError> ApiResponse<E> {
    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Parsed body; `Null` when the backend sent none.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Returns true if the backend sent a body.
    #[must_use]
    pub fn has_body(&self) -> bool {
        !self.body.is_null()
    }

    /// Decode a list that is either a bare array or wrapped under `key`.
    ///
    /// A missing key or empty body yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `E` if the items do not decode as `T`.
    pub fn list<T: DeserializeOwned>(self, key: &str) -> Result<Vec<T>, E> {
        let action = self.action;
        let items = match self.body {
            Value::Null => return Ok(Vec::new()),
            Value::Object(mut map) => match map.remove(key) {
                None | Some(Value::Null) => return Ok(Vec::new()),
                Some(items) => items,
            },
            other => other,
        };
        decode(action, items)
    }

    /// Decode a single resource that is either bare or wrapped under `key`.
    ///
    /// # Errors
    ///
    /// Returns `E` if the resource does not decode as `T`.
    pub fn item<T: DeserializeOwned>(self, key: &str) -> Result<T, E> {
        let action = self.action;
        let value = match self.body {
            Value::Object(mut map) if map.get(key).is_some_and(Value::is_object) => {
                map.remove(key).unwrap_or_default()
            }
            other => other,
        };
        decode(action, value)
    }

    /// Token issued by the backend.
    ///
    /// Read from the `Authorization` header (with an optional `Bearer `
    /// prefix in any case), falling back to a `token` field in the body.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(strip_bearer)
            .filter(|token| !token.is_empty())
            .or_else(|| self.body.get("token").and_then(Value::as_str))
            .map(str::to_owned)
    }
}

fn decode<T: DeserializeOwned, E: DomainError>(action: &str, value: Value) -> Result<T, E> {
    serde_json::from_value(value)
        .map_err(|e| E::wrap(format!("Failed to {action}: invalid response body"), e))
}

/// Strip a case-insensitive `Bearer ` prefix.
fn strip_bearer(value: &str) -> &str {
    let value = value.trim();
    match value.split_at_checked(BEARER_PREFIX.len()) {
        Some((prefix, rest)) if prefix.eq_ignore_ascii_case(BEARER_PREFIX) => rest.trim(),
        _ => value,
    }
}

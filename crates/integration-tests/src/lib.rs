//! Integration tests for Boutique.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p boutique-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `remote_*` - HTTP services against a stub backend served by [`StubBackend`]
//! - `checkout` - storefront and back-office flows over in-memory services
//!
//! No external services are needed: stubs bind to `127.0.0.1:0`.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// An axum router served on an ephemeral local port.
///
/// The server task is aborted on drop.
#[derive(Debug)]
pub struct StubBackend {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl StubBackend {
    /// Serve `router` on `127.0.0.1:0`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn spawn(router: Router) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let task = tokio::spawn(async move {
            // Stub dies with the test; a serve error only shows up as failed requests.
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self { addr, task })
    }

    /// Base URL with `path` as its prefix, e.g. `/api/cataloging`.
    ///
    /// # Errors
    ///
    /// Returns a parse error if `path` does not form a valid URL.
    pub fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("http://{}{path}", self.addr))
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// HTTP client for remote services under test.
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().build()
}

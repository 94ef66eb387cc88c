//! Per-domain service errors.
//!
//! Every service domain gets its own error type so callers can tell a
//! cataloging failure from an ordering failure with a plain type match.
//! All of them share the same shape, generated by [`define_domain_error!`]:
//! a message, an optional HTTP status and an optional underlying cause.

/// Boxed error used as the wrapped cause of a domain error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// HTTP status used for "not found" errors.
pub const NOT_FOUND: u16 = 404;

/// Constructors shared by every domain error.
///
/// Generic plumbing (the REST client, the in-memory stores) builds errors
/// through this trait so it does not need to know which domain it serves.
pub trait DomainError: std::error::Error + Send + Sync + Sized + 'static {
    /// Error without status or cause.
    fn new(message: impl Into<String>) -> Self;

    /// Error carrying the HTTP status that produced it.
    fn with_status(message: impl Into<String>, status: u16) -> Self;

    /// Error wrapping an underlying cause.
    fn wrap(message: impl Into<String>, source: impl Into<BoxError>) -> Self;

    /// The HTTP status, if the error came from (or emulates) an HTTP response.
    fn status(&self) -> Option<u16>;

    /// Not-found error (status 404).
    fn not_found(message: impl Into<String>) -> Self {
        Self::with_status(message, NOT_FOUND)
    }

    /// Returns true if this error represents a missing resource.
    fn is_not_found(&self) -> bool {
        self.status() == Some(NOT_FOUND)
    }
}

/// Macro to define a domain error type.
///
/// Creates a struct with:
/// - `Display` showing the message, `Error::source` returning the cause
/// - accessors `message()`, `status()`, `is_not_found()`
/// - a [`DomainError`] implementation
///
/// # Example
///
/// ```rust
/// # use boutique_core::{define_domain_error, DomainError};
/// define_domain_error!(InventoryError, "inventory");
///
/// let err = InventoryError::not_found("SKU 42 not found");
/// assert!(err.is_not_found());
/// assert_eq!(err.status(), Some(404));
/// ```
#[macro_export]
macro_rules! define_domain_error {
    ($name:ident, $domain:literal) => {
        #[doc = concat!("Error returned by ", $domain, " service operations.")]
        #[derive(Debug, ::thiserror::Error)]
        #[error("{message}")]
        pub struct $name {
            message: String,
            status: Option<u16>,
            #[source]
            source: Option<$crate::error::BoxError>,
        }

        impl $name {
            /// The human-readable message.
            #[must_use]
            pub fn message(&self) -> &str {
                &self.message
            }

            /// The HTTP status, if any.
            #[must_use]
            pub const fn status(&self) -> Option<u16> {
                self.status
            }

            /// Returns true if the status is 404.
            #[must_use]
            pub fn is_not_found(&self) -> bool {
                self.status == Some($crate::error::NOT_FOUND)
            }

            /// Error without status or cause.
            #[must_use]
            pub fn new(message: impl Into<String>) -> Self {
                <Self as $crate::error::DomainError>::new(message)
            }

            /// Error with an HTTP status.
            #[must_use]
            pub fn with_status(message: impl Into<String>, status: u16) -> Self {
                <Self as $crate::error::DomainError>::with_status(message, status)
            }

            /// Not-found error (status 404).
            #[must_use]
            pub fn not_found(message: impl Into<String>) -> Self {
                <Self as $crate::error::DomainError>::not_found(message)
            }

            /// Error wrapping an underlying cause.
            #[must_use]
            pub fn wrap(
                message: impl Into<String>,
                source: impl Into<$crate::error::BoxError>,
            ) -> Self {
                <Self as $crate::error::DomainError>::wrap(message, source)
            }
        }

        impl $crate::error::DomainError for $name {
            fn new(message: impl Into<String>) -> Self {
                Self {
                    message: message.into(),
                    status: None,
                    source: None,
                }
            }

            fn with_status(message: impl Into<String>, status: u16) -> Self {
                Self {
                    message: message.into(),
                    status: Some(status),
                    source: None,
                }
            }

            fn wrap(message: impl Into<String>, source: impl Into<$crate::error::BoxError>) -> Self {
                Self {
                    message: message.into(),
                    status: None,
                    source: Some(source.into()),
                }
            }

            fn status(&self) -> Option<u16> {
                self.status
            }
        }
    };
}

define_domain_error!(CatalogingError, "cataloging");
define_domain_error!(OrderingError, "ordering");
define_domain_error!(ShippingError, "shipping");
define_domain_error!(PayingError, "paying");
define_domain_error!(ProfilingError, "profiling");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_not_found_has_404() {
        let err = OrderingError::not_found("Order with ID x not found");
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Order with ID x not found");
    }

    #[test]
    fn test_with_status_is_not_not_found() {
        let err = ProfilingError::with_status("Access denied", 403);
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn test_wrap_preserves_cause() {
        let cause = std::io::Error::other("connection reset");
        let err = ShippingError::wrap("Failed to create shipment", cause);

        assert_eq!(err.status(), None);
        assert_eq!(err.message(), "Failed to create shipment");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "connection reset");
    }

    #[test]
    fn test_generic_construction() {
        fn missing<E: DomainError>() -> E {
            E::not_found("gone")
        }

        let err: PayingError = missing();
        assert!(DomainError::is_not_found(&err));
        let err: CatalogingError = missing();
        assert_eq!(err.status(), Some(404));
    }
}

//! Status enums for orders, shipments and payments.
//!
//! None of these carry a transition guard: the backends accept any status
//! on update and so does the client.

use serde::{Deserialize, Serialize};

/// Error returned when parsing a status from its wire name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseStatusError {
    kind: &'static str,
    value: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in lifecycle order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name (e.g. `"SHIPPED"`).
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseStatusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(ParseStatusError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Lifecycle of an order.
    ///
    /// Nominal flow is CREATED → ORDERED → PAID → PREPARING → SHIPPED →
    /// DELIVERED, with CANCELLED as the exit.
    OrderStatus, "order status" {
        Created => "CREATED",
        Ordered => "ORDERED",
        Paid => "PAID",
        Preparing => "PREPARING",
        Shipped => "SHIPPED",
        Delivered => "DELIVERED",
        Cancelled => "CANCELLED",
    }
}

wire_enum! {
    /// Lifecycle of a shipment. New shipments start in `Preparing`.
    ShippingStatus, "shipping status" {
        Preparing => "PREPARING",
        Shipped => "SHIPPED",
        Delivered => "DELIVERED",
        Returned => "RETURNED",
    }
}

wire_enum! {
    /// Outcome of a payment.
    PaymentStatus, "payment status" {
        Accepted => "ACCEPTED",
        Refused => "REFUSED",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_screaming_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
        let status: ShippingStatus = serde_json::from_str("\"RETURNED\"").unwrap();
        assert_eq!(status, ShippingStatus::Returned);
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("paid".parse::<OrderStatus>().unwrap(), OrderStatus::Paid);
        assert_eq!(
            " Shipped ".parse::<ShippingStatus>().unwrap(),
            ShippingStatus::Shipped
        );
        let err = "LOST".parse::<ShippingStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid shipping status: LOST");
    }

    #[test]
    fn test_display_matches_serde() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }
}

//! Core types for Boutique.
//!
//! Request and response shapes for the five service domains, the cart, and
//! type-safe wrappers for identifiers and email addresses.

pub mod cart;
pub mod cataloging;
pub mod email;
pub mod id;
pub mod ordering;
pub mod paying;
pub mod profiling;
pub mod shipping;
pub mod status;

pub use cart::{CartItem, CartSummary};
pub use cataloging::{
    CreateProductRequest, Product, ProductList, ProductListParams, UpdateProductRequest,
};
pub use email::{Email, EmailError};
pub use id::*;
pub use ordering::{
    CreateOrderRequest, ListOrdersParams, Order, OrderItem, UpdateOrderStatusRequest,
};
pub use paying::{DEFAULT_CURRENCY, ListPaymentsParams, Payment, ProcessPaymentRequest};
pub use profiling::{CreateUserRequest, LoginRequest, LoginResponse, User};
pub use shipping::{
    Address, CreateShipmentRequest, ListShipmentsParams, Shipment, UpdateShipmentStatusRequest,
};
pub use status::{OrderStatus, ParseStatusError, PaymentStatus, ShippingStatus};

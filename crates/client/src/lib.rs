//! Boutique service clients.
//!
//! This crate provides the client layer shared by the storefront and the
//! back office:
//!
//! - [`config`]: per-domain base URLs and fake-data flags from the environment
//! - [`services`]: cataloging, ordering, shipping, paying and profiling, each
//!   over HTTP or in memory
//! - [`storage`]: key/value persistence for the session and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod http;
pub mod latency;
pub mod services;
pub mod storage;

pub use config::{ClientConfig, ConfigError, Domain, DomainConfig};
pub use error::ClientError;
pub use latency::Latency;
pub use services::{
    CatalogingService, OrderingService, PayingService, ProfilingService, Services,
    ShippingService,
};
pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageError, TokenStorage};

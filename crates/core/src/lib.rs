//! Boutique Core - Shared types library.
//!
//! This crate provides the types used across all Boutique components:
//! - `client` - Domain services (HTTP and in-memory) and local storage
//! - `storefront` - Front-office session and shopping cart state
//! - `admin` - Back-office session state
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and errors - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Request/response shapes for the five service domains and the cart
//! - [`error`] - One error type per service domain

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod types;

pub use error::*;
pub use types::*;

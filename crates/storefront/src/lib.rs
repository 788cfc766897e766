//! NANASU storefront library.
//!
//! The catalog query service and its JSON API, provided as a library so the
//! CLI and integration tests can drive the same code as the server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

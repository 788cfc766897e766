//! NANASU Core - Shared catalog types.
//!
//! This crate provides the types shared by every NANASU component:
//! - `storefront` - Catalog query service and JSON API
//! - `cli` - Command-line access to the same catalog operations
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. The filter/sort/paginate pipeline lives in the storefront crate;
//! this crate defines the shapes it consumes and produces.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices and product badges
//! - [`product`] - Products, variants, categories and sellers
//! - [`query`] - Search queries, sort keys and suggestions
//! - [`pagination`] - Paginated responses
//! - [`api`] - The tagged success/failure envelope and error codes
//! - [`normalize`] - Classification of upstream failures into [`ApiError`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod normalize;
pub mod pagination;
pub mod product;
pub mod query;
pub mod types;

pub use api::{ApiError, ApiResponse, ErrorCode};
pub use normalize::{UpstreamFailure, normalize_error};
pub use pagination::{DEFAULT_PAGE_SIZE, PaginatedResponse, PaginationMeta};
pub use product::{Category, Product, ProductError, Seller, Variant};
pub use query::{SearchQuery, SortKey, Suggestions};
pub use types::*;

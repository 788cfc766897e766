//! HTTP middleware stack for the storefront API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`, capture errors and transactions)
//! 2. CORS (read-only catalog, any origin)
//! 3. Request ID (tag each request, echo it back)
//! 4. `TraceLayer` (request logging, inside the request ID span)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};

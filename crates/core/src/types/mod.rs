//! Core types for NANASU.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod badge;
pub mod id;
pub mod price;
pub mod rating;

pub use badge::Badge;
pub use id::*;
pub use price::Price;
pub use rating::{Rating, RatingError};

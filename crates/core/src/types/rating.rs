//! Rating floors supplied by users.

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use thiserror::Error;

/// Errors from parsing a [`Rating`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    #[error("rating must be a number: {0}")]
    Invalid(#[from] ParseFloatError),

    #[error("rating must be a finite number")]
    NotFinite,
}

/// A finite rating value, as accepted from query strings and flags.
///
/// `NaN` compares false against everything, so a `NaN` floor would let every
/// product through. Parsing rejects it along with the infinities.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rating(f64);

impl Rating {
    /// The rating as a plain float. Always finite.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl FromStr for Rating {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse()?;
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(RatingError::NotFinite)
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

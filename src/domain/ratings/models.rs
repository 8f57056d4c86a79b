//! Rating value type.

use rust_decimal::Decimal;
use thiserror::Error;

/// The value was outside 0–5 or not a half-star step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rating must be 0 to 5 in half-star steps, got {0}")]
pub struct InvalidRating(pub Decimal);

/// A star rating: 0 to 5 inclusive, in half-star steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(Decimal);

impl Rating {
    /// Validate and wrap a rating value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRating`] when the value is negative, above 5, or
    /// not a multiple of one half.
    pub fn new(value: Decimal) -> Result<Self, InvalidRating> {
        let doubled = value * Decimal::from(2);

        if value < Decimal::ZERO || value > Decimal::from(5) || !doubled.fract().is_zero() {
            return Err(InvalidRating(value));
        }

        Ok(Self(value.normalize()))
    }

    /// The rating value.
    #[must_use]
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_and_half_stars_are_accepted() {
        for raw in ["0", "2", "3.5", "5"] {
            let value: Decimal = raw.parse().expect("test literal should parse");

            assert!(Rating::new(value).is_ok(), "{raw} should be a valid rating");
        }
    }

    #[test]
    fn out_of_range_and_off_step_values_are_rejected() {
        for raw in ["-0.5", "5.5", "3.2", "4.75"] {
            let value: Decimal = raw.parse().expect("test literal should parse");
            let result = Rating::new(value);

            assert!(
                matches!(result, Err(InvalidRating(_))),
                "{raw} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn equal_ratings_compare_equal_across_scales() {
        let a = Rating::new("3.5".parse().expect("test literal should parse"));
        let b = Rating::new("3.50".parse().expect("test literal should parse"));

        assert_eq!(a, b, "normalization should erase trailing zeros");
    }
}

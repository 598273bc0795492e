//! Star ratings.

use crate::codes::Code;
use crate::error::CoreError;

pub const RATING_MIN: f64 = 0.5;
pub const RATING_MAX: f64 = 5.0;
pub const RATING_STEP: f64 = 0.5;

/// Validate a star rating: within `0.5..=5.0` and a multiple of `0.5`.
pub fn validate_rating(rating: f64) -> Result<(), CoreError> {
    let steps = rating / RATING_STEP;
    if !rating.is_finite()
        || !(RATING_MIN..=RATING_MAX).contains(&rating)
        || (steps - steps.round()).abs() > f64::EPSILON
    {
        return Err(CoreError::Validation(Code::InvalidParamRating));
    }
    Ok(())
}

//! Range checks shared by the profile constructors and engine parameters.
//!
//! Every check names the offending field so the caller can point the user at
//! the exact input that was rejected. Values are never clamped.

use crate::errors::{AlgaeError, AlgaeResult};
use crate::FloatValue;

/// Check that `value` is finite and lies within `[min, max]`.
pub(crate) fn within(
    field: &str,
    value: FloatValue,
    min: FloatValue,
    max: FloatValue,
) -> AlgaeResult<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(AlgaeError::invalid(field, format!("within [{min}, {max}]"), value))
    }
}

/// Check that `value` is finite and strictly positive.
pub(crate) fn positive(field: &str, value: FloatValue) -> AlgaeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AlgaeError::invalid(field, "finite and > 0", value))
    }
}

/// Check that `value` is finite and not negative.
pub(crate) fn non_negative(field: &str, value: FloatValue) -> AlgaeResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AlgaeError::invalid(field, "finite and >= 0", value))
    }
}

/// Check that `value` is finite and at least `min`.
pub(crate) fn at_least(field: &str, value: FloatValue, min: FloatValue) -> AlgaeResult<()> {
    if value.is_finite() && value >= min {
        Ok(())
    } else {
        Err(AlgaeError::invalid(field, format!("finite and >= {min}"), value))
    }
}

pub(crate) fn finite(field: &str, value: FloatValue) -> AlgaeResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AlgaeError::invalid(field, "finite", value))
    }
}

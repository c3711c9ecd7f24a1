use crate::errors::{AlgaeError, AlgaeResult};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Closed interval `[low, high]` in which a strain grows without limitation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalRange {
    pub low: FloatValue,
    pub high: FloatValue,
}

impl OptimalRange {
    pub fn new(low: FloatValue, high: FloatValue) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: FloatValue) -> bool {
        value >= self.low && value <= self.high
    }

    /// Distance from `value` to the nearest edge of the range, zero inside it.
    pub fn distance(&self, value: FloatValue) -> FloatValue {
        if value < self.low {
            self.low - value
        } else if value > self.high {
            value - self.high
        } else {
            0.0
        }
    }

    /// Check the range is non-degenerate and lies inside `[min, max]`.
    pub(crate) fn validate(
        &self,
        field: &str,
        min: FloatValue,
        max: FloatValue,
    ) -> AlgaeResult<()> {
        if !(self.low.is_finite() && self.high.is_finite()) {
            return Err(AlgaeError::invalid(field, "finite bounds", self));
        }
        if self.low >= self.high {
            return Err(AlgaeError::invalid(field, "low < high", self));
        }
        if self.low < min || self.high > max {
            return Err(AlgaeError::invalid(field, format!("within [{min}, {max}]"), self));
        }
        Ok(())
    }
}

impl From<(FloatValue, FloatValue)> for OptimalRange {
    fn from((low, high): (FloatValue, FloatValue)) -> Self {
        Self::new(low, high)
    }
}

impl std::fmt::Display for OptimalRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

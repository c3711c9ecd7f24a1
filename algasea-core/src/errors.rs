use crate::FloatValue;
use thiserror::Error;

/// Error type for invalid inputs and undefined results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgaeError {
    #[error("Invalid parameter `{field}`: must be {constraint}, got {value}")]
    InvalidParameter {
        field: String,
        constraint: String,
        value: String,
    },
    #[error("Cost per tonne CO2 is undefined: CO2 removed is {co2_removed_tonnes_per_year} t/yr (total cost {total_cost_per_year} $/yr)")]
    UndefinedCost {
        co2_removed_tonnes_per_year: FloatValue,
        total_cost_per_year: FloatValue,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Unknown metric `{0}`")]
    UnknownMetric(String),
}

impl AlgaeError {
    pub(crate) fn invalid(
        field: impl Into<String>,
        constraint: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        AlgaeError::InvalidParameter {
            field: field.into(),
            constraint: constraint.into(),
            value: value.to_string(),
        }
    }

    pub(crate) fn configuration(e: impl std::fmt::Display) -> Self {
        AlgaeError::InvalidConfiguration(e.to_string())
    }
}

/// Convenience type for `Result<T, AlgaeError>`.
pub type AlgaeResult<T> = Result<T, AlgaeError>;

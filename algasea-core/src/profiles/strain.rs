//! Strain profile
//!
//! Biological traits of the engineered organism.

use super::range::OptimalRange;
use crate::errors::{AlgaeError, AlgaeResult};
use crate::validation::{positive, within};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Raw strain traits as entered by a user or read from a scenario file.
///
/// Nothing is checked until the parameters are turned into a
/// [`StrainProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrainParameters {
    /// Identifier for the strain. Must not be empty.
    pub name: String,

    /// Carbon content as a fraction of dry weight.
    /// range: 0.30 to 0.60
    pub carbon_content_fraction: FloatValue,

    /// Time for the population to double (hours).
    /// range: 6 to 72
    pub doubling_time_hours: FloatValue,

    /// Relative photosynthetic efficiency (dimensionless).
    /// range: 0.5 to 1.0
    pub photosynthetic_efficiency: FloatValue,

    /// Sinking velocity of dead cells and aggregates (m/day).
    /// range: 10 to 200
    pub sinking_rate_m_per_day: FloatValue,

    /// Share of production that sinks out of the surface layer.
    /// range: 0.10 to 0.80
    pub export_fraction: FloatValue,

    /// Temperature interval with unlimited growth (Celsius).
    /// Must lie within 10 to 40.
    pub optimal_temperature_range_c: OptimalRange,

    /// Salinity interval with unlimited growth (ppt).
    /// Must lie within 20 to 45.
    pub optimal_salinity_range_ppt: OptimalRange,
}

/// A validated, immutable strain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StrainParameters", into = "StrainParameters")]
pub struct StrainProfile {
    parameters: StrainParameters,
}

impl StrainProfile {
    /// Validate `parameters` and build a strain profile.
    pub fn new(parameters: StrainParameters) -> AlgaeResult<Self> {
        if parameters.name.trim().is_empty() {
            return Err(AlgaeError::invalid("name", "non-empty", "\"\""));
        }
        within(
            "carbon_content_fraction",
            parameters.carbon_content_fraction,
            0.30,
            0.60,
        )?;
        positive("doubling_time_hours", parameters.doubling_time_hours)?;
        within(
            "doubling_time_hours",
            parameters.doubling_time_hours,
            6.0,
            72.0,
        )?;
        within(
            "photosynthetic_efficiency",
            parameters.photosynthetic_efficiency,
            0.5,
            1.0,
        )?;
        positive("sinking_rate_m_per_day", parameters.sinking_rate_m_per_day)?;
        within(
            "sinking_rate_m_per_day",
            parameters.sinking_rate_m_per_day,
            10.0,
            200.0,
        )?;
        within("export_fraction", parameters.export_fraction, 0.10, 0.80)?;
        parameters
            .optimal_temperature_range_c
            .validate("optimal_temperature_range_c", 10.0, 40.0)?;
        parameters
            .optimal_salinity_range_ppt
            .validate("optimal_salinity_range_ppt", 20.0, 45.0)?;

        Ok(Self { parameters })
    }

    /// Build a profile from parameters known to be valid.
    ///
    /// Only used for the built-in reference scenarios, which are checked by
    /// the preset tests.
    pub(crate) fn new_unchecked(parameters: StrainParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &StrainParameters {
        &self.parameters
    }

    pub fn name(&self) -> &str {
        &self.parameters.name
    }

    pub fn carbon_content_fraction(&self) -> FloatValue {
        self.parameters.carbon_content_fraction
    }

    pub fn doubling_time_hours(&self) -> FloatValue {
        self.parameters.doubling_time_hours
    }

    pub fn photosynthetic_efficiency(&self) -> FloatValue {
        self.parameters.photosynthetic_efficiency
    }

    pub fn sinking_rate_m_per_day(&self) -> FloatValue {
        self.parameters.sinking_rate_m_per_day
    }

    pub fn export_fraction(&self) -> FloatValue {
        self.parameters.export_fraction
    }

    pub fn optimal_temperature_range_c(&self) -> OptimalRange {
        self.parameters.optimal_temperature_range_c
    }

    pub fn optimal_salinity_range_ppt(&self) -> OptimalRange {
        self.parameters.optimal_salinity_range_ppt
    }
}

impl TryFrom<StrainParameters> for StrainProfile {
    type Error = AlgaeError;

    fn try_from(parameters: StrainParameters) -> AlgaeResult<Self> {
        Self::new(parameters)
    }
}

impl From<StrainProfile> for StrainParameters {
    fn from(profile: StrainProfile) -> Self {
        profile.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    fn parameters() -> StrainParameters {
        presets::fast_growing_cyanobacteria().parameters().clone()
    }

    #[test]
    fn test_reference_strain_is_valid() {
        let strain = StrainProfile::new(parameters()).unwrap();
        assert_eq!(strain.name(), "Fast-growing Cyanobacteria");
        assert_eq!(strain.doubling_time_hours(), 12.0);
    }

    #[test]
    fn test_rejects_empty_name() {
        let mut params = parameters();
        params.name = "  ".to_string();
        let err = StrainProfile::new(params).unwrap_err();
        assert!(err.to_string().contains("`name`"));
    }

    #[test]
    fn test_rejects_zero_doubling_time() {
        let mut params = parameters();
        params.doubling_time_hours = 0.0;
        match StrainProfile::new(params).unwrap_err() {
            AlgaeError::InvalidParameter { field, .. } => {
                assert_eq!(field, "doubling_time_hours")
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_carbon_content_out_of_range() {
        let mut params = parameters();
        params.carbon_content_fraction = 45.0;
        assert!(StrainProfile::new(params).is_err());
    }

    #[test]
    fn test_rejects_inverted_temperature_range() {
        let mut params = parameters();
        params.optimal_temperature_range_c = OptimalRange::new(30.0, 20.0);
        match StrainProfile::new(params).unwrap_err() {
            AlgaeError::InvalidParameter {
                field, constraint, ..
            } => {
                assert_eq!(field, "optimal_temperature_range_c");
                assert_eq!(constraint, "low < high");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_deserialization_validates() {
        let mut params = parameters();
        params.export_fraction = 0.95;
        let json = serde_json::to_string(&params).unwrap();
        let result = serde_json::from_str::<StrainProfile>(&json);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization() {
        let strain = StrainProfile::new(parameters()).unwrap();
        let json = serde_json::to_string(&strain).expect("Serialization failed");
        let parsed: StrainProfile = serde_json::from_str(&json).expect("Deserialization failed");
        assert_eq!(strain, parsed);
    }
}

//! Environment profile
//!
//! Ocean conditions at the deployment site.

use crate::errors::{AlgaeError, AlgaeResult};
use crate::validation::{finite, non_negative, within};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Sequestration depth used when a scenario does not specify one (m).
pub const DEFAULT_SEQUESTRATION_DEPTH_M: FloatValue = 1000.0;

fn default_sequestration_depth() -> FloatValue {
    DEFAULT_SEQUESTRATION_DEPTH_M
}

/// Raw site conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentParameters {
    /// Depth of the sunlit layer (m).
    /// range: 20 to 150
    pub euphotic_depth_m: FloatValue,

    /// Sea surface temperature (Celsius). Any finite value is accepted.
    pub surface_temperature_c: FloatValue,

    /// Surface salinity (ppt).
    /// range: 20 to 45
    pub salinity_ppt: FloatValue,

    /// Dissolved inorganic nitrogen (umol/L).
    pub nitrogen_umol_per_l: FloatValue,

    /// Dissolved phosphate (umol/L).
    pub phosphorus_umol_per_l: FloatValue,

    /// Dissolved iron (nmol/L).
    pub iron_nmol_per_l: FloatValue,

    /// Depth of the surface mixed layer (m).
    /// range: 30 to 200
    pub mixing_depth_m: FloatValue,

    /// Surface current speed (m/s). Carried for dispersion estimates;
    /// none of the current formulas consume it.
    pub current_speed_m_per_s: FloatValue,

    /// Depth below which sunk carbon counts as durably removed (m).
    /// range: 500 to 3000
    /// default: 1000
    #[serde(default = "default_sequestration_depth")]
    pub sequestration_depth_m: FloatValue,
}

/// A validated, immutable set of site conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EnvironmentParameters", into = "EnvironmentParameters")]
pub struct EnvironmentProfile {
    parameters: EnvironmentParameters,
}

impl EnvironmentProfile {
    /// Validate `parameters` and build an environment profile.
    pub fn new(parameters: EnvironmentParameters) -> AlgaeResult<Self> {
        within("euphotic_depth_m", parameters.euphotic_depth_m, 20.0, 150.0)?;
        finite("surface_temperature_c", parameters.surface_temperature_c)?;
        within("salinity_ppt", parameters.salinity_ppt, 20.0, 45.0)?;
        non_negative("nitrogen_umol_per_l", parameters.nitrogen_umol_per_l)?;
        non_negative("phosphorus_umol_per_l", parameters.phosphorus_umol_per_l)?;
        non_negative("iron_nmol_per_l", parameters.iron_nmol_per_l)?;
        within("mixing_depth_m", parameters.mixing_depth_m, 30.0, 200.0)?;
        non_negative("current_speed_m_per_s", parameters.current_speed_m_per_s)?;
        within(
            "sequestration_depth_m",
            parameters.sequestration_depth_m,
            500.0,
            3000.0,
        )?;

        Ok(Self { parameters })
    }

    /// Build a profile from parameters known to be valid.
    ///
    /// Only used for the built-in reference scenarios, which are checked by
    /// the preset tests.
    pub(crate) fn new_unchecked(parameters: EnvironmentParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &EnvironmentParameters {
        &self.parameters
    }

    pub fn euphotic_depth_m(&self) -> FloatValue {
        self.parameters.euphotic_depth_m
    }

    pub fn surface_temperature_c(&self) -> FloatValue {
        self.parameters.surface_temperature_c
    }

    pub fn salinity_ppt(&self) -> FloatValue {
        self.parameters.salinity_ppt
    }

    pub fn nitrogen_umol_per_l(&self) -> FloatValue {
        self.parameters.nitrogen_umol_per_l
    }

    pub fn phosphorus_umol_per_l(&self) -> FloatValue {
        self.parameters.phosphorus_umol_per_l
    }

    pub fn iron_nmol_per_l(&self) -> FloatValue {
        self.parameters.iron_nmol_per_l
    }

    pub fn mixing_depth_m(&self) -> FloatValue {
        self.parameters.mixing_depth_m
    }

    pub fn current_speed_m_per_s(&self) -> FloatValue {
        self.parameters.current_speed_m_per_s
    }

    pub fn sequestration_depth_m(&self) -> FloatValue {
        self.parameters.sequestration_depth_m
    }
}

impl TryFrom<EnvironmentParameters> for EnvironmentProfile {
    type Error = AlgaeError;

    fn try_from(parameters: EnvironmentParameters) -> AlgaeResult<Self> {
        Self::new(parameters)
    }
}

impl From<EnvironmentProfile> for EnvironmentParameters {
    fn from(profile: EnvironmentProfile) -> Self {
        profile.parameters
    }
}

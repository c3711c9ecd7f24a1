//! Operation profile
//!
//! Scale and unit costs of a deployment.

use crate::errors::{AlgaeError, AlgaeResult};
use crate::validation::{at_least, non_negative, positive, within};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Raw deployment scale and cost inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationParameters {
    /// Seeded ocean area (km^2).
    /// range: 100 to 10000
    pub area_km2: FloatValue,

    /// Number of seeding events per year. At least 1.
    pub application_frequency_per_year: FloatValue,

    /// Cost to grow one kilogram of dry biomass ($/kg).
    pub cultivation_cost_per_kg: FloatValue,

    /// Cost to deliver one kilogram of biomass to site ($/kg).
    pub delivery_cost_per_kg: FloatValue,

    /// Day rate of the deployment vessel ($/day).
    pub vessel_cost_per_day: FloatValue,

    /// Monitoring, reporting and verification ($/yr).
    pub monitoring_cost_per_year: FloatValue,

    /// Permitting and compliance ($/yr).
    pub regulatory_cost_per_year: FloatValue,
}

/// A validated, immutable deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OperationParameters", into = "OperationParameters")]
pub struct OperationProfile {
    parameters: OperationParameters,
}

impl OperationProfile {
    /// Validate `parameters` and build an operation profile.
    pub fn new(parameters: OperationParameters) -> AlgaeResult<Self> {
        within("area_km2", parameters.area_km2, 100.0, 10_000.0)?;
        at_least(
            "application_frequency_per_year",
            parameters.application_frequency_per_year,
            1.0,
        )?;
        positive("cultivation_cost_per_kg", parameters.cultivation_cost_per_kg)?;
        positive("delivery_cost_per_kg", parameters.delivery_cost_per_kg)?;
        positive("vessel_cost_per_day", parameters.vessel_cost_per_day)?;
        non_negative("monitoring_cost_per_year", parameters.monitoring_cost_per_year)?;
        non_negative("regulatory_cost_per_year", parameters.regulatory_cost_per_year)?;

        Ok(Self { parameters })
    }

    /// Build a profile from parameters known to be valid.
    ///
    /// Only used for the built-in reference scenarios, which are checked by
    /// the preset tests.
    pub(crate) fn new_unchecked(parameters: OperationParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &OperationParameters {
        &self.parameters
    }

    pub fn area_km2(&self) -> FloatValue {
        self.parameters.area_km2
    }

    /// Seeded area in square metres.
    pub fn area_m2(&self) -> FloatValue {
        self.parameters.area_km2 * 1.0e6
    }

    pub fn application_frequency_per_year(&self) -> FloatValue {
        self.parameters.application_frequency_per_year
    }

    pub fn cultivation_cost_per_kg(&self) -> FloatValue {
        self.parameters.cultivation_cost_per_kg
    }

    pub fn delivery_cost_per_kg(&self) -> FloatValue {
        self.parameters.delivery_cost_per_kg
    }

    pub fn vessel_cost_per_day(&self) -> FloatValue {
        self.parameters.vessel_cost_per_day
    }

    pub fn monitoring_cost_per_year(&self) -> FloatValue {
        self.parameters.monitoring_cost_per_year
    }

    pub fn regulatory_cost_per_year(&self) -> FloatValue {
        self.parameters.regulatory_cost_per_year
    }
}

impl TryFrom<OperationParameters> for OperationProfile {
    type Error = AlgaeError;

    fn try_from(parameters: OperationParameters) -> AlgaeResult<Self> {
        Self::new(parameters)
    }
}

impl From<OperationProfile> for OperationParameters {
    fn from(profile: OperationProfile) -> Self {
        profile.parameters
    }
}

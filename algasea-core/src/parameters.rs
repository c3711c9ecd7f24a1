//! Engine parameters
//!
//! The fixed assumptions of the napkin model. Each field carries the value
//! used to reproduce the reference scenarios as its default, so an empty
//! configuration file gives the documented behaviour.

use crate::errors::{AlgaeError, AlgaeResult};
use crate::scoring::{ContinuousScoring, ScoringStrategy};
use crate::validation::{non_negative, positive};
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tolerance on the sum of the scoring weights.
const WEIGHT_SUM_TOLERANCE: FloatValue = 1e-6;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct WeightValues {
    cost: FloatValue,
    scale: FloatValue,
    safety: FloatValue,
}

/// Relative weights of the cost, scale and safety sub-scores.
///
/// Weights are non-negative and sum to 1.0, so a composite of sub-scores in
/// `[0, 1]` also lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WeightValues", into = "WeightValues")]
pub struct ScoringWeights {
    cost: FloatValue,
    scale: FloatValue,
    safety: FloatValue,
}

impl ScoringWeights {
    pub fn new(cost: FloatValue, scale: FloatValue, safety: FloatValue) -> AlgaeResult<Self> {
        non_negative("scoring_weights.cost", cost)?;
        non_negative("scoring_weights.scale", scale)?;
        non_negative("scoring_weights.safety", safety)?;

        let sum = cost + scale + safety;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AlgaeError::invalid(
                "scoring_weights",
                "weights summing to 1.0",
                format!("{cost} + {scale} + {safety} = {sum}"),
            ));
        }

        Ok(Self {
            cost,
            scale,
            safety,
        })
    }

    pub fn cost(&self) -> FloatValue {
        self.cost
    }

    pub fn scale(&self) -> FloatValue {
        self.scale
    }

    pub fn safety(&self) -> FloatValue {
        self.safety
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            cost: 0.4,
            scale: 0.4,
            safety: 0.2,
        }
    }
}

impl TryFrom<WeightValues> for ScoringWeights {
    type Error = AlgaeError;

    fn try_from(values: WeightValues) -> AlgaeResult<Self> {
        Self::new(values.cost, values.scale, values.safety)
    }
}

impl From<ScoringWeights> for WeightValues {
    fn from(weights: ScoringWeights) -> Self {
        Self {
            cost: weights.cost,
            scale: weights.scale,
            safety: weights.safety,
        }
    }
}

/// Parameters of the viability engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParameters {
    /// Carbon density of the standing algal stock in the mixed layer (g C/m^3).
    ///
    /// Sets both the productivity per unit growth rate and the amount of
    /// carbon that has to be seeded per application.
    ///
    /// default: 1.0
    pub biomass_density_g_per_m3: FloatValue,

    /// First-order loss rate of sinking organic carbon (day^-1).
    ///
    /// default: 0.10
    pub remineralization_rate_per_day: FloatValue,

    /// Mass of CO2 per unit mass of carbon (44/12).
    ///
    /// default: 3.67
    pub co2_to_carbon_ratio: FloatValue,

    /// Distance outside the optimal temperature range over which growth
    /// falls linearly to zero (Celsius). Zero means no growth anywhere
    /// outside the range.
    ///
    /// default: 0.0
    pub temperature_tolerance_c: FloatValue,

    /// Distance outside the optimal salinity range over which growth falls
    /// linearly to zero (ppt). Zero means no growth anywhere outside the
    /// range.
    ///
    /// default: 0.0
    pub salinity_tolerance_ppt: FloatValue,

    /// Michaelis-Menten half-saturation constant for nitrogen (umol/L).
    ///
    /// default: 1.0
    pub nitrogen_half_saturation_umol_per_l: FloatValue,

    /// Michaelis-Menten half-saturation constant for phosphorus (umol/L).
    ///
    /// default: 0.1
    pub phosphorus_half_saturation_umol_per_l: FloatValue,

    /// Michaelis-Menten half-saturation constant for iron (nmol/L).
    ///
    /// default: 0.025
    pub iron_half_saturation_nmol_per_l: FloatValue,

    /// Whether the strain carries a genetic kill switch.
    ///
    /// default: true
    pub genetic_kill_switch_present: bool,

    /// Weights of the cost, scale and safety sub-scores.
    ///
    /// default: 0.4 / 0.4 / 0.2
    pub scoring_weights: ScoringWeights,

    /// How cost and scale are mapped onto sub-scores.
    ///
    /// default: continuous
    pub scoring: Arc<dyn ScoringStrategy>,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            biomass_density_g_per_m3: 1.0,
            remineralization_rate_per_day: 0.10,
            co2_to_carbon_ratio: 3.67,
            temperature_tolerance_c: 0.0,
            salinity_tolerance_ppt: 0.0,
            nitrogen_half_saturation_umol_per_l: 1.0,
            phosphorus_half_saturation_umol_per_l: 0.1,
            iron_half_saturation_nmol_per_l: 0.025,
            genetic_kill_switch_present: true,
            scoring_weights: ScoringWeights::default(),
            scoring: Arc::new(ContinuousScoring::default()),
        }
    }
}

impl EngineParameters {
    /// Parse parameters from a TOML document and validate them.
    ///
    /// Missing keys fall back to their defaults. Malformed documents give
    /// [`AlgaeError::InvalidConfiguration`], out-of-range values give
    /// [`AlgaeError::InvalidParameter`].
    pub fn from_toml_str(source: &str) -> AlgaeResult<Self> {
        let table: toml::Table = toml::from_str(source).map_err(AlgaeError::configuration)?;
        Self::from_toml_table(table)
    }

    pub(crate) fn from_toml_table(mut table: toml::Table) -> AlgaeResult<Self> {
        // Weights are checked by their constructor so the error keeps its field
        let weights = table
            .remove("scoring_weights")
            .map(|value| value.try_into::<WeightValues>())
            .transpose()
            .map_err(AlgaeError::configuration)?;

        let mut parameters: Self = toml::Value::Table(table)
            .try_into()
            .map_err(AlgaeError::configuration)?;
        if let Some(weights) = weights {
            parameters.scoring_weights = ScoringWeights::try_from(weights)?;
        }
        parameters.validate()?;
        Ok(parameters)
    }

    pub fn to_toml_string(&self) -> AlgaeResult<String> {
        toml::to_string(self).map_err(AlgaeError::configuration)
    }

    /// Check that every constant is physically meaningful.
    pub fn validate(&self) -> AlgaeResult<()> {
        non_negative("biomass_density_g_per_m3", self.biomass_density_g_per_m3)?;
        non_negative(
            "remineralization_rate_per_day",
            self.remineralization_rate_per_day,
        )?;
        positive("co2_to_carbon_ratio", self.co2_to_carbon_ratio)?;
        non_negative("temperature_tolerance_c", self.temperature_tolerance_c)?;
        non_negative("salinity_tolerance_ppt", self.salinity_tolerance_ppt)?;
        non_negative(
            "nitrogen_half_saturation_umol_per_l",
            self.nitrogen_half_saturation_umol_per_l,
        )?;
        non_negative(
            "phosphorus_half_saturation_umol_per_l",
            self.phosphorus_half_saturation_umol_per_l,
        )?;
        non_negative(
            "iron_half_saturation_nmol_per_l",
            self.iron_half_saturation_nmol_per_l,
        )?;
        positive(
            "scoring.target_cost_per_tonne",
            self.scoring.target_cost_per_tonne(),
        )?;
        positive(
            "scoring.target_co2_removed_tonnes",
            self.scoring.target_co2_removed_tonnes(),
        )?;
        positive(
            "scoring.adequacy_target_co2_removed_tonnes",
            self.scoring.adequacy_target_co2_removed_tonnes(),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::BandedScoring;

    #[test]
    fn test_default_parameters() {
        let params = EngineParameters::default();
        assert!((params.biomass_density_g_per_m3 - 1.0).abs() < 1e-10);
        assert!((params.remineralization_rate_per_day - 0.10).abs() < 1e-10);
        assert!((params.co2_to_carbon_ratio - 3.67).abs() < 1e-10);
        assert!(params.genetic_kill_switch_present);
        assert_eq!(params.temperature_tolerance_c, 0.0);
        assert_eq!(params.salinity_tolerance_ppt, 0.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.cost(), 0.4);
        assert_eq!(weights.scale(), 0.4);
        assert_eq!(weights.safety(), 0.2);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        assert!(ScoringWeights::new(0.5, 0.5, 0.5).is_err());
        assert!(ScoringWeights::new(0.5, 0.3, 0.2).is_ok());
        assert!(ScoringWeights::new(1.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_weights_reject_negative() {
        let err = ScoringWeights::new(1.2, -0.4, 0.2).unwrap_err();
        assert!(err.to_string().contains("scoring_weights.scale"));
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let params = EngineParameters::from_toml_str("").unwrap();
        assert!((params.co2_to_carbon_ratio - 3.67).abs() < 1e-10);
        assert_eq!(params.scoring_weights, ScoringWeights::default());
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            remineralization_rate_per_day = 0.05
            genetic_kill_switch_present = false

            [scoring_weights]
            cost = 0.5
            scale = 0.3
            safety = 0.2

            [scoring]
            type = "banded"
            target_cost_per_tonne = 120.0
            target_co2_removed_tonnes = 5000.0
            bands = [
                { max_ratio = 0.5, score = 1.0 },
                { max_ratio = 1.0, score = 0.8 },
            ]
        "#;
        let params = EngineParameters::from_toml_str(toml).unwrap();
        assert!((params.remineralization_rate_per_day - 0.05).abs() < 1e-10);
        assert!(!params.genetic_kill_switch_present);
        assert_eq!(params.scoring_weights.cost(), 0.5);
        assert_eq!(params.scoring.target_cost_per_tonne(), 120.0);
        // 150 $/t is 1.25x the target, beyond the last configured band
        assert_eq!(params.scoring.cost_score(150.0), 0.0);
    }

    #[test]
    fn test_toml_rejects_bad_weights() {
        let toml = r#"
            [scoring_weights]
            cost = 0.6
            scale = 0.6
            safety = 0.2
        "#;
        match EngineParameters::from_toml_str(toml).unwrap_err() {
            AlgaeError::InvalidParameter { field, .. } => assert_eq!(field, "scoring_weights"),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_toml_rejects_out_of_range_constant() {
        match EngineParameters::from_toml_str("co2_to_carbon_ratio = -1.0").unwrap_err() {
            AlgaeError::InvalidParameter { field, .. } => {
                assert_eq!(field, "co2_to_carbon_ratio")
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_toml_rejects_zero_adequacy_target() {
        let toml = "[scoring]\ntype = \"continuous\"\nadequacy_target_co2_removed_tonnes = 0.0\n";
        match EngineParameters::from_toml_str(toml).unwrap_err() {
            AlgaeError::InvalidParameter { field, .. } => {
                assert_eq!(field, "scoring.adequacy_target_co2_removed_tonnes")
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        for source in [
            "remineralization_rate_per_day = ",
            "remineralization_rate_per_day = \"fast\"",
            "scoring_weights = 0.4",
            "[scoring]\ntype = \"stepped\"",
        ] {
            let err = EngineParameters::from_toml_str(source).unwrap_err();
            assert!(
                matches!(err, AlgaeError::InvalidConfiguration(_)),
                "{source}: {err:?}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let params = EngineParameters {
            remineralization_rate_per_day: -0.1,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let params = EngineParameters {
            scoring: Arc::new(BandedScoring::default()),
            ..Default::default()
        };
        let toml = params.to_toml_string().unwrap();
        let parsed = EngineParameters::from_toml_str(&toml).unwrap();
        assert_eq!(
            parsed.scoring.target_cost_per_tonne(),
            params.scoring.target_cost_per_tonne()
        );
        assert!((parsed.iron_half_saturation_nmol_per_l - 0.025).abs() < 1e-12);
    }
}

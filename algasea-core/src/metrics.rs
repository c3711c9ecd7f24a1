//! Engine output
//!
//! An evaluation is produced as a tree of typed stage results
//! ([`Evaluation`]) and flattened into an ordered name → value mapping
//! ([`MetricsResult`]) for consumers that only deal in named numbers.
//!
//! Metric names are camelCase and listed in [`METRIC_NAMES`] in the order
//! they appear in every [`MetricsResult`].

use crate::carbon::{Productivity, Sequestration};
use crate::cost::CostBreakdown;
use crate::errors::{AlgaeError, AlgaeResult};
use crate::limitation::Limitations;
use crate::scoring::ScoreBreakdown;
use crate::FloatValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const METRIC_BASE_GROWTH_RATE: &str = "baseGrowthRate";
pub const METRIC_TEMP_FACTOR: &str = "tempFactor";
pub const METRIC_LIGHT_FACTOR: &str = "lightFactor";
pub const METRIC_NUTRIENT_FACTOR: &str = "nutrientFactor";
pub const METRIC_NITROGEN_FACTOR: &str = "nitrogenFactor";
pub const METRIC_PHOSPHORUS_FACTOR: &str = "phosphorusFactor";
pub const METRIC_IRON_FACTOR: &str = "ironFactor";
pub const METRIC_SALINITY_FACTOR: &str = "salinityFactor";
pub const METRIC_EFFECTIVE_GROWTH_RATE: &str = "effectiveGrowthRate";
pub const METRIC_NPP: &str = "nppGPerM2PerYear";
pub const METRIC_SINKING_TIME: &str = "sinkingTimeDays";
pub const METRIC_SURVIVAL_FRACTION: &str = "survivalFraction";
pub const METRIC_CARBON_EXPORTED: &str = "carbonExportedTonnesPerYear";
pub const METRIC_CARBON_SEQUESTERED: &str = "carbonSequesteredTonnesPerYear";
pub const METRIC_CO2_REMOVED: &str = "co2RemovedTonnesPerYear";
pub const METRIC_BIOMASS_REQUIRED: &str = "biomassRequiredKg";
pub const METRIC_CULTIVATION_COST: &str = "cultivationCostPerYear";
pub const METRIC_DELIVERY_COST: &str = "deliveryCostPerYear";
pub const METRIC_VESSEL_COST: &str = "vesselCostPerYear";
pub const METRIC_MONITORING_COST: &str = "monitoringCostPerYear";
pub const METRIC_REGULATORY_COST: &str = "regulatoryCostPerYear";
pub const METRIC_TOTAL_COST: &str = "totalCostPerYear";
pub const METRIC_COST_PER_TONNE: &str = "costPerTonneCo2";
pub const METRIC_COST_SCORE: &str = "costScore";
pub const METRIC_SCALE_SCORE: &str = "scaleScore";
pub const METRIC_SAFETY_SCORE: &str = "safetyScore";
pub const METRIC_VIABILITY_SCORE: &str = "viabilityScore";
pub const METRIC_COST_COMPETITIVENESS: &str = "costCompetitiveness";
pub const METRIC_SCALE_ADEQUACY: &str = "scaleAdequacy";

/// Every metric name, in output order.
pub const METRIC_NAMES: [&str; 29] = [
    METRIC_BASE_GROWTH_RATE,
    METRIC_TEMP_FACTOR,
    METRIC_LIGHT_FACTOR,
    METRIC_NUTRIENT_FACTOR,
    METRIC_NITROGEN_FACTOR,
    METRIC_PHOSPHORUS_FACTOR,
    METRIC_IRON_FACTOR,
    METRIC_SALINITY_FACTOR,
    METRIC_EFFECTIVE_GROWTH_RATE,
    METRIC_NPP,
    METRIC_SINKING_TIME,
    METRIC_SURVIVAL_FRACTION,
    METRIC_CARBON_EXPORTED,
    METRIC_CARBON_SEQUESTERED,
    METRIC_CO2_REMOVED,
    METRIC_BIOMASS_REQUIRED,
    METRIC_CULTIVATION_COST,
    METRIC_DELIVERY_COST,
    METRIC_VESSEL_COST,
    METRIC_MONITORING_COST,
    METRIC_REGULATORY_COST,
    METRIC_TOTAL_COST,
    METRIC_COST_PER_TONNE,
    METRIC_COST_SCORE,
    METRIC_SCALE_SCORE,
    METRIC_SAFETY_SCORE,
    METRIC_VIABILITY_SCORE,
    METRIC_COST_COMPETITIVENESS,
    METRIC_SCALE_ADEQUACY,
];

pub fn is_known_metric(name: &str) -> bool {
    METRIC_NAMES.contains(&name)
}

/// Typed result of one successful evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub limitations: Limitations,
    pub productivity: Productivity,
    pub sequestration: Sequestration,
    pub costs: CostBreakdown,
    /// Total annual cost per tonne of CO2 removed ($/t).
    pub cost_per_tonne_co2: FloatValue,
    pub scores: ScoreBreakdown,
}

impl Evaluation {
    pub fn metrics(&self) -> MetricsResult {
        MetricsResult::from(self)
    }
}

/// Flat, ordered mapping of metric name to value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricsResult {
    values: IndexMap<String, FloatValue>,
}

impl MetricsResult {
    pub fn get(&self, name: &str) -> Option<FloatValue> {
        self.values.get(name).copied()
    }

    /// Look up a metric, failing with [`AlgaeError::UnknownMetric`] if absent.
    pub fn require(&self, name: &str) -> AlgaeResult<FloatValue> {
        self.get(name)
            .ok_or_else(|| AlgaeError::UnknownMetric(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FloatValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &IndexMap<String, FloatValue> {
        &self.values
    }

    pub fn into_map(self) -> IndexMap<String, FloatValue> {
        self.values
    }

    // Typed accessors. NaN only for a map deserialized without the key.

    pub fn effective_growth_rate(&self) -> FloatValue {
        self.get(METRIC_EFFECTIVE_GROWTH_RATE).unwrap_or(FloatValue::NAN)
    }

    pub fn npp_g_per_m2_per_year(&self) -> FloatValue {
        self.get(METRIC_NPP).unwrap_or(FloatValue::NAN)
    }

    pub fn co2_removed_tonnes_per_year(&self) -> FloatValue {
        self.get(METRIC_CO2_REMOVED).unwrap_or(FloatValue::NAN)
    }

    pub fn total_cost_per_year(&self) -> FloatValue {
        self.get(METRIC_TOTAL_COST).unwrap_or(FloatValue::NAN)
    }

    pub fn cost_per_tonne_co2(&self) -> FloatValue {
        self.get(METRIC_COST_PER_TONNE).unwrap_or(FloatValue::NAN)
    }

    pub fn viability_score(&self) -> FloatValue {
        self.get(METRIC_VIABILITY_SCORE).unwrap_or(FloatValue::NAN)
    }
}

impl From<&Evaluation> for MetricsResult {
    fn from(evaluation: &Evaluation) -> Self {
        let Evaluation {
            limitations,
            productivity,
            sequestration,
            costs,
            cost_per_tonne_co2,
            scores,
        } = evaluation;

        let values: [FloatValue; 29] = [
            productivity.base_growth_rate,
            limitations.temperature,
            limitations.light,
            limitations.nutrient,
            limitations.nitrogen,
            limitations.phosphorus,
            limitations.iron,
            limitations.salinity,
            productivity.effective_growth_rate,
            productivity.npp_g_per_m2_per_year,
            sequestration.sinking_time_days,
            sequestration.survival_fraction,
            sequestration.carbon_exported_tonnes_per_year,
            sequestration.carbon_sequestered_tonnes_per_year,
            sequestration.co2_removed_tonnes_per_year,
            costs.biomass_required_kg,
            costs.cultivation,
            costs.delivery,
            costs.vessel,
            costs.monitoring,
            costs.regulatory,
            costs.total,
            *cost_per_tonne_co2,
            scores.cost_score,
            scores.scale_score,
            scores.safety_score,
            scores.viability_score,
            scores.cost_competitiveness,
            scores.scale_adequacy,
        ];

        Self {
            values: METRIC_NAMES
                .iter()
                .zip(values)
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }
}

impl From<Evaluation> for MetricsResult {
    fn from(evaluation: Evaluation) -> Self {
        Self::from(&evaluation)
    }
}

//! Viability scoring
//!
//! Maps cost per tonne and annual removal onto sub-scores in `[0, 1]` and
//! combines them with [`ScoringWeights`] into a single viability score.
//!
//! Two strategies are provided:
//! - [`ContinuousScoring`]: linear decay of the cost score over a cost band.
//! - [`BandedScoring`]: step-wise cost score from the ratio to a target cost.
//!
//! Both share the same linear, saturating scale score. Strategies are
//! serialized through `typetag` so a configuration file can pick one by name.
//!
//! Every sub-score is clamped to `[0, 1]` before weighting, whatever the
//! strategy returns. With weights summing to one the composite therefore
//! always lies in `[0, 1]`.

use crate::parameters::ScoringWeights;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Safety sub-score for a strain with a genetic kill switch.
pub const SAFETY_SCORE_CONTAINED: FloatValue = 1.0;

/// Safety sub-score for a strain without a genetic kill switch.
pub const SAFETY_SCORE_UNCONTAINED: FloatValue = 0.5;

/// Maps economic and scale outcomes onto sub-scores.
#[typetag::serde(tag = "type")]
pub trait ScoringStrategy: std::fmt::Debug + Send + Sync {
    /// Cost sub-score for a cost per tonne of CO2 ($/t). Higher is better.
    fn cost_score(&self, cost_per_tonne: FloatValue) -> FloatValue;

    /// Scale sub-score for an annual removal (t CO2/yr). Higher is better.
    fn scale_score(&self, co2_removed_tonnes: FloatValue) -> FloatValue {
        co2_removed_tonnes / self.target_co2_removed_tonnes()
    }

    /// Cost per tonne considered competitive with other removal methods ($/t).
    fn target_cost_per_tonne(&self) -> FloatValue;

    /// Annual removal considered a meaningful scale (t CO2/yr).
    fn target_co2_removed_tonnes(&self) -> FloatValue;

    /// Annual removal that the `scale_adequacy` diagnostic is measured against
    /// (t CO2/yr). Independent of the scale score target.
    fn adequacy_target_co2_removed_tonnes(&self) -> FloatValue;
}

/// Continuous cost scoring.
///
/// $$ S_{cost} = 1 - \frac{C - C_{ref}}{C_{span}} $$
///
/// clamped to `[0, 1]`: 1.0 at or below the reference cost, 0.0 at or above
/// `reference + span`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuousScoring {
    /// Cost at which the cost score starts to fall ($/t CO2).
    /// default: 50.0
    pub reference_cost_per_tonne: FloatValue,

    /// Width of the band over which the cost score falls to zero ($/t CO2).
    /// default: 200.0
    pub cost_span_per_tonne: FloatValue,

    /// default: 100.0
    pub target_cost_per_tonne: FloatValue,

    /// Removal that earns the full scale score (t CO2/yr).
    /// default: 10000.0
    pub target_co2_removed_tonnes: FloatValue,

    /// default: 1000.0
    pub adequacy_target_co2_removed_tonnes: FloatValue,
}

impl Default for ContinuousScoring {
    fn default() -> Self {
        Self {
            reference_cost_per_tonne: 50.0,
            cost_span_per_tonne: 200.0,
            target_cost_per_tonne: 100.0,
            target_co2_removed_tonnes: 10_000.0,
            adequacy_target_co2_removed_tonnes: 1_000.0,
        }
    }
}

#[typetag::serde(name = "continuous")]
impl ScoringStrategy for ContinuousScoring {
    fn cost_score(&self, cost_per_tonne: FloatValue) -> FloatValue {
        if self.cost_span_per_tonne <= 0.0 {
            return if cost_per_tonne <= self.reference_cost_per_tonne {
                1.0
            } else {
                0.0
            };
        }
        1.0 - (cost_per_tonne - self.reference_cost_per_tonne) / self.cost_span_per_tonne
    }

    fn target_cost_per_tonne(&self) -> FloatValue {
        self.target_cost_per_tonne
    }

    fn target_co2_removed_tonnes(&self) -> FloatValue {
        self.target_co2_removed_tonnes
    }

    fn adequacy_target_co2_removed_tonnes(&self) -> FloatValue {
        self.adequacy_target_co2_removed_tonnes
    }
}

/// One step of a banded cost score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBand {
    /// Upper bound (inclusive) on `cost / target_cost`.
    pub max_ratio: FloatValue,
    pub score: FloatValue,
}

/// Threshold-banded cost scoring.
///
/// The cost score is the score of the first band whose `max_ratio` is at
/// least `cost / target_cost`, or 0.0 beyond the last band. The default bands
/// are:
///
/// | cost / target | score |
/// |---------------|-------|
/// | <= 0.5        | 1.0   |
/// | <= 1.0        | 0.8   |
/// | <= 1.5        | 0.4   |
/// | <= 3.0        | 0.1   |
/// | > 3.0         | 0.0   |
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BandedScoring {
    /// default: 100.0
    pub target_cost_per_tonne: FloatValue,

    /// default: 10000.0
    pub target_co2_removed_tonnes: FloatValue,

    /// default: 1000.0
    pub adequacy_target_co2_removed_tonnes: FloatValue,

    /// Bands in increasing order of `max_ratio`.
    pub bands: Vec<CostBand>,
}

impl Default for BandedScoring {
    fn default() -> Self {
        Self {
            target_cost_per_tonne: 100.0,
            target_co2_removed_tonnes: 10_000.0,
            adequacy_target_co2_removed_tonnes: 1_000.0,
            bands: vec![
                CostBand {
                    max_ratio: 0.5,
                    score: 1.0,
                },
                CostBand {
                    max_ratio: 1.0,
                    score: 0.8,
                },
                CostBand {
                    max_ratio: 1.5,
                    score: 0.4,
                },
                CostBand {
                    max_ratio: 3.0,
                    score: 0.1,
                },
            ],
        }
    }
}

#[typetag::serde(name = "banded")]
impl ScoringStrategy for BandedScoring {
    fn cost_score(&self, cost_per_tonne: FloatValue) -> FloatValue {
        let ratio = cost_per_tonne / self.target_cost_per_tonne;
        self.bands
            .iter()
            .find(|band| ratio <= band.max_ratio)
            .map(|band| band.score)
            .unwrap_or(0.0)
    }

    fn target_cost_per_tonne(&self) -> FloatValue {
        self.target_cost_per_tonne
    }

    fn target_co2_removed_tonnes(&self) -> FloatValue {
        self.target_co2_removed_tonnes
    }

    fn adequacy_target_co2_removed_tonnes(&self) -> FloatValue {
        self.adequacy_target_co2_removed_tonnes
    }
}

/// Sub-scores, composite score and unclamped diagnostic ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub cost_score: FloatValue,
    pub scale_score: FloatValue,
    pub safety_score: FloatValue,
    pub viability_score: FloatValue,
    /// Target cost divided by achieved cost. Above 1.0 beats the target.
    pub cost_competitiveness: FloatValue,
    /// Achieved removal divided by the adequacy target removal.
    pub scale_adequacy: FloatValue,
}

/// Clamp to `[0, 1]`, sending NaN to 0.
fn unit_interval(value: FloatValue) -> FloatValue {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

pub fn safety_score(genetic_kill_switch_present: bool) -> FloatValue {
    if genetic_kill_switch_present {
        SAFETY_SCORE_CONTAINED
    } else {
        SAFETY_SCORE_UNCONTAINED
    }
}

/// Score a scenario with a defined, positive cost per tonne.
pub fn score(
    strategy: &dyn ScoringStrategy,
    weights: &ScoringWeights,
    genetic_kill_switch_present: bool,
    cost_per_tonne: FloatValue,
    co2_removed_tonnes: FloatValue,
) -> ScoreBreakdown {
    let cost_score = unit_interval(strategy.cost_score(cost_per_tonne));
    let scale_score = unit_interval(strategy.scale_score(co2_removed_tonnes));
    let safety_score = unit_interval(safety_score(genetic_kill_switch_present));

    let viability_score = unit_interval(
        weights.cost() * cost_score
            + weights.scale() * scale_score
            + weights.safety() * safety_score,
    );

    ScoreBreakdown {
        cost_score,
        scale_score,
        safety_score,
        viability_score,
        cost_competitiveness: strategy.target_cost_per_tonne() / cost_per_tonne,
        scale_adequacy: co2_removed_tonnes / strategy.adequacy_target_co2_removed_tonnes(),
    }
}

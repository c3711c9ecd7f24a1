//! Viability engine
//!
//! Runs the forward pipeline for one scenario:
//!
//! limitation factors → productivity → export and survival → cost → score
//!
//! The engine holds only [`EngineParameters`] and never mutates them, so a
//! single engine can be shared by reference across threads. Every stage is
//! also exposed on its own so that intermediate values can be inspected when
//! the full evaluation fails.

use crate::carbon::{self, Productivity, Sequestration};
use crate::cost::{self, CostBreakdown};
use crate::errors::AlgaeResult;
use crate::limitation::{self, Limitations};
use crate::metrics::{Evaluation, MetricsResult};
use crate::parameters::{EngineParameters, ScoringWeights};
use crate::profiles::{EnvironmentProfile, OperationProfile, StrainProfile};
use crate::scoring;
use log::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct ViabilityEngine {
    parameters: EngineParameters,
}

impl ViabilityEngine {
    /// An engine with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `parameters` and build an engine around them.
    pub fn from_parameters(parameters: EngineParameters) -> AlgaeResult<Self> {
        parameters.validate()?;
        Ok(Self { parameters })
    }

    /// Replace the scoring weights, keeping every other parameter.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.parameters.scoring_weights = weights;
        self
    }

    pub fn parameters(&self) -> &EngineParameters {
        &self.parameters
    }

    pub fn limitations(
        &self,
        strain: &StrainProfile,
        environment: &EnvironmentProfile,
    ) -> Limitations {
        limitation::limitations(strain, environment, &self.parameters)
    }

    pub fn productivity(
        &self,
        strain: &StrainProfile,
        environment: &EnvironmentProfile,
    ) -> Productivity {
        let limitations = self.limitations(strain, environment);
        carbon::productivity(strain, environment, &limitations, &self.parameters)
    }

    pub fn sequestration(
        &self,
        strain: &StrainProfile,
        environment: &EnvironmentProfile,
        operation: &OperationProfile,
    ) -> Sequestration {
        let productivity = self.productivity(strain, environment);
        carbon::sequestration(
            strain,
            environment,
            operation,
            &productivity,
            &self.parameters,
        )
    }

    pub fn costs(
        &self,
        strain: &StrainProfile,
        environment: &EnvironmentProfile,
        operation: &OperationProfile,
    ) -> CostBreakdown {
        cost::cost_breakdown(strain, environment, operation, &self.parameters)
    }

    /// Run the full pipeline and keep every stage result.
    ///
    /// Fails with [`AlgaeError::UndefinedCost`](crate::errors::AlgaeError::UndefinedCost)
    /// when the scenario removes no CO2.
    pub fn assess(
        &self,
        strain: &StrainProfile,
        environment: &EnvironmentProfile,
        operation: &OperationProfile,
    ) -> AlgaeResult<Evaluation> {
        let limitations = self.limitations(strain, environment);
        debug!(
            "{}: limitation factors temperature={:.4} light={:.4} nutrient={:.4} salinity={:.4}",
            strain.name(),
            limitations.temperature,
            limitations.light,
            limitations.nutrient,
            limitations.salinity
        );

        let productivity =
            carbon::productivity(strain, environment, &limitations, &self.parameters);
        debug!(
            "{}: effective growth {:.4}/day, NPP {:.2} g C/m^2/yr",
            strain.name(),
            productivity.effective_growth_rate,
            productivity.npp_g_per_m2_per_year
        );

        let sequestration = carbon::sequestration(
            strain,
            environment,
            operation,
            &productivity,
            &self.parameters,
        );
        debug!(
            "{}: survival {:.4}, CO2 removed {:.2} t/yr",
            strain.name(),
            sequestration.survival_fraction,
            sequestration.co2_removed_tonnes_per_year
        );

        let costs = self.costs(strain, environment, operation);
        debug!(
            "{}: biomass {:.3e} kg/yr, total cost {:.2} $/yr",
            strain.name(),
            costs.biomass_required_kg,
            costs.total
        );

        let cost_per_tonne_co2 =
            cost::cost_per_tonne(costs.total, sequestration.co2_removed_tonnes_per_year)
                .inspect_err(|_| {
                    warn!(
                        "{}: no CO2 removed at this site, cost per tonne is undefined",
                        strain.name()
                    )
                })?;

        let scores = scoring::score(
            self.parameters.scoring.as_ref(),
            &self.parameters.scoring_weights,
            self.parameters.genetic_kill_switch_present,
            cost_per_tonne_co2,
            sequestration.co2_removed_tonnes_per_year,
        );
        debug!(
            "{}: cost {:.2} $/t, viability score {:.3}",
            strain.name(),
            cost_per_tonne_co2,
            scores.viability_score
        );

        Ok(Evaluation {
            limitations,
            productivity,
            sequestration,
            costs,
            cost_per_tonne_co2,
            scores,
        })
    }

    /// Run the full pipeline and flatten the result into named metrics.
    pub fn evaluate(
        &self,
        strain: &StrainProfile,
        environment: &EnvironmentProfile,
        operation: &OperationProfile,
    ) -> AlgaeResult<MetricsResult> {
        self.assess(strain, environment, operation)
            .map(MetricsResult::from)
    }
}

/// Evaluate a scenario with the default engine parameters.
///
/// `weights` overrides the default scoring weights when given.
pub fn evaluate(
    strain: &StrainProfile,
    environment: &EnvironmentProfile,
    operation: &OperationProfile,
    weights: Option<ScoringWeights>,
) -> AlgaeResult<MetricsResult> {
    let engine = match weights {
        Some(weights) => ViabilityEngine::new().with_weights(weights),
        None => ViabilityEngine::new(),
    };
    engine.evaluate(strain, environment, operation)
}

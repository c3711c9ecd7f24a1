//! Sensitivity sweeps
//!
//! A sweep takes a base scenario and evaluates it once per value of a single
//! input. Each variant is rebuilt through the validating constructors, so a
//! value outside a documented range shows up as a failed point rather than
//! an out-of-range evaluation.
//!
//! Points are independent and can be evaluated in parallel with
//! [`Sweep::run_parallel`]. Results are always returned in input order.

use crate::engine::ViabilityEngine;
use crate::errors::{AlgaeError, AlgaeResult};
use crate::metrics::{is_known_metric, MetricsResult};
use crate::profiles::{EnvironmentProfile, OperationProfile, StrainProfile};
use crate::FloatValue;
use indexmap::IndexMap;
use log::{info, warn};
use ndarray::Array1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scenario input varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    DoublingTimeHours,
    CarbonContentFraction,
    SinkingRateMPerDay,
    ExportFraction,
    SurfaceTemperatureC,
    SequestrationDepthM,
    AreaKm2,
    ApplicationFrequencyPerYear,
}

impl SweepParameter {
    pub const ALL: [SweepParameter; 8] = [
        SweepParameter::DoublingTimeHours,
        SweepParameter::CarbonContentFraction,
        SweepParameter::SinkingRateMPerDay,
        SweepParameter::ExportFraction,
        SweepParameter::SurfaceTemperatureC,
        SweepParameter::SequestrationDepthM,
        SweepParameter::AreaKm2,
        SweepParameter::ApplicationFrequencyPerYear,
    ];

    /// Field name of the parameter in its profile.
    pub fn name(&self) -> &'static str {
        match self {
            SweepParameter::DoublingTimeHours => "doubling_time_hours",
            SweepParameter::CarbonContentFraction => "carbon_content_fraction",
            SweepParameter::SinkingRateMPerDay => "sinking_rate_m_per_day",
            SweepParameter::ExportFraction => "export_fraction",
            SweepParameter::SurfaceTemperatureC => "surface_temperature_c",
            SweepParameter::SequestrationDepthM => "sequestration_depth_m",
            SweepParameter::AreaKm2 => "area_km2",
            SweepParameter::ApplicationFrequencyPerYear => "application_frequency_per_year",
        }
    }

    pub fn from_name(name: &str) -> AlgaeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| {
                AlgaeError::InvalidConfiguration(format!("Unknown sweep parameter `{name}`"))
            })
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One evaluated value of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub value: FloatValue,
    pub outcome: AlgaeResult<MetricsResult>,
}

/// A one-at-a-time sensitivity sweep around a base scenario.
#[derive(Debug, Clone)]
pub struct Sweep {
    strain: StrainProfile,
    environment: EnvironmentProfile,
    operation: OperationProfile,
    parameter: SweepParameter,
    values: Vec<FloatValue>,
}

impl Sweep {
    pub fn new(
        strain: StrainProfile,
        environment: EnvironmentProfile,
        operation: OperationProfile,
        parameter: SweepParameter,
        values: Vec<FloatValue>,
    ) -> Self {
        Self {
            strain,
            environment,
            operation,
            parameter,
            values,
        }
    }

    pub fn parameter(&self) -> SweepParameter {
        self.parameter
    }

    pub fn values(&self) -> &[FloatValue] {
        &self.values
    }

    /// Rebuild the base scenario with the swept input set to `value`.
    fn variant(
        &self,
        value: FloatValue,
    ) -> AlgaeResult<(StrainProfile, EnvironmentProfile, OperationProfile)> {
        let mut strain = self.strain.parameters().clone();
        let mut environment = self.environment.parameters().clone();
        let mut operation = self.operation.parameters().clone();

        match self.parameter {
            SweepParameter::DoublingTimeHours => strain.doubling_time_hours = value,
            SweepParameter::CarbonContentFraction => strain.carbon_content_fraction = value,
            SweepParameter::SinkingRateMPerDay => strain.sinking_rate_m_per_day = value,
            SweepParameter::ExportFraction => strain.export_fraction = value,
            SweepParameter::SurfaceTemperatureC => environment.surface_temperature_c = value,
            SweepParameter::SequestrationDepthM => environment.sequestration_depth_m = value,
            SweepParameter::AreaKm2 => operation.area_km2 = value,
            SweepParameter::ApplicationFrequencyPerYear => {
                operation.application_frequency_per_year = value
            }
        }

        Ok((
            StrainProfile::new(strain)?,
            EnvironmentProfile::new(environment)?,
            OperationProfile::new(operation)?,
        ))
    }

    fn evaluate_point(&self, engine: &ViabilityEngine, value: FloatValue) -> SweepPoint {
        let outcome = self.variant(value).and_then(|(strain, environment, operation)| {
            engine.evaluate(&strain, &environment, &operation)
        });
        if let Err(e) = &outcome {
            warn!("Sweep of {} failed at {}: {}", self.parameter, value, e);
        }
        SweepPoint { value, outcome }
    }

    /// Evaluate every value in order on the calling thread.
    pub fn run(&self, engine: &ViabilityEngine) -> SweepResults {
        let points = self
            .values
            .iter()
            .map(|&value| self.evaluate_point(engine, value))
            .collect();
        self.finish(points)
    }

    /// Evaluate every value on the rayon thread pool.
    ///
    /// Produces the same results as [`Sweep::run`].
    pub fn run_parallel(&self, engine: &ViabilityEngine) -> SweepResults {
        let points = self
            .values
            .par_iter()
            .map(|&value| self.evaluate_point(engine, value))
            .collect();
        self.finish(points)
    }

    fn finish(&self, points: Vec<SweepPoint>) -> SweepResults {
        let results = SweepResults {
            parameter: self.parameter,
            points,
        };
        info!(
            "Sweep of {} complete: {} of {} points evaluated",
            self.parameter,
            results.n_succeeded(),
            results.len()
        );
        results
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepResults {
    parameter: SweepParameter,
    points: Vec<SweepPoint>,
}

impl SweepResults {
    pub fn parameter(&self) -> SweepParameter {
        self.parameter
    }

    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn n_succeeded(&self) -> usize {
        self.points.iter().filter(|p| p.outcome.is_ok()).count()
    }

    /// The swept values, in input order.
    pub fn values(&self) -> Array1<FloatValue> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// One metric across the sweep, NaN where a point failed.
    pub fn metric(&self, name: &str) -> AlgaeResult<Array1<FloatValue>> {
        if !is_known_metric(name) {
            return Err(AlgaeError::UnknownMetric(name.to_string()));
        }
        Ok(self
            .points
            .iter()
            .map(|p| match &p.outcome {
                Ok(metrics) => metrics.get(name).unwrap_or(FloatValue::NAN),
                Err(_) => FloatValue::NAN,
            })
            .collect())
    }

    /// Every metric across the sweep, keyed by metric name.
    pub fn columns(&self) -> IndexMap<String, Array1<FloatValue>> {
        crate::metrics::METRIC_NAMES
            .iter()
            .filter_map(|&name| {
                self.metric(name)
                    .ok()
                    .map(|column| (name.to_string(), column))
            })
            .collect()
    }
}

/// Evaluate several strains against one site and deployment.
///
/// Results are keyed by strain name in input order.
pub fn compare_strains(
    engine: &ViabilityEngine,
    strains: &[StrainProfile],
    environment: &EnvironmentProfile,
    operation: &OperationProfile,
) -> IndexMap<String, AlgaeResult<MetricsResult>> {
    strains
        .iter()
        .map(|strain| {
            (
                strain.name().to_string(),
                engine.evaluate(strain, environment, operation),
            )
        })
        .collect()
}

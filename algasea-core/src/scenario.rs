//! Scenario files
//!
//! A scenario bundles the inputs of one evaluation so it can be stored and
//! shared as a single TOML document:
//!
//! ```toml
//! [strain]
//! name = "Fast-growing Cyanobacteria"
//! carbon_content_fraction = 0.45
//! # ...
//!
//! [environment]
//! euphotic_depth_m = 80.0
//! # ...
//!
//! [operation]
//! area_km2 = 1000.0
//! # ...
//!
//! # Optional, defaults apply to anything left out
//! [engine]
//! remineralization_rate_per_day = 0.05
//! ```
//!
//! Every profile is validated while the document is parsed.

use crate::engine::ViabilityEngine;
use crate::errors::{AlgaeError, AlgaeResult};
use crate::metrics::{Evaluation, MetricsResult};
use crate::parameters::EngineParameters;
use crate::presets;
use crate::profiles::{
    EnvironmentParameters, EnvironmentProfile, OperationParameters, OperationProfile,
    StrainParameters, StrainProfile,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Remove a required section and deserialize its raw parameters.
fn take_section<T: DeserializeOwned>(table: &mut toml::Table, name: &str) -> AlgaeResult<T> {
    table
        .remove(name)
        .ok_or_else(|| AlgaeError::InvalidConfiguration(format!("Missing `[{name}]` section")))?
        .try_into()
        .map_err(AlgaeError::configuration)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub strain: StrainProfile,
    pub environment: EnvironmentProfile,
    pub operation: OperationProfile,
    #[serde(default)]
    pub engine: EngineParameters,
}

impl Scenario {
    pub fn new(
        strain: StrainProfile,
        environment: EnvironmentProfile,
        operation: OperationProfile,
    ) -> Self {
        Self {
            strain,
            environment,
            operation,
            engine: EngineParameters::default(),
        }
    }

    /// Fast-growing cyanobacteria in a tropical ocean at the reference scale.
    pub fn reference() -> Self {
        Self::new(
            presets::fast_growing_cyanobacteria(),
            presets::tropical_ocean(),
            presets::reference_operation(),
        )
    }

    pub fn from_toml_str(source: &str) -> AlgaeResult<Self> {
        let mut table: toml::Table = toml::from_str(source).map_err(AlgaeError::configuration)?;

        let strain: StrainParameters = take_section(&mut table, "strain")?;
        let environment: EnvironmentParameters = take_section(&mut table, "environment")?;
        let operation: OperationParameters = take_section(&mut table, "operation")?;
        let engine = match table.remove("engine") {
            Some(toml::Value::Table(engine)) => EngineParameters::from_toml_table(engine)?,
            Some(_) => {
                return Err(AlgaeError::InvalidConfiguration(
                    "`engine` must be a table".to_string(),
                ))
            }
            None => EngineParameters::default(),
        };

        Ok(Self {
            strain: StrainProfile::new(strain)?,
            environment: EnvironmentProfile::new(environment)?,
            operation: OperationProfile::new(operation)?,
            engine,
        })
    }

    pub fn to_toml_string(&self) -> AlgaeResult<String> {
        toml::to_string(self).map_err(AlgaeError::configuration)
    }

    /// Engine configured with this scenario's parameters.
    pub fn engine(&self) -> AlgaeResult<ViabilityEngine> {
        ViabilityEngine::from_parameters(self.engine.clone())
    }

    pub fn assess(&self) -> AlgaeResult<Evaluation> {
        self.engine()?
            .assess(&self.strain, &self.environment, &self.operation)
    }

    pub fn evaluate(&self) -> AlgaeResult<MetricsResult> {
        self.assess().map(MetricsResult::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
        [strain]
        name = "Test strain"
        carbon_content_fraction = 0.5
        doubling_time_hours = 24.0
        photosynthetic_efficiency = 0.9
        sinking_rate_m_per_day = 100.0
        export_fraction = 0.5
        optimal_temperature_range_c = { low = 12.0, high = 22.0 }
        optimal_salinity_range_ppt = { low = 30.0, high = 36.0 }

        [environment]
        euphotic_depth_m = 60.0
        surface_temperature_c = 15.0
        salinity_ppt = 33.0
        nitrogen_umol_per_l = 5.0
        phosphorus_umol_per_l = 0.4
        iron_nmol_per_l = 0.08
        mixing_depth_m = 100.0
        current_speed_m_per_s = 0.2

        [operation]
        area_km2 = 500.0
        application_frequency_per_year = 2.0
        cultivation_cost_per_kg = 0.5
        delivery_cost_per_kg = 0.3
        vessel_cost_per_day = 5000.0
        monitoring_cost_per_year = 100000.0
        regulatory_cost_per_year = 50000.0
    "#;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::from_toml_str(SCENARIO).unwrap();
        assert_eq!(scenario.strain.name(), "Test strain");
        assert_eq!(scenario.environment.sequestration_depth_m(), 1000.0);
        assert_eq!(scenario.operation.area_km2(), 500.0);
        assert!((scenario.engine.co2_to_carbon_ratio - 3.67).abs() < 1e-12);

        let metrics = scenario.evaluate().unwrap();
        assert!(metrics.co2_removed_tonnes_per_year() > 0.0);
    }

    #[test]
    fn test_engine_section_overrides() {
        let source = format!(
            "{SCENARIO}\n[engine]\ngenetic_kill_switch_present = false\n"
        );
        let scenario = Scenario::from_toml_str(&source).unwrap();
        let metrics = scenario.evaluate().unwrap();
        assert_eq!(metrics.get("safetyScore"), Some(0.5));
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let source = SCENARIO.replace("export_fraction = 0.5", "export_fraction = 0.95");
        match Scenario::from_toml_str(&source).unwrap_err() {
            AlgaeError::InvalidParameter { field, .. } => assert_eq!(field, "export_fraction"),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_engine_weights_are_rejected() {
        let source = format!(
            "{SCENARIO}\n[engine.scoring_weights]\ncost = 0.5\nscale = 0.5\nsafety = 0.5\n"
        );
        match Scenario::from_toml_str(&source).unwrap_err() {
            AlgaeError::InvalidParameter { field, .. } => assert_eq!(field, "scoring_weights"),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_document_is_configuration_error() {
        let syntax = SCENARIO.replace("area_km2 = 500.0", "area_km2 = ");
        let shape = SCENARIO.replace("area_km2 = 500.0", "area_km2 = \"large\"");
        let engine = format!("engine = 1\n{SCENARIO}");
        for source in [syntax, shape, engine] {
            let err = Scenario::from_toml_str(&source).unwrap_err();
            assert!(
                matches!(err, AlgaeError::InvalidConfiguration(_)),
                "{err:?}"
            );
        }
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let source = SCENARIO.split("[operation]").next().unwrap();
        assert!(matches!(
            Scenario::from_toml_str(source),
            Err(AlgaeError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let scenario = Scenario::reference();
        let toml = scenario.to_toml_string().unwrap();
        let parsed = Scenario::from_toml_str(&toml).unwrap();
        assert_eq!(parsed.strain, scenario.strain);
        assert_eq!(parsed.environment, scenario.environment);
        assert_eq!(parsed.operation, scenario.operation);
        assert_eq!(parsed.evaluate().unwrap(), scenario.evaluate().unwrap());
    }
}

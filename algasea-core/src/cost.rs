//! Cost aggregation
//!
//! Every application seeds the mixed layer with the standing stock assumed
//! by the productivity model, `density x mixing depth` grams of carbon per
//! square metre. Dividing by the strain's carbon content gives dry biomass,
//! which is grown and shipped at per-kilogram rates. Vessel time is charged
//! for every day of the year and the fixed overheads are added on top.
//!
//! All terms are additive and undiscounted.

use crate::carbon::DAYS_PER_YEAR;
use crate::errors::{AlgaeError, AlgaeResult};
use crate::parameters::EngineParameters;
use crate::profiles::{EnvironmentProfile, OperationProfile, StrainProfile};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

const GRAMS_PER_KG: FloatValue = 1000.0;

/// Annual cost lines ($/yr) and the biomass that drives them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Dry biomass seeded per year (kg/yr).
    pub biomass_required_kg: FloatValue,
    pub cultivation: FloatValue,
    pub delivery: FloatValue,
    pub vessel: FloatValue,
    pub monitoring: FloatValue,
    pub regulatory: FloatValue,
    pub total: FloatValue,
}

/// Dry biomass that has to be seeded each year (kg/yr).
pub fn biomass_required_kg(
    strain: &StrainProfile,
    environment: &EnvironmentProfile,
    operation: &OperationProfile,
    parameters: &EngineParameters,
) -> FloatValue {
    let carbon_per_application_g =
        parameters.biomass_density_g_per_m3 * environment.mixing_depth_m() * operation.area_m2();
    let biomass_per_application_kg =
        carbon_per_application_g / strain.carbon_content_fraction() / GRAMS_PER_KG;

    biomass_per_application_kg * operation.application_frequency_per_year()
}

pub fn cost_breakdown(
    strain: &StrainProfile,
    environment: &EnvironmentProfile,
    operation: &OperationProfile,
    parameters: &EngineParameters,
) -> CostBreakdown {
    let biomass = biomass_required_kg(strain, environment, operation, parameters);

    let cultivation = biomass * operation.cultivation_cost_per_kg();
    let delivery = biomass * operation.delivery_cost_per_kg();
    let vessel = operation.vessel_cost_per_day() * DAYS_PER_YEAR;
    let monitoring = operation.monitoring_cost_per_year();
    let regulatory = operation.regulatory_cost_per_year();

    CostBreakdown {
        biomass_required_kg: biomass,
        cultivation,
        delivery,
        vessel,
        monitoring,
        regulatory,
        total: cultivation + delivery + vessel + monitoring + regulatory,
    }
}

/// Cost of removing one tonne of CO2 ($/t).
///
/// Returns [`AlgaeError::UndefinedCost`] when nothing is removed.
pub fn cost_per_tonne(
    total_cost_per_year: FloatValue,
    co2_removed_tonnes_per_year: FloatValue,
) -> AlgaeResult<FloatValue> {
    if !(co2_removed_tonnes_per_year.is_finite() && co2_removed_tonnes_per_year > 0.0) {
        return Err(AlgaeError::UndefinedCost {
            co2_removed_tonnes_per_year,
            total_cost_per_year,
        });
    }
    Ok(total_cost_per_year / co2_removed_tonnes_per_year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::profiles::OperationParameters;
    use is_close::is_close;

    #[test]
    fn test_reference_biomass() {
        let biomass = biomass_required_kg(
            &presets::fast_growing_cyanobacteria(),
            &presets::tropical_ocean(),
            &presets::reference_operation(),
            &EngineParameters::default(),
        );
        // 1 g C/m^3 * 50 m * 1e9 m^2 / 0.45 / 1000 * 4
        let expected = 50.0 * 1.0e9 / 0.45 / 1000.0 * 4.0;
        assert!(is_close!(biomass, expected));
    }

    #[test]
    fn test_breakdown_is_additive() {
        let costs = cost_breakdown(
            &presets::fast_growing_cyanobacteria(),
            &presets::tropical_ocean(),
            &presets::reference_operation(),
            &EngineParameters::default(),
        );
        assert!(is_close!(costs.vessel, 5000.0 * 365.0));
        assert_eq!(costs.monitoring, 100_000.0);
        assert_eq!(costs.regulatory, 50_000.0);
        assert!(is_close!(costs.cultivation, costs.biomass_required_kg * 0.5));
        assert!(is_close!(costs.delivery, costs.biomass_required_kg * 0.3));
        assert!(is_close!(
            costs.total,
            costs.cultivation + costs.delivery + costs.vessel + costs.monitoring + costs.regulatory
        ));
    }

    #[test]
    fn test_more_applications_cost_more() {
        let strain = presets::fast_growing_cyanobacteria();
        let env = presets::tropical_ocean();
        let params = EngineParameters::default();

        let mut op_params = presets::reference_operation().parameters().clone();
        let quarterly = cost_breakdown(&strain, &env, &presets::reference_operation(), &params);
        op_params.application_frequency_per_year = 12.0;
        let monthly = cost_breakdown(
            &strain,
            &env,
            &OperationProfile::new(op_params).unwrap(),
            &params,
        );

        assert!(is_close!(
            monthly.biomass_required_kg,
            3.0 * quarterly.biomass_required_kg
        ));
        assert!(monthly.total > quarterly.total);
        assert_eq!(monthly.vessel, quarterly.vessel);
    }

    #[test]
    fn test_richer_strain_needs_less_biomass() {
        let env = presets::tropical_ocean();
        let op = presets::reference_operation();
        let params = EngineParameters::default();
        let lean = biomass_required_kg(&presets::conservative_strain(), &env, &op, &params);
        let rich = biomass_required_kg(&presets::diatom_variant(), &env, &op, &params);
        assert!(rich < lean);
    }

    #[test]
    fn test_cost_per_tonne() {
        assert!(is_close!(cost_per_tonne(1_000_000.0, 10_000.0).unwrap(), 100.0));
    }

    #[test]
    fn test_cost_per_tonne_undefined_for_zero_removal() {
        let err = cost_per_tonne(1_000_000.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            AlgaeError::UndefinedCost {
                co2_removed_tonnes_per_year: 0.0,
                total_cost_per_year: 1_000_000.0,
            }
        );
    }

    #[test]
    fn test_cost_per_tonne_undefined_for_negative_or_nan_removal() {
        assert!(cost_per_tonne(1.0, -5.0).is_err());
        assert!(cost_per_tonne(1.0, f64::NAN).is_err());
        assert!(cost_per_tonne(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_zero_overheads() {
        let op = OperationProfile::new(OperationParameters {
            monitoring_cost_per_year: 0.0,
            regulatory_cost_per_year: 0.0,
            ..presets::reference_operation().parameters().clone()
        })
        .unwrap();
        let costs = cost_breakdown(
            &presets::fast_growing_cyanobacteria(),
            &presets::tropical_ocean(),
            &op,
            &EngineParameters::default(),
        );
        assert!(is_close!(
            costs.total,
            costs.cultivation + costs.delivery + costs.vessel
        ));
    }
}

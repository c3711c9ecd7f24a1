//! Reference scenarios
//!
//! Three strains, three sites and one deployment used as worked examples and
//! as fixtures throughout the test suite.

use crate::profiles::{
    EnvironmentParameters, EnvironmentProfile, OperationParameters, OperationProfile,
    OptimalRange, StrainParameters, StrainProfile,
};
use indexmap::IndexMap;

pub fn fast_growing_cyanobacteria() -> StrainProfile {
    StrainProfile::new_unchecked(StrainParameters {
        name: "Fast-growing Cyanobacteria".to_string(),
        carbon_content_fraction: 0.45,
        doubling_time_hours: 12.0,
        photosynthetic_efficiency: 0.8,
        sinking_rate_m_per_day: 50.0,
        export_fraction: 0.4,
        optimal_temperature_range_c: OptimalRange::new(20.0, 30.0),
        optimal_salinity_range_ppt: OptimalRange::new(30.0, 40.0),
    })
}

pub fn diatom_variant() -> StrainProfile {
    StrainProfile::new_unchecked(StrainParameters {
        name: "GM Diatom Variant".to_string(),
        carbon_content_fraction: 0.52,
        doubling_time_hours: 24.0,
        photosynthetic_efficiency: 0.9,
        sinking_rate_m_per_day: 100.0,
        export_fraction: 0.6,
        optimal_temperature_range_c: OptimalRange::new(15.0, 25.0),
        optimal_salinity_range_ppt: OptimalRange::new(25.0, 35.0),
    })
}

pub fn conservative_strain() -> StrainProfile {
    StrainProfile::new_unchecked(StrainParameters {
        name: "Conservative GM Algae".to_string(),
        carbon_content_fraction: 0.40,
        doubling_time_hours: 48.0,
        photosynthetic_efficiency: 0.7,
        sinking_rate_m_per_day: 25.0,
        export_fraction: 0.3,
        optimal_temperature_range_c: OptimalRange::new(18.0, 28.0),
        optimal_salinity_range_ppt: OptimalRange::new(28.0, 38.0),
    })
}

/// Warm, stratified, nutrient-poor open ocean.
pub fn tropical_ocean() -> EnvironmentProfile {
    EnvironmentProfile::new_unchecked(EnvironmentParameters {
        euphotic_depth_m: 80.0,
        surface_temperature_c: 28.0,
        salinity_ppt: 35.0,
        nitrogen_umol_per_l: 2.0,
        phosphorus_umol_per_l: 0.2,
        iron_nmol_per_l: 0.05,
        mixing_depth_m: 50.0,
        current_speed_m_per_s: 0.1,
        sequestration_depth_m: 1000.0,
    })
}

pub fn temperate_ocean() -> EnvironmentProfile {
    EnvironmentProfile::new_unchecked(EnvironmentParameters {
        euphotic_depth_m: 60.0,
        surface_temperature_c: 15.0,
        salinity_ppt: 33.0,
        nitrogen_umol_per_l: 5.0,
        phosphorus_umol_per_l: 0.4,
        iron_nmol_per_l: 0.08,
        mixing_depth_m: 100.0,
        current_speed_m_per_s: 0.2,
        sequestration_depth_m: 1500.0,
    })
}

/// Upwelling-style site with plenty of nutrients but a shallow euphotic zone.
pub fn nutrient_rich() -> EnvironmentProfile {
    EnvironmentProfile::new_unchecked(EnvironmentParameters {
        euphotic_depth_m: 40.0,
        surface_temperature_c: 20.0,
        salinity_ppt: 34.0,
        nitrogen_umol_per_l: 10.0,
        phosphorus_umol_per_l: 0.8,
        iron_nmol_per_l: 0.12,
        mixing_depth_m: 75.0,
        current_speed_m_per_s: 0.15,
        sequestration_depth_m: 1200.0,
    })
}

/// 1000 km^2 seeded four times a year.
pub fn reference_operation() -> OperationProfile {
    OperationProfile::new_unchecked(OperationParameters {
        area_km2: 1000.0,
        application_frequency_per_year: 4.0,
        cultivation_cost_per_kg: 0.5,
        delivery_cost_per_kg: 0.3,
        vessel_cost_per_day: 5000.0,
        monitoring_cost_per_year: 100_000.0,
        regulatory_cost_per_year: 50_000.0,
    })
}

/// Reference strains keyed by identifier.
pub fn strains() -> IndexMap<&'static str, StrainProfile> {
    IndexMap::from([
        ("fast_growing_cyanobacteria", fast_growing_cyanobacteria()),
        ("diatom_variant", diatom_variant()),
        ("conservative_strain", conservative_strain()),
    ])
}

/// Reference environments keyed by identifier.
pub fn environments() -> IndexMap<&'static str, EnvironmentProfile> {
    IndexMap::from([
        ("tropical_ocean", tropical_ocean()),
        ("temperate_ocean", temperate_ocean()),
        ("nutrient_rich", nutrient_rich()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strains_pass_validation() {
        for (key, strain) in strains() {
            assert!(
                StrainProfile::new(strain.parameters().clone()).is_ok(),
                "Preset strain {key} is invalid"
            );
        }
    }

    #[test]
    fn test_environments_pass_validation() {
        for (key, environment) in environments() {
            assert!(
                EnvironmentProfile::new(environment.parameters().clone()).is_ok(),
                "Preset environment {key} is invalid"
            );
        }
    }

    #[test]
    fn test_operation_passes_validation() {
        assert!(OperationProfile::new(reference_operation().parameters().clone()).is_ok());
    }

    #[test]
    fn test_preset_order() {
        let keys: Vec<_> = strains().keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                "fast_growing_cyanobacteria",
                "diatom_variant",
                "conservative_strain"
            ]
        );
    }
}

//! Environmental limitation functions
//!
//! Each function returns a multiplier in `[0, 1]` applied to the base growth
//! rate of a strain.
//!
//! # Temperature and salinity
//!
//! Growth is unlimited inside the strain's optimal range. With the default
//! tolerance of zero it stops anywhere outside it. A positive tolerance
//! $d_{tol}$ lets growth fall linearly with the distance `d` instead:
//!
//! $$ f = \max\left(0, 1 - \frac{d}{d_{tol}}\right) $$
//!
//! # Light
//!
//! A piecewise-linear response to euphotic depth $z$, scaled by the strain's
//! photosynthetic efficiency $\eta$:
//!
//! $$ f = \eta \times \begin{cases} 0.1 & z \le 10 \\ 0.1 + 0.9 \frac{z - 10}{90} & 10 < z < 100 \\ 1 & z \ge 100 \end{cases} $$
//!
//! # Nutrients
//!
//! Michaelis-Menten saturation per nutrient, combined with Liebig's law of
//! the minimum:
//!
//! $$ f = \min_i \frac{c_i}{c_i + K_i} $$

use crate::parameters::EngineParameters;
use crate::profiles::{EnvironmentProfile, OptimalRange, StrainProfile};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Euphotic depth at or below which the light response bottoms out (m).
pub const LIGHT_MIN_DEPTH_M: FloatValue = 10.0;

/// Euphotic depth at or above which the light response saturates (m).
pub const LIGHT_SATURATION_DEPTH_M: FloatValue = 100.0;

/// Light response at or below [`LIGHT_MIN_DEPTH_M`].
pub const LIGHT_MIN_RESPONSE: FloatValue = 0.1;

/// All limitation factors for one strain at one site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limitations {
    pub temperature: FloatValue,
    pub light: FloatValue,
    pub nitrogen: FloatValue,
    pub phosphorus: FloatValue,
    pub iron: FloatValue,
    /// Minimum of the three nutrient factors.
    pub nutrient: FloatValue,
    pub salinity: FloatValue,
}

impl Limitations {
    /// Product of the temperature, light, nutrient and salinity factors.
    pub fn growth_multiplier(&self) -> FloatValue {
        self.temperature * self.light * self.nutrient * self.salinity
    }
}

fn clamp_unit(value: FloatValue) -> FloatValue {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Response to a value relative to an optimal range with a linear falloff.
pub fn range_response(
    range: OptimalRange,
    value: FloatValue,
    tolerance: FloatValue,
) -> FloatValue {
    if range.contains(value) {
        return 1.0;
    }
    if tolerance <= 0.0 {
        return 0.0;
    }
    clamp_unit(1.0 - range.distance(value) / tolerance)
}

pub fn temperature_factor(
    strain: &StrainProfile,
    environment: &EnvironmentProfile,
    parameters: &EngineParameters,
) -> FloatValue {
    range_response(
        strain.optimal_temperature_range_c(),
        environment.surface_temperature_c(),
        parameters.temperature_tolerance_c,
    )
}

pub fn salinity_factor(
    strain: &StrainProfile,
    environment: &EnvironmentProfile,
    parameters: &EngineParameters,
) -> FloatValue {
    range_response(
        strain.optimal_salinity_range_ppt(),
        environment.salinity_ppt(),
        parameters.salinity_tolerance_ppt,
    )
}

/// Light availability integrated over the euphotic zone, before efficiency.
pub fn light_depth_response(euphotic_depth_m: FloatValue) -> FloatValue {
    if euphotic_depth_m <= LIGHT_MIN_DEPTH_M {
        LIGHT_MIN_RESPONSE
    } else if euphotic_depth_m >= LIGHT_SATURATION_DEPTH_M {
        1.0
    } else {
        LIGHT_MIN_RESPONSE
            + (1.0 - LIGHT_MIN_RESPONSE) * (euphotic_depth_m - LIGHT_MIN_DEPTH_M)
                / (LIGHT_SATURATION_DEPTH_M - LIGHT_MIN_DEPTH_M)
    }
}

pub fn light_factor(strain: &StrainProfile, environment: &EnvironmentProfile) -> FloatValue {
    clamp_unit(
        light_depth_response(environment.euphotic_depth_m()) * strain.photosynthetic_efficiency(),
    )
}

/// Michaelis-Menten saturation `c / (c + K)`.
///
/// When `c + K` is zero the concentration alone decides: no nutrient means
/// no growth.
pub fn saturation_response(concentration: FloatValue, half_saturation: FloatValue) -> FloatValue {
    let denominator = concentration + half_saturation;
    if denominator <= 0.0 {
        return 0.0;
    }
    clamp_unit(concentration / denominator)
}

pub fn limitations(
    strain: &StrainProfile,
    environment: &EnvironmentProfile,
    parameters: &EngineParameters,
) -> Limitations {
    let nitrogen = saturation_response(
        environment.nitrogen_umol_per_l(),
        parameters.nitrogen_half_saturation_umol_per_l,
    );
    let phosphorus = saturation_response(
        environment.phosphorus_umol_per_l(),
        parameters.phosphorus_half_saturation_umol_per_l,
    );
    let iron = saturation_response(
        environment.iron_nmol_per_l(),
        parameters.iron_half_saturation_nmol_per_l,
    );

    Limitations {
        temperature: temperature_factor(strain, environment, parameters),
        light: light_factor(strain, environment),
        nitrogen,
        phosphorus,
        iron,
        nutrient: nitrogen.min(phosphorus).min(iron),
        salinity: salinity_factor(strain, environment, parameters),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;
    use crate::profiles::EnvironmentParameters;
    use is_close::is_close;

    fn environment_with(update: impl FnOnce(&mut EnvironmentParameters)) -> EnvironmentProfile {
        let mut params = presets::tropical_ocean().parameters().clone();
        update(&mut params);
        EnvironmentProfile::new(params).unwrap()
    }

    #[test]
    fn test_range_response_inside_is_one() {
        let range = OptimalRange::new(20.0, 30.0);
        assert_eq!(range_response(range, 20.0, 5.0), 1.0);
        assert_eq!(range_response(range, 28.0, 5.0), 1.0);
        assert_eq!(range_response(range, 30.0, 5.0), 1.0);
    }

    #[test]
    fn test_range_response_linear_falloff() {
        let range = OptimalRange::new(20.0, 30.0);
        assert!(is_close!(range_response(range, 32.5, 5.0), 0.5));
        assert!(is_close!(range_response(range, 19.0, 5.0), 0.8));
        assert_eq!(range_response(range, 35.0, 5.0), 0.0);
        assert_eq!(range_response(range, 50.0, 5.0), 0.0);
    }

    #[test]
    fn test_range_response_monotonic_outside() {
        let range = OptimalRange::new(20.0, 30.0);
        let mut previous = 1.0;
        for step in 0..40 {
            let value = 30.0 + step as f64 * 0.25;
            let response = range_response(range, value, 5.0);
            assert!(response <= previous);
            assert!((0.0..=1.0).contains(&response));
            previous = response;
        }
    }

    #[test]
    fn test_range_response_zero_tolerance_is_step() {
        let range = OptimalRange::new(20.0, 30.0);
        assert_eq!(range_response(range, 30.0, 0.0), 1.0);
        assert_eq!(range_response(range, 30.01, 0.0), 0.0);
    }

    #[test]
    fn test_default_factors_are_step_functions() {
        let params = EngineParameters::default();
        let strain = presets::fast_growing_cyanobacteria();
        let warm = environment_with(|p| {
            p.surface_temperature_c = 31.0;
            p.salinity_ppt = 41.0;
        });
        assert_eq!(temperature_factor(&strain, &warm, &params), 0.0);
        assert_eq!(salinity_factor(&strain, &warm, &params), 0.0);

        let edge = environment_with(|p| {
            p.surface_temperature_c = 30.0;
            p.salinity_ppt = 40.0;
        });
        assert_eq!(temperature_factor(&strain, &edge, &params), 1.0);
        assert_eq!(salinity_factor(&strain, &edge, &params), 1.0);
    }

    #[test]
    fn test_light_depth_response() {
        assert_eq!(light_depth_response(5.0), 0.1);
        assert_eq!(light_depth_response(10.0), 0.1);
        assert!(is_close!(light_depth_response(55.0), 0.55));
        assert!(is_close!(light_depth_response(80.0), 0.8));
        assert_eq!(light_depth_response(100.0), 1.0);
        assert_eq!(light_depth_response(150.0), 1.0);
    }

    #[test]
    fn test_light_factor_scales_with_efficiency() {
        let env = presets::tropical_ocean();
        let strain = presets::fast_growing_cyanobacteria();
        // 80 m euphotic depth and 0.8 efficiency
        assert!(is_close!(light_factor(&strain, &env), 0.64));

        let efficient = presets::diatom_variant();
        assert!(light_factor(&efficient, &env) > light_factor(&strain, &env));
    }

    #[test]
    fn test_light_factor_saturates() {
        let env = environment_with(|p| p.euphotic_depth_m = 150.0);
        let mut params = presets::fast_growing_cyanobacteria().parameters().clone();
        params.photosynthetic_efficiency = 1.0;
        let strain = StrainProfile::new(params).unwrap();
        assert_eq!(light_factor(&strain, &env), 1.0);
    }

    #[test]
    fn test_saturation_response() {
        assert!(is_close!(saturation_response(1.0, 1.0), 0.5));
        assert!(is_close!(saturation_response(3.0, 1.0), 0.75));
        assert_eq!(saturation_response(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_saturation_response_guards_zero_denominator() {
        assert_eq!(saturation_response(0.0, 0.0), 0.0);
        assert_eq!(saturation_response(2.0, 0.0), 1.0);
    }

    #[test]
    fn test_nutrient_factor_is_minimum() {
        let strain = presets::fast_growing_cyanobacteria();
        let params = EngineParameters::default();
        let env = environment_with(|p| {
            p.nitrogen_umol_per_l = 100.0;
            p.phosphorus_umol_per_l = 0.1;
            p.iron_nmol_per_l = 10.0;
        });
        let limits = limitations(&strain, &env, &params);
        assert!(is_close!(limits.phosphorus, 0.5));
        assert_eq!(limits.nutrient, limits.phosphorus);
        assert!(limits.nitrogen > limits.nutrient);
        assert!(limits.iron > limits.nutrient);
    }

    #[test]
    fn test_any_missing_nutrient_stops_growth() {
        let strain = presets::fast_growing_cyanobacteria();
        let params = EngineParameters::default();
        for nutrient in 0..3 {
            let env = environment_with(|p| {
                p.nitrogen_umol_per_l = 50.0;
                p.phosphorus_umol_per_l = 5.0;
                p.iron_nmol_per_l = 2.0;
                match nutrient {
                    0 => p.nitrogen_umol_per_l = 0.0,
                    1 => p.phosphorus_umol_per_l = 0.0,
                    _ => p.iron_nmol_per_l = 0.0,
                }
            });
            let limits = limitations(&strain, &env, &params);
            assert_eq!(limits.nutrient, 0.0, "Nutrient {} set to zero", nutrient);
            assert_eq!(limits.growth_multiplier(), 0.0);
        }
    }

    #[test]
    fn test_reference_site_limitations() {
        let limits = limitations(
            &presets::fast_growing_cyanobacteria(),
            &presets::tropical_ocean(),
            &EngineParameters::default(),
        );
        assert_eq!(limits.temperature, 1.0);
        assert_eq!(limits.salinity, 1.0);
        // 2.0 / 3.0, 0.2 / 0.3, 0.05 / 0.075
        assert!(is_close!(limits.nitrogen, 2.0 / 3.0));
        assert!(is_close!(limits.phosphorus, 2.0 / 3.0));
        assert!(is_close!(limits.iron, 2.0 / 3.0));
    }
}

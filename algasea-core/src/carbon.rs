//! Growth, productivity and carbon export
//!
//! # Growth and productivity
//!
//! The base specific growth rate follows from the doubling time $t_d$ (hours):
//!
//! $$ \mu_0 = \frac{\ln 2}{t_d / 24} $$
//!
//! and is scaled by the product of the limitation factors. Net primary
//! productivity assumes a fixed carbon density $\rho$ throughout the mixed
//! layer of depth $h$:
//!
//! $$ NPP = \mu \rho h \times 365 $$
//!
//! # Export and sequestration
//!
//! A fraction $f_e$ of production sinks out of the surface layer. While it
//! sinks at $w$ m/day to the sequestration depth $z_s$ it is remineralized at
//! rate $r$:
//!
//! $$ C_{seq} = NPP \times A \times f_e \times e^{-r z_s / w} $$
//!
//! Carbon mass is converted to CO2 with the CO2:C mass ratio.

use crate::limitation::Limitations;
use crate::parameters::EngineParameters;
use crate::profiles::{EnvironmentProfile, OperationProfile, StrainProfile};
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;

pub const DAYS_PER_YEAR: FloatValue = 365.0;
pub const HOURS_PER_DAY: FloatValue = 24.0;
pub const GRAMS_PER_TONNE: FloatValue = 1.0e6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Productivity {
    /// Unlimited specific growth rate (day^-1).
    pub base_growth_rate: FloatValue,
    /// Growth rate after environmental limitation (day^-1).
    pub effective_growth_rate: FloatValue,
    /// Net primary productivity (g C/m^2/yr).
    pub npp_g_per_m2_per_year: FloatValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sequestration {
    /// Time to sink from the surface to the sequestration depth (days).
    pub sinking_time_days: FloatValue,
    /// Share of exported carbon surviving remineralization.
    pub survival_fraction: FloatValue,
    /// Carbon leaving the surface layer, before remineralization (t C/yr).
    pub carbon_exported_tonnes_per_year: FloatValue,
    /// Carbon reaching the sequestration depth (t C/yr).
    pub carbon_sequestered_tonnes_per_year: FloatValue,
    /// CO2 equivalent of the sequestered carbon (t CO2/yr).
    pub co2_removed_tonnes_per_year: FloatValue,
}

/// Specific growth rate implied by a doubling time (day^-1).
pub fn base_growth_rate(doubling_time_hours: FloatValue) -> FloatValue {
    LN_2 / (doubling_time_hours / HOURS_PER_DAY)
}

pub fn productivity(
    strain: &StrainProfile,
    environment: &EnvironmentProfile,
    limitations: &Limitations,
    parameters: &EngineParameters,
) -> Productivity {
    let base = base_growth_rate(strain.doubling_time_hours());
    let effective = (base * limitations.growth_multiplier()).max(0.0);
    let npp = (effective
        * parameters.biomass_density_g_per_m3
        * environment.mixing_depth_m()
        * DAYS_PER_YEAR)
        .max(0.0);

    Productivity {
        base_growth_rate: base,
        effective_growth_rate: effective,
        npp_g_per_m2_per_year: npp,
    }
}

/// Share of sinking carbon left after `sinking_time_days` of remineralization.
pub fn survival_fraction(
    remineralization_rate_per_day: FloatValue,
    sinking_time_days: FloatValue,
) -> FloatValue {
    (-remineralization_rate_per_day * sinking_time_days).exp()
}

pub fn sequestration(
    strain: &StrainProfile,
    environment: &EnvironmentProfile,
    operation: &OperationProfile,
    productivity: &Productivity,
    parameters: &EngineParameters,
) -> Sequestration {
    let exported_g =
        productivity.npp_g_per_m2_per_year * operation.area_m2() * strain.export_fraction();

    let sinking_time_days = environment.sequestration_depth_m() / strain.sinking_rate_m_per_day();
    let survival = survival_fraction(parameters.remineralization_rate_per_day, sinking_time_days);

    let carbon_exported = (exported_g / GRAMS_PER_TONNE).max(0.0);
    let carbon_sequestered = (carbon_exported * survival).max(0.0);

    Sequestration {
        sinking_time_days,
        survival_fraction: survival,
        carbon_exported_tonnes_per_year: carbon_exported,
        carbon_sequestered_tonnes_per_year: carbon_sequestered,
        co2_removed_tonnes_per_year: carbon_sequestered * parameters.co2_to_carbon_ratio,
    }
}

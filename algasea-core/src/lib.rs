//! Viability estimates for ocean carbon sequestration with engineered algae.
//!
//! Given a strain, a deployment site and a deployment plan, the engine
//! estimates how much CO2 is durably removed each year, what it costs and
//! how the scenario scores on cost, scale and safety.
//!
//! ```
//! use algasea_core::{evaluate, presets};
//!
//! let metrics = evaluate(
//!     &presets::fast_growing_cyanobacteria(),
//!     &presets::tropical_ocean(),
//!     &presets::reference_operation(),
//!     None,
//! )
//! .unwrap();
//! assert!(metrics.co2_removed_tonnes_per_year() > 0.0);
//! ```

pub mod carbon;
pub mod cost;
pub mod engine;
pub mod errors;
pub mod limitation;
pub mod metrics;
pub mod parameters;
pub mod presets;
pub mod profiles;
pub mod scenario;
pub mod scoring;
pub mod sweep;
mod validation;

#[cfg(feature = "python")]
pub mod python;

pub type FloatValue = f64;

pub use engine::{evaluate, ViabilityEngine};
pub use errors::{AlgaeError, AlgaeResult};
pub use metrics::{Evaluation, MetricsResult};
pub use parameters::{EngineParameters, ScoringWeights};
pub use profiles::{
    EnvironmentParameters, EnvironmentProfile, OperationParameters, OperationProfile,
    OptimalRange, StrainParameters, StrainProfile,
};
pub use scenario::Scenario;
pub use sweep::{compare_strains, Sweep, SweepParameter, SweepPoint, SweepResults};

//! Input profiles
//!
//! Each profile is built from a plain parameters struct and validated once at
//! construction. A profile that exists is always within its documented
//! ranges, so the engine never has to re-check or clamp inputs.

mod environment;
mod operation;
mod range;
mod strain;

pub use environment::{EnvironmentParameters, EnvironmentProfile, DEFAULT_SEQUESTRATION_DEPTH_M};
pub use operation::{OperationParameters, OperationProfile};
pub use range::OptimalRange;
pub use strain::{StrainParameters, StrainProfile};

//! Ocean carbon sequestration viability estimates for engineered algae.
//!
//! The calculation engine lives in [`algasea_core`] and is re-exported here.
//! With the `python` feature enabled this crate also builds the `_lib`
//! extension module.

pub use algasea_core::*;

#[cfg(feature = "python")]
mod python;

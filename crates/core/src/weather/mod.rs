//! Synthetic weather generation
//!
//! Parametric diurnal and spatial models plus seeded noise, producing a
//! [`FieldSet`](crate::core_types::FieldSet) over a lat/lon grid and an
//! hourly time axis.

pub mod diurnal;
pub mod generator;
pub mod params;
pub mod seed;

pub use diurnal::DiurnalWave;
pub use generator::FieldGenerator;
pub use params::{GenerationParams, PrecipitationModel, PressureModel, TemperatureModel, WindModel};
pub use seed::FixedSeedPerCall;

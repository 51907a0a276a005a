//! Fire Risk Computation Model.
//!
//! Converts an ordered outdoor weather series into an indoor wood-moisture
//! profile and, from the surface moisture of that profile, a time-to-flashover
//! estimate per observation.

pub mod constants;
pub mod helpers;
pub mod io;
pub mod models;
pub mod modules;
pub mod version;

pub use helpers::FRCMError;
pub use models::input::{WeatherData, WeatherDataPoint};
pub use models::output::{FireRisk, FireRiskPrediction, RiskCategory};
pub use modules::frcm::config::{SimulationParameters, TTFModel};
pub use modules::frcm::models::{compute, compute_batch};

//! Hazard Risk Scoring Engine
//!
//! Turns raw environmental inputs into classified hyperlocal risk for a city
//! on a given day:
//!
//! - **Flood**: elevation and rainfall grids are normalized onto [0, 1] and
//!   combined per cell as `rainfall * (1 - elevation)`, then bucketed into
//!   Low / Medium / High.
//! - **Heat**: hourly temperature and humidity feed an empirical heat index
//!   polynomial, bucketed into Safe / Caution / Extreme.
//! - **Insights**: per-level counts and peaks derived from both.
//!
//! Data acquisition stays behind the [`GridSource`] and [`WeatherSource`]
//! traits; every function in the scoring path is pure and deterministic.
//!
//! ```
//! use hazard_risk_core::{assess, AssessmentRequest, CityPreset, RiskConfig};
//! use hazard_risk_core::sources::{SyntheticGridSource, SyntheticWeatherSource};
//! use chrono::NaiveDate;
//!
//! let request = AssessmentRequest::new(
//!     CityPreset::mumbai(),
//!     NaiveDate::from_ymd_opt(2024, 7, 26).unwrap(),
//! );
//! let assessment = assess(
//!     &mut SyntheticGridSource::new(42),
//!     &mut SyntheticWeatherSource::new(42),
//!     &request,
//!     &RiskConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(assessment.insight.flood.counts.total(), 50 * 50);
//! assert_eq!(assessment.insight.heat.counts.total(), 24);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;
pub mod grid;

// Scoring pipeline
pub mod flood;
pub mod heat;
pub mod insight;
pub mod normalize;

// Orchestration and collaborators
pub mod assessment;
pub mod city;
pub mod config;
pub mod sources;

// Re-export core types
pub use core_types::{Celsius, GeoBounds, Meters, Millimeters, Percent};
pub use error::RiskError;
pub use grid::Field;

// Re-export pipeline entry points
pub use flood::{compute_flood_risk, CellRisk, FloodRiskField, FloodRiskLevel, FloodThresholds};
pub use heat::{
    compute_heat_index, heat_index, ClassifiedHourlySeries, HeatRiskLevel, HeatThresholds,
    HourlyHeatRisk, HourlySample, HourlySeries,
};
pub use insight::{aggregate_insights, FloodInsight, HeatInsight, Insight, LevelCounts};
pub use normalize::{normalize, normalize_with_policy, DegenerateRangePolicy, NormalizedField, ValueRange};

// Re-export orchestration
pub use assessment::{assess, Assessment, AssessmentRequest};
pub use city::CityPreset;
pub use config::{NormalizationPolicy, RiskConfig};
pub use sources::{GridSource, WeatherSource};

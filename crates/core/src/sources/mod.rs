//! Data sources feeding the risk models
//!
//! Elevation, rainfall and hourly weather come from collaborators outside the
//! scoring engine: a remote geospatial service, a sensor archive, or a
//! synthetic generator standing in for either. The models only see the values
//! these traits return, and every source finishes (or fails) before a model runs.

mod fixed;
mod synthetic;

pub use fixed::{StaticGridSource, StaticWeatherSource};
pub use synthetic::{SyntheticGridConfig, SyntheticGridSource, SyntheticWeatherConfig, SyntheticWeatherSource};

use crate::core_types::GeoBounds;
use crate::error::RiskError;
use crate::grid::Field;
use crate::heat::HourlySeries;
use crate::normalize::ValueRange;
use chrono::NaiveDate;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Area and day a grid is requested for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridRequest {
    /// Rectangle to sample
    pub bounds: GeoBounds,
    /// Day of interest (rainfall accumulation day)
    pub date: NaiveDate,
}

/// Elevation and rainfall over the same grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSample {
    /// Terrain elevation in meters
    pub elevation: Field,
    /// Daily rainfall in millimeters
    pub rainfall: Field,
    /// Region-wide elevation extrema, when the source computes them itself
    pub elevation_range: Option<ValueRange>,
    /// Region-wide rainfall extrema, when the source computes them itself
    pub rainfall_range: Option<ValueRange>,
}

/// City and day an hourly series is requested for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRequest {
    /// City name
    pub city: String,
    /// Day of interest
    pub date: NaiveDate,
}

/// Produces elevation and rainfall fields for an area
pub trait GridSource {
    /// Sample both fields over `request.bounds` for `request.date`
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::Source`] (or a field construction error) when the
    /// source can't produce data.
    fn sample(&mut self, request: &GridRequest) -> Result<GridSample, RiskError>;
}

/// Produces a 24-hour temperature/humidity series for a city
pub trait WeatherSource {
    /// Fetch the hourly series for `request.city` on `request.date`
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::Source`] (or [`RiskError::InvalidSeries`]) when the
    /// source can't produce a full day.
    fn hourly(&mut self, request: &WeatherRequest) -> Result<HourlySeries, RiskError>;
}

/// Derive a per-request seed so each day (and place) gets its own reproducible draw
pub(crate) fn request_seed(seed: u64, date: NaiveDate, salt: impl Hash) -> u64 {
    let mut hasher = FxHasher::default();
    seed.hash(&mut hasher);
    date.hash(&mut hasher);
    salt.hash(&mut hasher);
    hasher.finish()
}

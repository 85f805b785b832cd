//! Sources that hand back data supplied up front
//!
//! Used when elevation, rainfall or weather were fetched elsewhere (a remote
//! geospatial service, a file) before the assessment runs.

use super::{GridRequest, GridSample, GridSource, WeatherRequest, WeatherSource};
use crate::error::RiskError;
use crate::grid::Field;
use crate::heat::HourlySeries;
use crate::normalize::ValueRange;

/// Returns the same pre-fetched elevation and rainfall for every request
#[derive(Debug, Clone)]
pub struct StaticGridSource {
    sample: GridSample,
}

impl StaticGridSource {
    /// Wrap two fields of matching shape
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::ShapeMismatch`] when the fields differ in shape.
    pub fn new(elevation: Field, rainfall: Field) -> Result<Self, RiskError> {
        elevation.ensure_same_shape(&rainfall)?;
        Ok(Self {
            sample: GridSample {
                elevation,
                rainfall,
                elevation_range: None,
                rainfall_range: None,
            },
        })
    }

    /// Attach region-wide extrema computed by the upstream service
    #[must_use]
    pub fn with_regional_ranges(mut self, elevation: ValueRange, rainfall: ValueRange) -> Self {
        self.sample.elevation_range = Some(elevation);
        self.sample.rainfall_range = Some(rainfall);
        self
    }
}

impl GridSource for StaticGridSource {
    fn sample(&mut self, _request: &GridRequest) -> Result<GridSample, RiskError> {
        Ok(self.sample.clone())
    }
}

/// Returns the same pre-fetched hourly series for every request
#[derive(Debug, Clone)]
pub struct StaticWeatherSource {
    series: HourlySeries,
}

impl StaticWeatherSource {
    /// Wrap a series
    #[must_use]
    pub fn new(series: HourlySeries) -> Self {
        Self { series }
    }
}

impl WeatherSource for StaticWeatherSource {
    fn hourly(&mut self, _request: &WeatherRequest) -> Result<HourlySeries, RiskError> {
        Ok(self.series.clone())
    }
}

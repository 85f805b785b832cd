//! Seeded random sources for demos and tests
//!
//! Values are drawn uniformly from configured ranges using a generator seeded
//! explicitly from the configured seed and the request, so the same request
//! always yields the same data.

use super::{request_seed, GridRequest, GridSample, GridSource, WeatherRequest, WeatherSource};
use crate::core_types::units::{Celsius, Meters, Millimeters, Percent};
use crate::core_types::GeoBounds;
use crate::error::RiskError;
use crate::grid::field::cell_count;
use crate::grid::Field;
use crate::heat::{HourlySample, HourlySeries, HOURS_PER_DAY};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Grid size and value ranges for [`SyntheticGridSource`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticGridConfig {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// Elevation range `[min, max)`
    pub elevation: (Meters, Meters),
    /// Daily rainfall range `[min, max)`
    pub rainfall: (Millimeters, Millimeters),
}

impl Default for SyntheticGridConfig {
    /// 50x50 grid, 0-50m coastal elevations, 50-200mm/day monsoon rainfall
    fn default() -> Self {
        Self {
            rows: 50,
            cols: 50,
            elevation: (Meters::new(0.0), Meters::new(50.0)),
            rainfall: (Millimeters::new(50.0), Millimeters::new(200.0)),
        }
    }
}

/// Uniform random elevation and rainfall grids
#[derive(Debug, Clone)]
pub struct SyntheticGridSource {
    seed: u64,
    config: SyntheticGridConfig,
}

impl SyntheticGridSource {
    /// Default-sized source with the given seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SyntheticGridConfig::default())
    }

    /// Source with custom grid size and ranges
    #[must_use]
    pub fn with_config(seed: u64, config: SyntheticGridConfig) -> Self {
        Self { seed, config }
    }

    /// Grid configuration
    #[must_use]
    pub fn config(&self) -> &SyntheticGridConfig {
        &self.config
    }
}

impl GridSource for SyntheticGridSource {
    fn sample(&mut self, request: &GridRequest) -> Result<GridSample, RiskError> {
        let b = request.bounds;
        let salt = [b.lat_min, b.lat_max, b.lon_min, b.lon_max].map(f64::to_bits);
        let mut rng = StdRng::seed_from_u64(request_seed(self.seed, request.date, salt));
        let SyntheticGridConfig {
            rows,
            cols,
            elevation,
            rainfall,
        } = self.config;

        debug!(rows, cols, date = %request.date, "sampling synthetic grid");
        let elevation = uniform_field(&mut rng, rows, cols, (*elevation.0, *elevation.1), b)?;
        let rainfall = uniform_field(&mut rng, rows, cols, (*rainfall.0, *rainfall.1), b)?;

        Ok(GridSample {
            elevation,
            rainfall,
            elevation_range: None,
            rainfall_range: None,
        })
    }
}

fn uniform_field(
    rng: &mut StdRng,
    rows: usize,
    cols: usize,
    (lo, hi): (f64, f64),
    bounds: GeoBounds,
) -> Result<Field, RiskError> {
    check_range("grid", lo, hi)?;
    let len = cell_count(rows, cols)?;
    let data = (0..len).map(|_| rng.random_range(lo..hi)).collect();
    Field::from_vec(rows, cols, data, bounds)
}

fn check_range(what: &str, lo: f64, hi: f64) -> Result<(), RiskError> {
    if lo.is_finite() && hi.is_finite() && lo < hi {
        Ok(())
    } else {
        Err(RiskError::Source(format!(
            "synthetic {what} range [{lo}, {hi}) is empty or not finite"
        )))
    }
}

/// Value ranges for [`SyntheticWeatherSource`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyntheticWeatherConfig {
    /// Temperature range `[min, max)`
    pub temperature: (Celsius, Celsius),
    /// Relative humidity range `[min, max)`
    pub humidity: (Percent, Percent),
}

impl Default for SyntheticWeatherConfig {
    /// Pre-monsoon Indian city: 30-42°C, 40-80% humidity
    fn default() -> Self {
        Self {
            temperature: (Celsius::new(30.0), Celsius::new(42.0)),
            humidity: (Percent::new(40.0), Percent::new(80.0)),
        }
    }
}

/// Uniform random hourly temperature and humidity
#[derive(Debug, Clone)]
pub struct SyntheticWeatherSource {
    seed: u64,
    config: SyntheticWeatherConfig,
}

impl SyntheticWeatherSource {
    /// Source with default ranges and the given seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SyntheticWeatherConfig::default())
    }

    /// Source with custom ranges
    #[must_use]
    pub fn with_config(seed: u64, config: SyntheticWeatherConfig) -> Self {
        Self { seed, config }
    }
}

impl WeatherSource for SyntheticWeatherSource {
    fn hourly(&mut self, request: &WeatherRequest) -> Result<HourlySeries, RiskError> {
        let (t_lo, t_hi) = (*self.config.temperature.0, *self.config.temperature.1);
        let (h_lo, h_hi) = (*self.config.humidity.0, *self.config.humidity.1);
        check_range("temperature", t_lo, t_hi)?;
        check_range("humidity", h_lo, h_hi)?;

        let salt = request.city.to_lowercase();
        let mut rng = StdRng::seed_from_u64(request_seed(self.seed, request.date, salt));
        debug!(city = %request.city, date = %request.date, "sampling synthetic weather");

        let temperatures: Vec<f64> = (0..HOURS_PER_DAY).map(|_| rng.random_range(t_lo..t_hi)).collect();
        let humidities: Vec<f64> = (0..HOURS_PER_DAY).map(|_| rng.random_range(h_lo..h_hi)).collect();

        HourlySeries::new(
            temperatures
                .into_iter()
                .zip(humidities)
                .enumerate()
                .map(|(hour, (t, h))| HourlySample::new(hour as u8, Celsius::new(t), Percent::new(h)))
                .collect(),
        )
    }
}

//! Hourly heat index and heat-stress classification
//!
//! Implements the Steadman-style apparent temperature polynomial in air
//! temperature `T` (°C) and relative humidity `H` (%):
//!
//! ```text
//! HI = -8.784695 + 1.61139411*T + 2.338549*H - 0.14611605*T*H
//!      - 0.012308094*T^2 - 0.016424828*H^2
//!      + 0.002211732*T^2*H + 0.00072546*T*H^2
//!      - 0.000003582*T^2*H^2
//! ```
//!
//! The coefficients and term structure must stay exactly as written; outputs
//! are compared against values computed with this polynomial elsewhere.

use crate::core_types::units::{Celsius, Percent};
use crate::error::RiskError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of samples in a daily series
pub const HOURS_PER_DAY: usize = 24;

/// Heat index polynomial coefficients, in the order they appear in the formula
pub mod coefficients {
    /// Constant term
    pub const C1: f64 = -8.784695;
    /// `T`
    pub const C2: f64 = 1.61139411;
    /// `H`
    pub const C3: f64 = 2.338549;
    /// `T*H`
    pub const C4: f64 = -0.14611605;
    /// `T^2`
    pub const C5: f64 = -0.012308094;
    /// `H^2`
    pub const C6: f64 = -0.016424828;
    /// `T^2*H`
    pub const C7: f64 = 0.002211732;
    /// `T*H^2`
    pub const C8: f64 = 0.00072546;
    /// `T^2*H^2`
    pub const C9: f64 = -0.000003582;
}

/// Default heat index thresholds in °C.
///
/// Lower bounds are inclusive: a heat index of exactly 30.0 is `Caution`.
pub mod heat_thresholds {
    /// Heat index at or above this is `Caution`
    pub const CAUTION: f64 = 30.0;

    /// Heat index at or above this is `Extreme`
    pub const EXTREME: f64 = 38.0;
}

/// Heat index for one temperature/humidity pair
///
/// NaN and infinite inputs propagate into the result.
#[must_use]
pub fn heat_index(temperature: Celsius, humidity: Percent) -> f64 {
    use coefficients::{C1, C2, C3, C4, C5, C6, C7, C8, C9};

    let t = *temperature;
    let h = *humidity;
    let t2 = t * t;
    let h2 = h * h;
    C1 + C2 * t + C3 * h + C4 * t * h + C5 * t2 + C6 * h2
        + C7 * t2 * h
        + C8 * t * h2
        + C9 * t2 * h2
}

/// Heat-stress bucket for one hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeatRiskLevel {
    /// Below the caution threshold
    Safe,
    /// At or above caution, below extreme
    Caution,
    /// At or above the extreme threshold
    Extreme,
    /// Heat index is NaN (malformed input data)
    Unknown,
}

impl HeatRiskLevel {
    /// Every level, in ascending severity with `Unknown` last
    pub const ALL: [HeatRiskLevel; 4] = [
        HeatRiskLevel::Safe,
        HeatRiskLevel::Caution,
        HeatRiskLevel::Extreme,
        HeatRiskLevel::Unknown,
    ];

    /// Display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            HeatRiskLevel::Safe => "Safe",
            HeatRiskLevel::Caution => "Caution",
            HeatRiskLevel::Extreme => "Extreme",
            HeatRiskLevel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HeatRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Heat index thresholds separating heat risk levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatThresholds {
    caution: f64,
    extreme: f64,
}

impl Default for HeatThresholds {
    fn default() -> Self {
        Self {
            caution: heat_thresholds::CAUTION,
            extreme: heat_thresholds::EXTREME,
        }
    }
}

impl HeatThresholds {
    /// Create custom thresholds
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidThresholds`] unless both values are finite and
    /// `caution < extreme`.
    pub fn new(caution: f64, extreme: f64) -> Result<Self, RiskError> {
        if !caution.is_finite() || !extreme.is_finite() || caution >= extreme {
            return Err(RiskError::InvalidThresholds(format!(
                "heat thresholds need finite caution < extreme, got caution={caution} extreme={extreme}"
            )));
        }
        Ok(Self { caution, extreme })
    }

    /// Inclusive lower bound of `Caution`
    #[must_use]
    pub fn caution(&self) -> f64 {
        self.caution
    }

    /// Inclusive lower bound of `Extreme`
    #[must_use]
    pub fn extreme(&self) -> f64 {
        self.extreme
    }

    /// Bucket a heat index value
    #[must_use]
    pub fn classify(&self, heat_index: f64) -> HeatRiskLevel {
        match heat_index {
            hi if hi.is_nan() => HeatRiskLevel::Unknown,
            hi if hi < self.caution => HeatRiskLevel::Safe,
            hi if hi < self.extreme => HeatRiskLevel::Caution,
            _ => HeatRiskLevel::Extreme,
        }
    }
}

/// Weather observation or forecast for one hour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Air temperature
    pub temperature: Celsius,
    /// Relative humidity
    pub humidity: Percent,
}

impl HourlySample {
    /// Create a sample
    #[must_use]
    pub fn new(hour: u8, temperature: Celsius, humidity: Percent) -> Self {
        Self {
            hour,
            temperature,
            humidity,
        }
    }
}

/// One sample per hour of a single day, ordered by hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    samples: Vec<HourlySample>,
}

impl HourlySeries {
    /// Build a series from samples in any order
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidSeries`] unless there are exactly 24 samples
    /// covering each hour 0-23 once.
    pub fn new(mut samples: Vec<HourlySample>) -> Result<Self, RiskError> {
        if samples.len() != HOURS_PER_DAY {
            return Err(RiskError::InvalidSeries(format!(
                "expected {HOURS_PER_DAY} samples, got {}",
                samples.len()
            )));
        }
        samples.sort_by_key(|s| s.hour);
        if let Some((index, sample)) = samples
            .iter()
            .enumerate()
            .find(|(index, s)| usize::from(s.hour) != *index)
        {
            return Err(RiskError::InvalidSeries(format!(
                "hour {} out of place at position {index} (hours must cover 0-23 once)",
                sample.hour
            )));
        }
        Ok(Self { samples })
    }

    /// Build a series from per-hour temperature and humidity arrays, index = hour
    #[must_use]
    pub fn from_hourly(
        temperatures: [Celsius; HOURS_PER_DAY],
        humidities: [Percent; HOURS_PER_DAY],
    ) -> Self {
        let samples = temperatures
            .into_iter()
            .zip(humidities)
            .enumerate()
            .map(|(hour, (t, h))| HourlySample::new(hour as u8, t, h))
            .collect();
        Self { samples }
    }

    /// Samples ordered by hour
    #[must_use]
    pub fn samples(&self) -> &[HourlySample] {
        &self.samples
    }
}

/// Heat index and level for one hour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyHeatRisk {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Air temperature the index was computed from
    pub temperature: Celsius,
    /// Relative humidity the index was computed from
    pub humidity: Percent,
    /// Heat index in °C
    pub heat_index: f64,
    /// Classified level
    pub level: HeatRiskLevel,
}

/// Heat index and level for every hour of a day, ordered by hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedHourlySeries {
    hours: Vec<HourlyHeatRisk>,
    thresholds: HeatThresholds,
}

impl ClassifiedHourlySeries {
    /// Classified hours, ordered by hour
    #[must_use]
    pub fn hours(&self) -> &[HourlyHeatRisk] {
        &self.hours
    }

    /// Thresholds the levels were assigned with
    #[must_use]
    pub fn thresholds(&self) -> &HeatThresholds {
        &self.thresholds
    }

    /// Entry for a given hour of day
    #[must_use]
    pub fn at_hour(&self, hour: u8) -> Option<&HourlyHeatRisk> {
        self.hours.get(usize::from(hour))
    }
}

/// Compute and classify the heat index for each hour of a series
#[must_use]
pub fn compute_heat_index(
    series: &HourlySeries,
    thresholds: &HeatThresholds,
) -> ClassifiedHourlySeries {
    let hours = series
        .samples()
        .iter()
        .map(|s| {
            let hi = heat_index(s.temperature, s.humidity);
            HourlyHeatRisk {
                hour: s.hour,
                temperature: s.temperature,
                humidity: s.humidity,
                heat_index: hi,
                level: thresholds.classify(hi),
            }
        })
        .collect();

    ClassifiedHourlySeries {
        hours,
        thresholds: *thresholds,
    }
}

//! End-to-end risk assessment for a city and day
//!
//! Pulls a grid sample and an hourly series from the configured sources, then
//! runs the two independent pipelines:
//!
//! - elevation + rainfall → normalize → flood model
//! - temperature + humidity → heat index model
//!
//! and summarizes both.

use crate::city::CityPreset;
use crate::config::{NormalizationPolicy, RiskConfig};
use crate::error::RiskError;
use crate::flood::{compute_flood_risk, FloodRiskField};
use crate::heat::{compute_heat_index, ClassifiedHourlySeries};
use crate::insight::{aggregate_insights, Insight};
use crate::normalize::{normalize_with_policy, NormalizedField, ValueRange};
use crate::sources::{GridRequest, GridSource, WeatherRequest, WeatherSource};
use crate::grid::Field;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// City and day to assess
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    /// City, including the rectangle to grid
    pub city: CityPreset,
    /// Day of interest
    pub date: NaiveDate,
}

impl AssessmentRequest {
    /// Create a request
    #[must_use]
    pub fn new(city: CityPreset, date: NaiveDate) -> Self {
        Self { city, date }
    }
}

/// Classified outputs and summary for one city and day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// City name
    pub city: String,
    /// Day assessed
    pub date: NaiveDate,
    /// Per-cell flood risk
    pub flood: FloodRiskField,
    /// Per-hour heat risk
    pub heat: ClassifiedHourlySeries,
    /// Summary statistics
    pub insight: Insight,
}

/// Run the flood and heat pipelines for a request
///
/// # Errors
///
/// - [`RiskError::Source`] and field/series construction errors from the sources
/// - [`RiskError::ShapeMismatch`] when elevation and rainfall grids differ
/// - [`RiskError::DegenerateRange`] when a field has no spread and the config
///   has no fallback
pub fn assess<G, W>(
    grid_source: &mut G,
    weather_source: &mut W,
    request: &AssessmentRequest,
    config: &RiskConfig,
) -> Result<Assessment, RiskError>
where
    G: GridSource + ?Sized,
    W: WeatherSource + ?Sized,
{
    info!(city = %request.city.name, date = %request.date, "starting risk assessment");

    let sample = grid_source.sample(&GridRequest {
        bounds: request.city.bounds,
        date: request.date,
    })?;
    sample.elevation.ensure_same_shape(&sample.rainfall)?;

    let elevation_norm = normalize_input("elevation", &sample.elevation, sample.elevation_range, config)?;
    let rainfall_norm = normalize_input("rainfall", &sample.rainfall, sample.rainfall_range, config)?;
    let flood = compute_flood_risk(&elevation_norm, &rainfall_norm, &config.flood)?;

    let series = weather_source.hourly(&WeatherRequest {
        city: request.city.name.clone(),
        date: request.date,
    })?;
    let heat = compute_heat_index(&series, &config.heat);

    let insight = aggregate_insights(&flood, &heat);
    info!(
        high_flood_cells = insight.flood.high_risk_cells(),
        total_cells = insight.flood.total_cells,
        extreme_heat_hours = insight.heat.extreme_hours(),
        peak_heat_index = insight.heat.peak.map(|p| p.heat_index),
        "risk assessment complete"
    );

    Ok(Assessment {
        city: request.city.name.clone(),
        date: request.date,
        flood,
        heat,
        insight,
    })
}

/// Normalize one input field under the configured policy
fn normalize_input(
    name: &str,
    field: &Field,
    regional: Option<ValueRange>,
    config: &RiskConfig,
) -> Result<NormalizedField, RiskError> {
    let range = match config.normalization {
        NormalizationPolicy::SampleLocal => None,
        NormalizationPolicy::Regional => {
            if regional.is_none() {
                warn!(field = name, "no regional range from source, using sample extrema");
            }
            regional
        }
    };
    let normalized = normalize_with_policy(field, range, config.degenerate_range)?;
    debug!(field = name, range = ?normalized.range(), "normalized input");
    Ok(normalized)
}

//! Flood risk from normalized elevation and rainfall
//!
//! Each cell scores `rainfall * (1 - elevation)` on normalized inputs, so
//! low-lying cells that receive the most rain score highest. Scores are then
//! bucketed into [`FloodRiskLevel`]s with [`FloodThresholds`].

use crate::error::RiskError;
use crate::grid::Field;
use crate::normalize::NormalizedField;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Default flood score thresholds.
///
/// A score strictly above a threshold falls into the level above it, so a
/// score of exactly 0.7 is still `Medium`.
pub mod flood_thresholds {
    /// Scores above this are `High`
    pub const HIGH: f64 = 0.7;

    /// Scores above this (and not above [`HIGH`]) are `Medium`
    pub const MEDIUM: f64 = 0.4;
}

/// Discrete flood risk bucket for one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FloodRiskLevel {
    /// Score at or below the medium threshold
    Low,
    /// Score above the medium threshold, at or below the high threshold
    Medium,
    /// Score above the high threshold
    High,
    /// Score is NaN (malformed input data)
    Unknown,
}

impl FloodRiskLevel {
    /// Every level, in ascending severity with `Unknown` last
    pub const ALL: [FloodRiskLevel; 4] = [
        FloodRiskLevel::Low,
        FloodRiskLevel::Medium,
        FloodRiskLevel::High,
        FloodRiskLevel::Unknown,
    ];

    /// Display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FloodRiskLevel::Low => "Low",
            FloodRiskLevel::Medium => "Medium",
            FloodRiskLevel::High => "High",
            FloodRiskLevel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FloodRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score thresholds separating flood risk levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloodThresholds {
    medium: f64,
    high: f64,
}

impl Default for FloodThresholds {
    fn default() -> Self {
        Self {
            medium: flood_thresholds::MEDIUM,
            high: flood_thresholds::HIGH,
        }
    }
}

impl FloodThresholds {
    /// Create custom thresholds
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidThresholds`] unless both values are finite and
    /// `medium < high`.
    pub fn new(medium: f64, high: f64) -> Result<Self, RiskError> {
        if !medium.is_finite() || !high.is_finite() || medium >= high {
            return Err(RiskError::InvalidThresholds(format!(
                "flood thresholds need finite medium < high, got medium={medium} high={high}"
            )));
        }
        Ok(Self { medium, high })
    }

    /// Lower bound (exclusive) of `Medium`
    #[must_use]
    pub fn medium(&self) -> f64 {
        self.medium
    }

    /// Lower bound (exclusive) of `High`
    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Bucket a score
    #[must_use]
    pub fn classify(&self, score: f64) -> FloodRiskLevel {
        match score {
            s if s.is_nan() => FloodRiskLevel::Unknown,
            s if s > self.high => FloodRiskLevel::High,
            s if s > self.medium => FloodRiskLevel::Medium,
            _ => FloodRiskLevel::Low,
        }
    }
}

/// Flood score for one cell from its normalized elevation and rainfall
#[inline]
#[must_use]
pub fn flood_score(elevation_norm: f64, rainfall_norm: f64) -> f64 {
    rainfall_norm * (1.0 - elevation_norm)
}

/// One classified cell, placed on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellRisk {
    /// Grid row
    pub row: usize,
    /// Grid column
    pub col: usize,
    /// Cell latitude
    pub latitude: f64,
    /// Cell longitude
    pub longitude: f64,
    /// Flood score in [0, 1] (NaN for malformed input)
    pub score: f64,
    /// Classified level
    pub level: FloodRiskLevel,
}

/// Scores and levels for every cell of a grid
///
/// Immutable once produced by [`compute_flood_risk`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodRiskField {
    scores: Field,
    levels: Vec<FloodRiskLevel>,
    thresholds: FloodThresholds,
}

impl FloodRiskField {
    /// Build a risk field by classifying precomputed scores
    #[must_use]
    pub fn from_scores(scores: Field, thresholds: FloodThresholds) -> Self {
        let levels = scores
            .as_slice()
            .par_iter()
            .map(|&s| thresholds.classify(s))
            .collect();
        Self {
            scores,
            levels,
            thresholds,
        }
    }

    /// Per-cell scores
    #[must_use]
    pub fn scores(&self) -> &Field {
        &self.scores
    }

    /// Per-cell levels, row-major
    #[must_use]
    pub fn levels(&self) -> &[FloodRiskLevel] {
        &self.levels
    }

    /// Thresholds the levels were assigned with
    #[must_use]
    pub fn thresholds(&self) -> &FloodThresholds {
        &self.thresholds
    }

    /// `(rows, cols)`
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.scores.shape()
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; fields have at least one cell
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level at `(row, col)`, or `None` when out of bounds
    #[must_use]
    pub fn level_at(&self, row: usize, col: usize) -> Option<FloodRiskLevel> {
        let (rows, cols) = self.shape();
        (row < rows && col < cols).then(|| self.levels[row * cols + col])
    }

    /// Every cell with its map location, row-major
    pub fn cells(&self) -> impl Iterator<Item = CellRisk> + '_ {
        let (rows, cols) = self.shape();
        let bounds = *self.scores.bounds();
        self.scores
            .as_slice()
            .iter()
            .zip(&self.levels)
            .enumerate()
            .map(move |(index, (&score, &level))| {
                let (row, col) = (index / cols, index % cols);
                let (latitude, longitude) = bounds.cell_center(row, col, rows, cols);
                CellRisk {
                    row,
                    col,
                    latitude,
                    longitude,
                    score,
                    level,
                }
            })
    }
}

/// Score and classify every cell of a grid
///
/// # Errors
///
/// Returns [`RiskError::ShapeMismatch`] when the two fields have different
/// dimensions. No partial result is produced.
pub fn compute_flood_risk(
    elevation_norm: &NormalizedField,
    rainfall_norm: &NormalizedField,
    thresholds: &FloodThresholds,
) -> Result<FloodRiskField, RiskError> {
    elevation_norm
        .field()
        .ensure_same_shape(rainfall_norm.field())?;

    let scores: Vec<f64> = elevation_norm
        .as_slice()
        .par_iter()
        .zip(rainfall_norm.as_slice().par_iter())
        .map(|(&elevation, &rainfall)| flood_score(elevation, rainfall))
        .collect();

    let (rows, cols) = elevation_norm.shape();
    debug!(rows, cols, "scored flood risk grid");

    Ok(FloodRiskField::from_scores(
        elevation_norm.field().with_data(scores),
        *thresholds,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::GeoBounds;
    use crate::normalize::{normalize, ValueRange};

    fn unit(rows: usize, cols: usize, values: Vec<f64>) -> NormalizedField {
        let field = Field::from_vec(rows, cols, values, GeoBounds::new(0.0, 1.0, 0.0, 1.0)).unwrap();
        normalize(&field, Some(ValueRange::new(0.0, 1.0))).unwrap()
    }

    #[test]
    fn test_classification_thresholds() {
        let t = FloodThresholds::default();
        assert_eq!(t.classify(0.71), FloodRiskLevel::High);
        assert_eq!(t.classify(0.7), FloodRiskLevel::Medium);
        assert_eq!(t.classify(0.41), FloodRiskLevel::Medium);
        assert_eq!(t.classify(0.4), FloodRiskLevel::Low);
        assert_eq!(t.classify(0.0), FloodRiskLevel::Low);
        assert_eq!(t.classify(f64::NAN), FloodRiskLevel::Unknown);
    }

    #[test]
    fn test_extreme_cells() {
        // (elevation, rainfall): lowest/wettest, dry, highest
        let elevation = unit(1, 3, vec![0.0, 0.3, 1.0]);
        let rainfall = unit(1, 3, vec![1.0, 0.0, 0.9]);
        let risk = compute_flood_risk(&elevation, &rainfall, &FloodThresholds::default()).unwrap();

        assert_eq!(risk.scores().as_slice(), &[1.0, 0.0, 0.0]);
        assert_eq!(
            risk.levels(),
            &[FloodRiskLevel::High, FloodRiskLevel::Low, FloodRiskLevel::Low]
        );
    }

    #[test]
    fn test_scores_stay_in_unit_interval() {
        let values: Vec<f64> = (0..100).map(|i| f64::from(i) / 99.0).collect();
        let reversed: Vec<f64> = values.iter().rev().copied().collect();
        let risk = compute_flood_risk(
            &unit(10, 10, values),
            &unit(10, 10, reversed),
            &FloodThresholds::default(),
        )
        .unwrap();
        assert!(risk.scores().as_slice().iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_shape_mismatch() {
        let a = unit(10, 10, vec![0.5; 100]);
        let b = unit(10, 12, vec![0.5; 120]);
        let result = compute_flood_risk(&a, &b, &FloodThresholds::default());
        assert_eq!(
            result,
            Err(RiskError::ShapeMismatch {
                expected: (10, 10),
                found: (10, 12)
            })
        );
    }

    #[test]
    fn test_nan_propagates_to_unknown() {
        let elevation = unit(1, 2, vec![f64::NAN, 0.5]);
        let rainfall = unit(1, 2, vec![0.5, 0.5]);
        let risk = compute_flood_risk(&elevation, &rainfall, &FloodThresholds::default()).unwrap();
        assert!(risk.scores().as_slice()[0].is_nan());
        assert_eq!(risk.levels()[0], FloodRiskLevel::Unknown);
        assert_eq!(risk.levels()[1], FloodRiskLevel::Low);
    }

    #[test]
    fn test_custom_thresholds() {
        assert!(FloodThresholds::new(0.7, 0.4).is_err());
        assert!(FloodThresholds::new(f64::NAN, 0.4).is_err());
        let strict = FloodThresholds::new(0.1, 0.2).unwrap();
        assert_eq!(strict.classify(0.25), FloodRiskLevel::High);
        assert_eq!(strict.classify(0.15), FloodRiskLevel::Medium);
    }

    #[test]
    fn test_cells_carry_map_location() {
        let field = Field::from_vec(2, 2, vec![0.9, 0.5, 0.1, 0.0], GeoBounds::new(10.0, 11.0, 20.0, 22.0))
            .unwrap();
        let risk = FloodRiskField::from_scores(field, FloodThresholds::default());
        let cells: Vec<CellRisk> = risk.cells().collect();
        assert_eq!(cells.len(), 4);
        assert_eq!((cells[0].latitude, cells[0].longitude), (10.0, 20.0));
        assert_eq!((cells[3].row, cells[3].col), (1, 1));
        assert_eq!((cells[3].latitude, cells[3].longitude), (11.0, 22.0));
        assert_eq!(cells[1].level, FloodRiskLevel::Medium);
        assert_eq!(risk.level_at(0, 0), Some(FloodRiskLevel::High));
        assert_eq!(risk.level_at(2, 0), None);
    }
}

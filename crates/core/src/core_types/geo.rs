//! Geographic bounding rectangles and cell placement

use serde::{Deserialize, Serialize};

/// Latitude/longitude rectangle a grid is laid over.
///
/// Only used to place cells on a map; the risk models never read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// Southern edge in decimal degrees
    pub lat_min: f64,
    /// Northern edge in decimal degrees
    pub lat_max: f64,
    /// Western edge in decimal degrees
    pub lon_min: f64,
    /// Eastern edge in decimal degrees
    pub lon_max: f64,
}

impl GeoBounds {
    /// Create bounds from edges
    #[must_use]
    pub const fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Square-ish bounds extending `half_extent` degrees each way from a centre point
    #[must_use]
    pub fn around(lat: f64, lon: f64, half_extent: f64) -> Self {
        Self::new(
            lat - half_extent,
            lat + half_extent,
            lon - half_extent,
            lon + half_extent,
        )
    }

    /// Centre point as `(lat, lon)`
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.lat_min + self.lat_max) / 2.0,
            (self.lon_min + self.lon_max) / 2.0,
        )
    }

    /// Whether a point lies inside the rectangle (edges inclusive)
    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }

    /// Location of cell `(row, col)` in a `rows x cols` grid as `(lat, lon)`.
    ///
    /// Rows and columns are spaced evenly from the minimum to the maximum edge,
    /// both edges included, so row 0 sits on `lat_min` and the last row on `lat_max`.
    #[must_use]
    pub fn cell_center(&self, row: usize, col: usize, rows: usize, cols: usize) -> (f64, f64) {
        (
            linspace_at(self.lat_min, self.lat_max, row, rows),
            linspace_at(self.lon_min, self.lon_max, col, cols),
        )
    }
}

/// Value at `index` of `count` evenly spaced samples over `[start, end]`
fn linspace_at(start: f64, end: f64, index: usize, count: usize) -> f64 {
    if count <= 1 {
        return start;
    }
    if index + 1 >= count {
        return end;
    }
    start + (end - start) * index as f64 / (count - 1) as f64
}

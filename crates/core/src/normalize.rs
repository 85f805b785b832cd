//! Min/max normalization of fields onto [0, 1]
//!
//! Each value `v` maps to `(v - lo) / (hi - lo)`, clamped to [0, 1] so that
//! samples falling slightly outside an externally supplied range (computed at a
//! different resolution, for example) still land in the unit interval. NaN
//! samples stay NaN.

use crate::error::RiskError;
use crate::grid::Field;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Reference range `[lo, hi]` for normalization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Value mapped to 0.0
    pub lo: f64,
    /// Value mapped to 1.0
    pub hi: f64,
}

impl ValueRange {
    /// Create a range (not validated; see [`ValueRange::is_degenerate`])
    #[must_use]
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Observed extrema of a field, ignoring NaN cells
    #[must_use]
    pub fn of_field(field: &Field) -> Option<Self> {
        field.min_max().map(|(lo, hi)| Self::new(lo, hi))
    }

    /// True when the range can't be used to normalize: zero width, inverted,
    /// or a bound that is NaN or infinite
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.lo.is_finite() && self.hi.is_finite() && self.hi > self.lo)
    }

    /// Width of the range
    #[must_use]
    pub fn span(&self) -> f64 {
        self.hi - self.lo
    }

    /// Normalize a single value, clamped to [0, 1]
    #[inline]
    #[must_use]
    pub fn unit_scale(&self, value: f64) -> f64 {
        let span = self.span();
        let scaled = if span.is_finite() {
            (value - self.lo) / span
        } else {
            // Finite bounds whose difference overflows: halve before subtracting
            (value / 2.0 - self.lo / 2.0) / (self.hi / 2.0 - self.lo / 2.0)
        };
        scaled.clamp(0.0, 1.0)
    }
}

/// What to do when a normalization range has no width
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DegenerateRangePolicy {
    /// Surface [`RiskError::DegenerateRange`] to the caller
    #[default]
    Fail,
    /// Treat the whole field as a single level: every non-NaN cell becomes this
    /// value (clamped to [0, 1])
    Uniform(f64),
}

/// A field whose values lie in [0, 1] (or are NaN)
///
/// Only constructed by [`normalize`] and [`normalize_with_policy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedField {
    field: Field,
    range: Option<ValueRange>,
}

impl NormalizedField {
    /// Underlying normalized values
    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Range the field was scaled with; `None` when a uniform fallback was applied
    #[must_use]
    pub fn range(&self) -> Option<ValueRange> {
        self.range
    }

    /// `(rows, cols)` of the grid
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.field.shape()
    }

    /// Row-major normalized values
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        self.field.as_slice()
    }

    /// Consume into the plain field
    #[must_use]
    pub fn into_field(self) -> Field {
        self.field
    }
}

/// Normalize a field onto [0, 1]
///
/// With `range = None` the field's own observed min/max is used.
///
/// # Errors
///
/// Returns [`RiskError::DegenerateRange`] when `hi <= lo`, a bound is NaN or
/// infinite, or the field has no non-NaN sample.
pub fn normalize(field: &Field, range: Option<ValueRange>) -> Result<NormalizedField, RiskError> {
    let range = resolve_range(field, range);
    if range.is_degenerate() {
        return Err(RiskError::DegenerateRange {
            lo: range.lo,
            hi: range.hi,
        });
    }
    debug!(lo = range.lo, hi = range.hi, cells = field.len(), "normalizing field");

    Ok(NormalizedField {
        field: field.map(|v| range.unit_scale(v)),
        range: Some(range),
    })
}

/// Normalize a field, falling back according to `policy` on a degenerate range
///
/// # Errors
///
/// Returns [`RiskError::DegenerateRange`] only under [`DegenerateRangePolicy::Fail`].
pub fn normalize_with_policy(
    field: &Field,
    range: Option<ValueRange>,
    policy: DegenerateRangePolicy,
) -> Result<NormalizedField, RiskError> {
    match (normalize(field, range), policy) {
        (Err(RiskError::DegenerateRange { lo, hi }), DegenerateRangePolicy::Uniform(value)) => {
            let value = value.clamp(0.0, 1.0);
            warn!(lo, hi, value, "degenerate normalization range, using uniform value");
            Ok(NormalizedField {
                field: field.map(|v| if v.is_nan() { v } else { value }),
                range: None,
            })
        }
        (result, _) => result,
    }
}

fn resolve_range(field: &Field, range: Option<ValueRange>) -> ValueRange {
    range
        .or_else(|| ValueRange::of_field(field))
        .unwrap_or(ValueRange::new(f64::NAN, f64::NAN))
}

//! Semantic unit types for the environmental inputs of the risk models
//!
//! Newtype wrappers keep temperatures, humidities, elevations and rainfall
//! depths from being mixed up when they travel from a data source into the
//! models.
//!
//! # Design Philosophy
//! - All quantities are `f64`; the heat index polynomial is evaluated in f64
//! - `Deref` to the raw value so formulas read naturally (`*temp`)
//! - Total ordering via `Ord` (NaN sorts above all values)
//! - Serde support for serialization
//! - Non-finite values are accepted; the models propagate them
//!
//! # Usage
//! ```
//! use hazard_risk_core::core_types::units::{Celsius, Percent};
//!
//! let temp = Celsius::new(35.0);
//! let humidity = Percent::new(60.0);
//! assert!((*temp - 35.0).abs() < f64::EPSILON);
//! assert_eq!(humidity.as_fraction(), 0.6);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Implements total ordering, `Deref<Target = f64>` and the raw conversions
/// shared by every unit in this module.
macro_rules! impl_f64_unit {
    ($name:ident) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }

        impl PartialOrd<f64> for $name {
            fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
                self.0.partial_cmp(other)
            }
        }
    };
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Air temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

impl_f64_unit!(Celsius);

impl Celsius {
    /// Absolute zero in Celsius
    pub const ABSOLUTE_ZERO: Celsius = Celsius(-273.15);

    /// Create a new Celsius temperature. Asserts a finite value is not below
    /// absolute zero.
    ///
    /// NaN and infinities pass the check so malformed upstream data reaches the
    /// models, which propagate it.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(value: f64) -> Self {
        assert!(
            !value.is_finite() || value >= -273.15,
            "Celsius::new: value is below absolute zero (-273.15°C)"
        );
        Celsius(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

// ============================================================================
// HUMIDITY
// ============================================================================

/// Relative humidity in percent of saturation (0-100 for physical air)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(f64);

impl_f64_unit!(Percent);

impl Percent {
    /// Create a new percentage
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Convert to a 0-1 fraction
    #[inline]
    #[must_use]
    pub fn as_fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

// ============================================================================
// ELEVATION / RAINFALL
// ============================================================================

/// Terrain elevation in meters above sea level
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

impl_f64_unit!(Meters);

impl Meters {
    /// Create a new elevation
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}m", self.0)
    }
}

/// Rainfall depth in millimeters (accumulated over a day)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Millimeters(f64);

impl_f64_unit!(Millimeters);

impl Millimeters {
    /// Create a new rainfall depth
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Millimeters(value)
    }
}

impl fmt::Display for Millimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}mm", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_display() {
        assert_eq!(Celsius::new(35.04).to_string(), "35.0°C");
    }

    #[test]
    fn test_celsius_accepts_nan() {
        let t = Celsius::new(f64::NAN);
        assert!(t.is_nan());
    }

    #[test]
    fn test_celsius_accepts_infinities() {
        assert_eq!(*Celsius::new(f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert_eq!(*Celsius::new(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    #[should_panic(expected = "Celsius::new: value is below absolute zero")]
    fn test_celsius_below_absolute_zero_panics() {
        let _ = Celsius::new(-300.0);
    }

    #[test]
    fn test_percent_fraction() {
        assert!((Percent::new(45.0).as_fraction() - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_total_ordering_puts_nan_last() {
        let mut values = vec![Meters::new(f64::NAN), Meters::new(3.0), Meters::new(-1.0)];
        values.sort();
        assert_eq!(*values[0], -1.0);
        assert_eq!(*values[1], 3.0);
        assert!(values[2].is_nan());
    }
}

//! City presets: where each supported city sits and the area assessed around it

use crate::core_types::GeoBounds;
use serde::{Deserialize, Serialize};

/// Half-width in degrees of the default assessment square (~5.5km)
pub const DEFAULT_HALF_EXTENT: f64 = 0.05;

/// A named city with the rectangle its risk grid covers
///
/// # Example
/// ```
/// use hazard_risk_core::CityPreset;
///
/// let mumbai = CityPreset::by_name("mumbai").unwrap();
/// assert!(mumbai.bounds.contains(mumbai.center.0, mumbai.center.1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPreset {
    /// Display name
    pub name: String,
    /// City centre as `(lat, lon)`
    pub center: (f64, f64),
    /// Assessment rectangle
    pub bounds: GeoBounds,
}

impl CityPreset {
    /// Preset centred on a point with the default half-extent
    #[must_use]
    pub fn around(name: &str, lat: f64, lon: f64) -> Self {
        Self {
            name: name.to_string(),
            center: (lat, lon),
            bounds: GeoBounds::around(lat, lon, DEFAULT_HALF_EXTENT),
        }
    }

    /// Mumbai: the island city and western suburbs
    #[must_use]
    pub fn mumbai() -> Self {
        Self {
            name: "Mumbai".to_string(),
            center: (19.0760, 72.8777),
            bounds: GeoBounds::new(18.90, 19.30, 72.75, 73.05),
        }
    }

    /// Delhi: central New Delhi
    #[must_use]
    pub fn delhi() -> Self {
        Self::around("Delhi", 28.6139, 77.2090)
    }

    /// Chennai: central Chennai
    #[must_use]
    pub fn chennai() -> Self {
        Self::around("Chennai", 13.0827, 80.2707)
    }

    /// Every built-in preset
    #[must_use]
    pub fn all() -> Vec<Self> {
        vec![Self::mumbai(), Self::delhi(), Self::chennai()]
    }

    /// Look up a built-in preset, ignoring case
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }
}

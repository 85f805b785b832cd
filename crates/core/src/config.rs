//! Scoring configuration
//!
//! Classification thresholds and normalization behaviour live here rather than
//! inside the formulas, so the policy can be audited and changed without
//! touching the scoring code.

use crate::flood::FloodThresholds;
use crate::heat::HeatThresholds;
use crate::normalize::DegenerateRangePolicy;
use serde::{Deserialize, Serialize};

/// Which extrema elevation and rainfall are normalized against
///
/// The two policies classify the same raw values differently: a grid that
/// only covers part of a region rarely spans the region's full elevation or
/// rainfall range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalizationPolicy {
    /// Each sampled field is scaled by its own min/max
    #[default]
    SampleLocal,
    /// Scale by region-wide extrema reported by the grid source; fields whose
    /// source reports none fall back to their own min/max
    Regional,
}

/// Everything that shapes how raw inputs become risk levels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Flood score thresholds
    pub flood: FloodThresholds,
    /// Heat index thresholds
    pub heat: HeatThresholds,
    /// Extrema used for normalization
    pub normalization: NormalizationPolicy,
    /// Behaviour when a field has no spread to normalize
    pub degenerate_range: DegenerateRangePolicy,
}

impl RiskConfig {
    /// Replace the flood thresholds
    pub fn with_flood_thresholds(mut self, flood: FloodThresholds) -> Self {
        self.flood = flood;
        self
    }

    /// Replace the heat thresholds
    pub fn with_heat_thresholds(mut self, heat: HeatThresholds) -> Self {
        self.heat = heat;
        self
    }

    /// Replace the normalization policy
    pub fn with_normalization(mut self, normalization: NormalizationPolicy) -> Self {
        self.normalization = normalization;
        self
    }

    /// Replace the degenerate range policy
    pub fn with_degenerate_range(mut self, policy: DegenerateRangePolicy) -> Self {
        self.degenerate_range = policy;
        self
    }
}

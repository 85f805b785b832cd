//! Summary statistics over classified flood and heat outputs
//!
//! Counts are taken straight from the classification arrays of the models so
//! that every consumer (map, chart, text report) sees the same numbers.

use crate::flood::{FloodRiskField, FloodRiskLevel};
use crate::heat::{ClassifiedHourlySeries, HeatRiskLevel};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Number of entries in each risk level
///
/// Levels that never occurred read as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts<L: Eq + Hash> {
    counts: FxHashMap<L, usize>,
}

impl<L: Eq + Hash + Copy> LevelCounts<L> {
    /// Tally levels
    pub fn tally<'a>(levels: impl IntoIterator<Item = &'a L>) -> Self
    where
        L: 'a,
    {
        let mut counts = FxHashMap::default();
        for &level in levels {
            *counts.entry(level).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Count for one level
    #[must_use]
    pub fn get(&self, level: L) -> usize {
        self.counts.get(&level).copied().unwrap_or(0)
    }

    /// Sum over all levels
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl<L: Eq + Hash> Default for LevelCounts<L> {
    fn default() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }
}

/// Highest-scoring flood cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloodPeak {
    /// Grid row
    pub row: usize,
    /// Grid column
    pub col: usize,
    /// Flood score
    pub score: f64,
    /// Level of that cell
    pub level: FloodRiskLevel,
}

/// Flood summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodInsight {
    /// Cells per level
    pub counts: LevelCounts<FloodRiskLevel>,
    /// Total cells in the grid
    pub total_cells: usize,
    /// Highest score (first cell in row-major order on ties); `None` if every score is NaN
    pub peak: Option<FloodPeak>,
}

impl FloodInsight {
    /// Cells classified `High`
    #[must_use]
    pub fn high_risk_cells(&self) -> usize {
        self.counts.get(FloodRiskLevel::High)
    }
}

/// Hottest hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatPeak {
    /// Hour of day, 0-23
    pub hour: u8,
    /// Heat index in °C
    pub heat_index: f64,
    /// Level of that hour
    pub level: HeatRiskLevel,
}

/// Heat summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatInsight {
    /// Hours per level
    pub counts: LevelCounts<HeatRiskLevel>,
    /// Highest heat index (earliest hour on ties); `None` if every value is NaN
    pub peak: Option<HeatPeak>,
}

impl HeatInsight {
    /// Hours classified `Extreme`
    #[must_use]
    pub fn extreme_hours(&self) -> usize {
        self.counts.get(HeatRiskLevel::Extreme)
    }
}

/// Summary of one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Flood summary
    pub flood: FloodInsight,
    /// Heat summary
    pub heat: HeatInsight,
}

/// Index and value of the first maximum, skipping NaN
fn first_max(values: impl Iterator<Item = f64>) -> Option<(usize, f64)> {
    values
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best, (i, v)| match best {
            Some((_, best_v)) if best_v >= v => best,
            _ => Some((i, v)),
        })
}

/// Summarize a classified flood grid
#[must_use]
pub fn summarize_flood(flood: &FloodRiskField) -> FloodInsight {
    let scores = flood.scores();
    let peak = first_max(scores.as_slice().iter().copied()).map(|(index, score)| {
        let (row, col) = scores.position(index);
        FloodPeak {
            row,
            col,
            score,
            level: flood.levels()[index],
        }
    });

    FloodInsight {
        counts: LevelCounts::tally(flood.levels()),
        total_cells: flood.len(),
        peak,
    }
}

/// Summarize a classified hourly heat series
#[must_use]
pub fn summarize_heat(heat: &ClassifiedHourlySeries) -> HeatInsight {
    let hours = heat.hours();
    let peak = first_max(hours.iter().map(|h| h.heat_index)).map(|(index, heat_index)| HeatPeak {
        hour: hours[index].hour,
        heat_index,
        level: hours[index].level,
    });

    HeatInsight {
        counts: LevelCounts::tally(hours.iter().map(|h| &h.level)),
        peak,
    }
}

/// Derive flood and heat summaries from classified model outputs
#[must_use]
pub fn aggregate_insights(flood: &FloodRiskField, heat: &ClassifiedHourlySeries) -> Insight {
    Insight {
        flood: summarize_flood(flood),
        heat: summarize_heat(heat),
    }
}

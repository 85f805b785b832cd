//! End-to-end tests of the flood and heat pipelines
//!
//! These exercise the public API the way a presentation layer would: sample
//! data, normalize, score, classify, summarize.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use hazard_risk_core::sources::{
    StaticGridSource, StaticWeatherSource, SyntheticGridConfig, SyntheticGridSource,
    SyntheticWeatherSource,
};
use hazard_risk_core::{
    aggregate_insights, assess, compute_flood_risk, compute_heat_index, heat_index, normalize,
    AssessmentRequest, Celsius, CityPreset, Field, FloodRiskLevel, FloodThresholds, GeoBounds,
    HeatRiskLevel, HeatThresholds, HourlySample, HourlySeries, Percent, RiskConfig, RiskError,
    ValueRange,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn mumbai_bounds() -> GeoBounds {
    CityPreset::mumbai().bounds
}

fn request(city: CityPreset) -> AssessmentRequest {
    AssessmentRequest::new(city, NaiveDate::from_ymd_opt(2024, 7, 26).unwrap())
}

/// Build an elevation/rainfall pair whose flood scores under a unit range are
/// exactly `targets`: flat zero elevation, rainfall carries the score.
fn fields_for_scores(targets: &[f64], rows: usize, cols: usize) -> (Field, Field) {
    let elevation = vec![0.0; rows * cols];
    let rainfall = targets.to_vec();
    (
        Field::from_vec(rows, cols, elevation, mumbai_bounds()).unwrap(),
        Field::from_vec(rows, cols, rainfall, mumbai_bounds()).unwrap(),
    )
}

#[test]
fn test_flood_counts_3_high_5_medium_42_low() {
    let mut targets = vec![0.95, 0.8, 0.71];
    targets.extend([0.45, 0.5, 0.6, 0.65, 0.7]);
    targets.extend((0..42).map(|i| f64::from(i) * 0.009));
    let (elevation, rainfall) = fields_for_scores(&targets, 5, 10);

    let unit = Some(ValueRange::new(0.0, 1.0));
    let elevation_norm = normalize(&elevation, unit).unwrap();
    let rainfall_norm = normalize(&rainfall, unit).unwrap();
    let flood =
        compute_flood_risk(&elevation_norm, &rainfall_norm, &FloodThresholds::default()).unwrap();

    let series = HourlySeries::from_hourly([Celsius::new(25.0); 24], [Percent::new(50.0); 24]);
    let heat = compute_heat_index(&series, &HeatThresholds::default());
    let insight = aggregate_insights(&flood, &heat);

    assert_eq!(insight.flood.counts.get(FloodRiskLevel::High), 3);
    assert_eq!(insight.flood.counts.get(FloodRiskLevel::Medium), 5);
    assert_eq!(insight.flood.counts.get(FloodRiskLevel::Low), 42);
    assert_eq!(insight.flood.counts.total(), 50);
    assert_eq!(insight.heat.counts.total(), 24);
}

#[test]
fn test_normalized_extrema_and_flood_bounds() {
    let elevation = Field::from_rows(
        &[vec![3.0, 12.0, 48.0], vec![0.5, 25.0, 7.0]],
        mumbai_bounds(),
    )
    .unwrap();
    let rainfall = Field::from_rows(
        &[vec![180.0, 60.0, 75.0], vec![199.0, 120.0, 51.0]],
        mumbai_bounds(),
    )
    .unwrap();

    let elevation_norm = normalize(&elevation, None).unwrap();
    let rainfall_norm = normalize(&rainfall, None).unwrap();
    assert_eq!(elevation_norm.field().get(1, 0), Some(0.0));
    assert_eq!(elevation_norm.field().get(0, 2), Some(1.0));
    assert_eq!(rainfall_norm.field().get(1, 2), Some(0.0));
    assert_eq!(rainfall_norm.field().get(1, 0), Some(1.0));

    let flood =
        compute_flood_risk(&elevation_norm, &rainfall_norm, &FloodThresholds::default()).unwrap();
    assert!(flood.scores().as_slice().iter().all(|s| (0.0..=1.0).contains(s)));
    // Lowest and wettest cell coincide
    assert_eq!(flood.scores().get(1, 0), Some(1.0));
    assert_eq!(flood.level_at(1, 0), Some(FloodRiskLevel::High));
    // Driest cell scores zero whatever its elevation
    assert_eq!(flood.scores().get(1, 2), Some(0.0));
    assert_eq!(flood.level_at(1, 2), Some(FloodRiskLevel::Low));
}

#[test]
fn test_shape_mismatch_has_no_partial_result() {
    let a = normalize(
        &Field::from_vec(10, 10, (0..100).map(f64::from).collect(), mumbai_bounds()).unwrap(),
        None,
    )
    .unwrap();
    let b = normalize(
        &Field::from_vec(10, 12, (0..120).map(f64::from).collect(), mumbai_bounds()).unwrap(),
        None,
    )
    .unwrap();

    let result = compute_flood_risk(&a, &b, &FloodThresholds::default());
    assert!(matches!(result, Err(RiskError::ShapeMismatch { .. })));
}

#[test]
fn test_constant_field_is_degenerate() {
    let flat = Field::with_value(4, 4, 5.0, mumbai_bounds()).unwrap();
    assert_eq!(
        normalize(&flat, None),
        Err(RiskError::DegenerateRange { lo: 5.0, hi: 5.0 })
    );
}

#[test]
fn test_heat_index_round_trip_and_boundaries() {
    let (t, h) = (35.0_f64, 60.0_f64);
    let direct = -8.784695 + 1.61139411 * t + 2.338549 * h - 0.14611605 * t * h
        - 0.012308094 * t * t
        - 0.016424828 * h * h
        + 0.002211732 * t * t * h
        + 0.00072546 * t * h * h
        - 0.000003582 * t * t * h * h;
    assert_relative_eq!(heat_index(Celsius::new(t), Percent::new(h)), direct, epsilon = 1e-9);

    let thresholds = HeatThresholds::default();
    assert_eq!(thresholds.classify(29.999), HeatRiskLevel::Safe);
    assert_eq!(thresholds.classify(30.0), HeatRiskLevel::Caution);
    assert_eq!(thresholds.classify(37.999), HeatRiskLevel::Caution);
    assert_eq!(thresholds.classify(38.0), HeatRiskLevel::Extreme);
}

#[test]
fn test_peak_heat_tie_reports_lower_hour() {
    let samples: Vec<HourlySample> = (0..24u8)
        .map(|hour| {
            let t = if hour == 13 || hour == 14 { 39.0 } else { 31.0 };
            HourlySample::new(hour, Celsius::new(t), Percent::new(55.0))
        })
        .rev()
        .collect();
    let series = HourlySeries::new(samples).unwrap();
    let heat = compute_heat_index(&series, &HeatThresholds::default());

    let flood_field = Field::with_value(1, 1, 0.0, mumbai_bounds()).unwrap();
    let flood = hazard_risk_core::FloodRiskField::from_scores(flood_field, FloodThresholds::default());
    let insight = aggregate_insights(&flood, &heat);

    let peak = insight.heat.peak.unwrap();
    assert_eq!(peak.hour, 13);
    assert_eq!(insight.heat.extreme_hours(), 2);
}

#[test]
fn test_synthetic_assessment_is_deterministic() {
    let config = RiskConfig::default();
    let run = |seed: u64| {
        assess(
            &mut SyntheticGridSource::new(seed),
            &mut SyntheticWeatherSource::new(seed),
            &request(CityPreset::mumbai()),
            &config,
        )
        .unwrap()
    };

    let first = run(42);
    let second = run(42);
    assert_eq!(first, second);
    assert_eq!(first.insight.flood.total_cells, 2500);
    assert_eq!(first.insight.flood.counts.total(), 2500);
    assert_eq!(first.insight.heat.counts.total(), 24);
    assert_eq!(first.insight.flood.counts.get(FloodRiskLevel::Unknown), 0);
    assert_eq!(first.insight.heat.counts.get(HeatRiskLevel::Unknown), 0);

    let cells: Vec<_> = first.flood.cells().collect();
    assert_eq!(cells.len(), 2500);
    assert!(cells
        .iter()
        .all(|c| CityPreset::mumbai().bounds.contains(c.latitude, c.longitude)));
}

#[test]
fn test_high_count_matches_classification_array() {
    let assessment = assess(
        &mut SyntheticGridSource::with_config(
            9,
            SyntheticGridConfig {
                rows: 20,
                cols: 30,
                ..SyntheticGridConfig::default()
            },
        ),
        &mut SyntheticWeatherSource::new(9),
        &request(CityPreset::delhi()),
        &RiskConfig::default(),
    )
    .unwrap();

    let high = assessment
        .flood
        .levels()
        .iter()
        .filter(|&&l| l == FloodRiskLevel::High)
        .count();
    let above_threshold = assessment
        .flood
        .scores()
        .as_slice()
        .iter()
        .filter(|&&s| s > 0.7)
        .count();
    assert_eq!(assessment.insight.flood.high_risk_cells(), high);
    assert_eq!(high, above_threshold);
    assert_eq!(assessment.flood.shape(), (20, 30));
}

#[test]
fn test_static_sources_round_trip_through_assess() {
    let elevation = Field::from_rows(&[vec![0.0, 50.0]], mumbai_bounds()).unwrap();
    let rainfall = Field::from_rows(&[vec![200.0, 50.0]], mumbai_bounds()).unwrap();
    let mut grid = StaticGridSource::new(elevation, rainfall).unwrap();
    let mut weather = StaticWeatherSource::new(HourlySeries::from_hourly(
        [Celsius::new(f64::NAN); 24],
        [Percent::new(60.0); 24],
    ));

    let assessment = assess(
        &mut grid,
        &mut weather,
        &request(CityPreset::mumbai()),
        &RiskConfig::default(),
    )
    .unwrap();
    assert_eq!(
        assessment.flood.levels(),
        &[FloodRiskLevel::High, FloodRiskLevel::Low]
    );
    assert_eq!(assessment.insight.heat.peak, None);
    assert_eq!(assessment.insight.heat.counts.get(HeatRiskLevel::Unknown), 24);
}

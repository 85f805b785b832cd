use chrono::NaiveDate;
use clap::Parser;
use hazard_risk_core::sources::{SyntheticGridConfig, SyntheticGridSource, SyntheticWeatherSource};
use hazard_risk_core::{
    assess, Assessment, AssessmentRequest, CityPreset, DegenerateRangePolicy, FloodRiskLevel,
    FloodThresholds, HeatRiskLevel, HeatThresholds, NormalizationPolicy, RiskConfig, RiskError,
};
use tracing_subscriber::EnvFilter;

/// Flood and heat risk report with configurable inputs
#[derive(Parser, Debug)]
#[command(name = "hazard-risk-demo")]
#[command(about = "Hyperlocal flood & heat risk report", long_about = None)]
struct Args {
    /// City preset (mumbai, delhi, chennai)
    #[arg(short, long, default_value = "mumbai")]
    city: String,

    /// Day to assess (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Grid rows
    #[arg(long, default_value_t = 50)]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = 50)]
    cols: usize,

    /// Seed for the synthetic elevation, rainfall and weather data
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Normalization extrema (sample-local, regional)
    #[arg(long, default_value = "sample-local")]
    policy: String,

    /// Treat a field with no spread as this normalized value instead of failing
    #[arg(long)]
    uniform_fallback: Option<f64>,

    /// Flood score above which a cell is High
    #[arg(long, default_value_t = hazard_risk_core::flood::flood_thresholds::HIGH)]
    flood_high: f64,

    /// Flood score above which a cell is Medium
    #[arg(long, default_value_t = hazard_risk_core::flood::flood_thresholds::MEDIUM)]
    flood_medium: f64,

    /// Heat index (°C) at which an hour is Caution
    #[arg(long, default_value_t = hazard_risk_core::heat::heat_thresholds::CAUTION)]
    heat_caution: f64,

    /// Heat index (°C) at which an hour is Extreme
    #[arg(long, default_value_t = hazard_risk_core::heat::heat_thresholds::EXTREME)]
    heat_extreme: f64,

    /// Print the flood level of every grid cell
    #[arg(long)]
    show_grid: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), RiskError> {
    let city = resolve_city(&args.city);
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let normalization = parse_policy(&args.policy);

    let config = RiskConfig::default()
        .with_flood_thresholds(FloodThresholds::new(args.flood_medium, args.flood_high)?)
        .with_heat_thresholds(HeatThresholds::new(args.heat_caution, args.heat_extreme)?)
        .with_normalization(normalization)
        .with_degenerate_range(
            args.uniform_fallback
                .map_or(DegenerateRangePolicy::Fail, DegenerateRangePolicy::Uniform),
        );

    let mut grid_source = SyntheticGridSource::with_config(
        args.seed,
        SyntheticGridConfig {
            rows: args.rows,
            cols: args.cols,
            ..SyntheticGridConfig::default()
        },
    );
    let mut weather_source = SyntheticWeatherSource::new(args.seed);

    println!("=== Hyperlocal Flood & Heat Risk: {} on {date} ===\n", city.name);
    let request = AssessmentRequest::new(city, date);
    let assessment = assess(&mut grid_source, &mut weather_source, &request, &config)?;

    print_flood(&assessment, args.show_grid);
    print_heat(&assessment);
    print_insights(&assessment);
    Ok(())
}

/// Built-in city by name, falling back to Mumbai with a notice on stderr
fn resolve_city(name: &str) -> CityPreset {
    CityPreset::by_name(name).unwrap_or_else(|| {
        eprintln!("Unknown city '{name}', using Mumbai");
        CityPreset::mumbai()
    })
}

fn parse_policy(name: &str) -> NormalizationPolicy {
    match name.to_lowercase().as_str() {
        "regional" => NormalizationPolicy::Regional,
        "sample-local" | "local" => NormalizationPolicy::SampleLocal,
        other => {
            eprintln!("Unknown policy '{other}', using sample-local");
            NormalizationPolicy::SampleLocal
        }
    }
}

fn flood_symbol(level: FloodRiskLevel) -> char {
    match level {
        FloodRiskLevel::Low => '.',
        FloodRiskLevel::Medium => 'o',
        FloodRiskLevel::High => '#',
        FloodRiskLevel::Unknown => '?',
    }
}

/// One legend entry per flood level the grid can print
fn flood_legend() -> String {
    FloodRiskLevel::ALL
        .iter()
        .map(|&level| format!("'{}' {}", flood_symbol(level), level.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn heat_symbol(level: HeatRiskLevel) -> char {
    match level {
        HeatRiskLevel::Safe => '-',
        HeatRiskLevel::Caution => '=',
        HeatRiskLevel::Extreme => '#',
        HeatRiskLevel::Unknown => '?',
    }
}

fn print_flood(assessment: &Assessment, show_grid: bool) {
    let (rows, cols) = assessment.flood.shape();
    println!("### Flood Risk ({rows}x{cols} grid)");
    for level in FloodRiskLevel::ALL {
        println!(
            "  {:<8} {:>6} cells",
            level.label(),
            assessment.insight.flood.counts.get(level)
        );
    }

    if show_grid {
        println!("\n  Legend: {} (north at top)", flood_legend());
        // Row 0 is the southern edge, print it last
        for row in (0..rows).rev() {
            let line: String = (0..cols)
                .filter_map(|col| assessment.flood.level_at(row, col))
                .map(flood_symbol)
                .collect();
            println!("  {line}");
        }
    }
    println!();
}

fn print_heat(assessment: &Assessment) {
    println!("### Hourly Heat Index");
    for hour in assessment.heat.hours() {
        let bar_len = if hour.heat_index.is_finite() {
            hour.heat_index.clamp(0.0, 80.0).round() as usize
        } else {
            0
        };
        let bar = heat_symbol(hour.level).to_string().repeat(bar_len);
        println!(
            "  {:02}:00 {:>6.1}°C {:<8} {bar}",
            hour.hour,
            hour.heat_index,
            hour.level.label()
        );
    }
    println!();
}

fn print_insights(assessment: &Assessment) {
    let insight = &assessment.insight;
    println!("### Quick Insights");
    match insight.heat.peak {
        Some(peak) => println!(
            "Peak Heat Index: {:.1}°C at {:02}:00 → Risk Level: {}",
            peak.heat_index, peak.hour, peak.level
        ),
        None => println!("Peak Heat Index: unavailable (no valid readings)"),
    }
    println!(
        "Number of hours in Extreme heat: {}",
        insight.heat.extreme_hours()
    );
    println!(
        "Number of grid points with High flood risk: {} of {}",
        insight.flood.high_risk_cells(),
        insight.flood.total_cells
    );
    if let Some(peak) = insight.flood.peak {
        let (rows, cols) = assessment.flood.shape();
        let (lat, lon) = assessment
            .flood
            .scores()
            .bounds()
            .cell_center(peak.row, peak.col, rows, cols);
        println!(
            "Highest flood score: {:.2} ({}) at {lat:.4}, {lon:.4}",
            peak.score, peak.level
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_covers_every_grid_symbol() {
        let legend = flood_legend();
        for level in FloodRiskLevel::ALL {
            assert!(
                legend.contains(&format!("'{}' {}", flood_symbol(level), level.label())),
                "legend is missing {level}: {legend}"
            );
        }
        assert!(legend.contains("'?' Unknown"));
    }

    #[test]
    fn test_unknown_inputs_fall_back() {
        assert_eq!(resolve_city("Atlantis"), CityPreset::mumbai());
        assert_eq!(resolve_city("delhi"), CityPreset::delhi());
        assert_eq!(parse_policy("REGIONAL"), NormalizationPolicy::Regional);
        assert_eq!(parse_policy("global"), NormalizationPolicy::SampleLocal);
    }
}

//! CLI entry point for the survey analytics core.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use serde::Serialize;
use std::path::PathBuf;
use survey_analytics::aggregation::{
    butterfly_data, choropleth_data, country_metric_value, radar_data, stacked_bar_data,
};
use survey_analytics::{
    AnalyticsConfig, CleanedDataset, DataQualityAnalyzer, DatasetCache, available_metrics,
};
use tracing::{debug, info, warn};

/// Environment variable holding the project root.
const ROOT_ENV: &str = "SURVEY_ANALYTICS_ROOT";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Mental-health survey analytics",
    long_about = "Loads the mental-health survey CSV, cleans it and prints the \
                  dashboard's aggregated views as JSON.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  SURVEY_ANALYTICS_ROOT    Project root the dataset path is resolved against\n\n\
                  EXAMPLES:\n  \
                  # Treatment rate per country\n  \
                  survey-analytics choropleth treatment_rate\n\n  \
                  # Compare two countries on the radar axes\n  \
                  survey-analytics radar \"United States\" India\n\n  \
                  # Column-by-column quality report of the raw file\n  \
                  survey-analytics quality"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Project root (overrides SURVEY_ANALYTICS_ROOT)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Dataset path relative to the project root
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable logging; stdout carries JSON only
    #[arg(long, global = true)]
    json: bool,

    /// Admit category values outside the declared schema with a warning
    #[arg(long, global = true)]
    lenient_categories: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the twelve metric definitions
    Metrics,
    /// Per-column data quality report
    Quality {
        /// Analyze the cleaned dataset instead of the raw file
        #[arg(long)]
        cleaned: bool,
    },
    /// Legal categories of every categorical column
    Categories,
    /// Countries present in the dataset
    Countries,
    /// Rate of one metric for one country (Global when omitted)
    Metric {
        metric: String,
        country: Option<String>,
    },
    /// Rate of one metric for every country
    Choropleth { metric: String },
    /// Radar profile for up to two countries
    Radar(Comparison),
    /// Days indoors by employment status for up to two countries
    Butterfly(Comparison),
    /// Interview willingness by social weakness for up to two countries
    StackedBar(Comparison),
    /// Every view for up to two countries
    Demo {
        #[command(flatten)]
        countries: Comparison,
        /// Metric for the single-value and choropleth views
        #[arg(long, default_value = "treatment_rate")]
        metric: String,
    },
}

#[derive(Args, Debug)]
struct Comparison {
    /// First country (Global when omitted)
    country1: Option<String>,
    /// Second country to compare against
    country2: Option<String>,
}

impl Comparison {
    fn pair(&self) -> (Option<&str>, Option<&str>) {
        (self.country1.as_deref(), self.country2.as_deref())
    }
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &GlobalArgs) -> Result<AnalyticsConfig> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::var_os(ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    debug!("Project root: {}", root.display());

    let mut builder = AnalyticsConfig::builder()
        .project_root(root)
        .strict_categories(!args.lenient_categories);
    if let Some(data) = &args.data {
        builder = builder.dataset_path(data);
    }

    builder.build().context("Invalid configuration")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.global.log_level, cli.global.quiet, cli.global.json);

    // Load environment variables from .env file
    dotenv().ok();

    let config = build_config(&cli.global)?;
    let cache = DatasetCache::new(config);

    match &cli.command {
        Command::Metrics => print_json(&available_metrics()),
        Command::Quality { cleaned } => run_quality(&cache, *cleaned, cli.global.json),
        Command::Categories => print_json(cache.cleaned()?.category_sets()),
        Command::Countries => print_json(&cache.cleaned()?.countries()?),
        Command::Metric { metric, country } => {
            let ds = cache.cleaned()?;
            warn_if_absent(&ds, [country.as_deref()]);
            print_json(&country_metric_value(&ds, country.as_deref(), metric)?)
        }
        Command::Choropleth { metric } => {
            let ds = cache.cleaned()?;
            print_json(&choropleth_data(&ds, metric)?)
        }
        Command::Radar(c) => {
            let ds = cache.cleaned()?;
            let (c1, c2) = c.pair();
            warn_if_absent(&ds, [c1, c2]);
            print_json(&radar_data(&ds, c1, c2)?)
        }
        Command::Butterfly(c) => {
            let ds = cache.cleaned()?;
            let (c1, c2) = c.pair();
            warn_if_absent(&ds, [c1, c2]);
            print_json(&butterfly_data(&ds, c1, c2)?)
        }
        Command::StackedBar(c) => {
            let ds = cache.cleaned()?;
            let (c1, c2) = c.pair();
            warn_if_absent(&ds, [c1, c2]);
            print_json(&stacked_bar_data(&ds, c1, c2)?)
        }
        Command::Demo { countries, metric } => run_demo(&cache, countries, metric),
    }
}

/// Run the quality report.
///
/// Note: the text report goes to stdout with `println!` since it is the
/// command's output, not a log line.
fn run_quality(cache: &DatasetCache, cleaned: bool, json: bool) -> Result<()> {
    let report = if cleaned {
        DataQualityAnalyzer::analyze(cache.cleaned()?.frame())?
    } else {
        DataQualityAnalyzer::analyze(cache.load_default()?.frame())?
    };

    if json {
        print_json(&report)
    } else {
        print!("{}", report.render_text());
        Ok(())
    }
}

fn run_demo(cache: &DatasetCache, countries: &Comparison, metric: &str) -> Result<()> {
    let ds = cache.cleaned()?;
    let (c1, c2) = countries.pair();
    warn_if_absent(&ds, [c1, c2]);
    info!("Building every view for {:?} / {:?}", c1, c2);

    let demo = serde_json::json!({
        "metric": country_metric_value(&ds, c1, metric)?,
        "choropleth": choropleth_data(&ds, metric)?,
        "radar": radar_data(&ds, c1, c2)?,
        "butterfly": butterfly_data(&ds, c1, c2)?,
        "stacked_bar": stacked_bar_data(&ds, c1, c2)?,
    });
    print_json(&demo)
}

/// Warn about country names that match no respondents.
fn warn_if_absent<const N: usize>(ds: &CleanedDataset, countries: [Option<&str>; N]) {
    for country in countries.into_iter().flatten() {
        match ds.has_country(country) {
            Ok(true) => {}
            Ok(false) if country.trim().is_empty() || country.trim() == "Global" => {}
            Ok(false) => warn!("Country '{}' has no respondents; values will be 0", country),
            Err(e) => warn!("Could not check country '{}': {}", country, e),
        }
    }
}

use std::path::PathBuf;

use clap::Parser;

use lifeplan_core::engine::simulate;
use lifeplan_core::score::readiness_scores;

mod logging;
mod report;
mod scenario;

use scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "lifeplan")]
#[command(about = "Deterministic retirement projection from a scenario file")]
struct Args {
    /// Path to the scenario JSON document
    scenario: PathBuf,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the projection horizon in years
    #[arg(long)]
    horizon: Option<u16>,

    /// Include readiness scores in the report
    #[arg(long)]
    scores: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init_logging(&args.log_level)?;

    let scenario = Scenario::load(&args.scenario)?;
    let current_year = jiff::Zoned::now().date().year();
    let profile = scenario.resolve_profile(current_year);
    let items = scenario.all_items(&profile);
    let horizon = args
        .horizon
        .or(scenario.horizon_years)
        .unwrap_or_else(|| profile.default_horizon_years());

    tracing::info!(
        items = items.len(),
        start_year = profile.start_year,
        horizon,
        "running projection"
    );

    let result = simulate(&items, &profile, &scenario.settings, horizon);
    for warning in &result.warnings {
        tracing::warn!(item = %warning.item, kind = ?warning.kind, "item normalized to zero");
    }

    let scores = args
        .scores
        .then(|| readiness_scores(&report::score_input_from(&result, &profile)));
    let document = report::build_report(&result, scores.as_ref());
    let rendered = serde_json::to_string_pretty(&document)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

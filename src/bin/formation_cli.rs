use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use formation_calc::config::{embedded_preset, parse_stat_list};
use formation_calc::{
    detect_clipboard, export, load_preset, Attribute, ConfigError, Formation, Nature, RawWeights,
    SessionState,
};
use log::error;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(
    name = "formation_cli",
    about = "Distribute a point budget across Atk/Def/SpAtk/SpDef/Speed"
)]
struct Args {
    /// JSON preset to start from.
    #[arg(long)]
    preset: Option<PathBuf>,
    /// Point budget (clamped to 0..=999999).
    #[arg(long)]
    points: Option<String>,
    /// Raw weights as `atk,def,spatk,spdef,speed`, summing to at most 100.
    #[arg(long)]
    weights: Option<String>,
    /// Base values as `atk,def,spatk,spdef,speed` (each clamped to 0..=999999).
    #[arg(long)]
    base: Option<String>,
    #[arg(long)]
    nature: Option<String>,
    /// Print the formation as JSON instead of a table.
    #[arg(long)]
    json: bool,
    /// Copy the export text to the clipboard.
    #[arg(long)]
    copy: bool,
    #[arg(long)]
    list_natures: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    if args.list_natures {
        for nature in Nature::ALL {
            println!("{}", nature.caption());
        }
        return Ok(());
    }

    let preset = match args.preset.as_deref() {
        Some(path) => load_preset(path)?,
        None => embedded_preset()?,
    };
    let mut session = SessionState::from_preset(&preset)?;
    if let Some(points) = args.points.as_deref() {
        session.set_points(points);
    }
    if let Some(weights) = args.weights.as_deref() {
        session.weights = RawWeights::new(parse_stat_list(weights)?).map_err(ConfigError::from)?;
    }
    if let Some(base) = args.base.as_deref() {
        session.base = parse_stat_list(base)?;
    }
    if let Some(nature) = args.nature.as_deref() {
        session.select_nature(nature);
    }

    let formation = session.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&formation)?);
    } else {
        print_breakdown(&formation);
    }

    if args.copy {
        let mut sink = detect_clipboard();
        let status = export(sink.as_mut(), &formation.export_text());
        eprintln!("{}", status.message());
    }
    Ok(())
}

fn print_breakdown(formation: &Formation) {
    println!("Points: {}", formation.points);
    println!("Raw total: {}%", formation.raw_total);
    println!("Nature: {}", formation.nature.caption());
    println!("--- Distribution ---");
    for attr in Attribute::ALL {
        println!(
            "{:<6} raw {:>3}% | share {:>6.2}% | base {:>6} +{:<6} = {:>7} {}",
            attr.label(),
            formation.weights.get(attr),
            formation.shares.get(attr),
            formation.base[attr],
            formation.added[attr],
            formation.totals[attr],
            formation.marker_for(attr).suffix(),
        );
    }
    println!("--- Export ---");
    print!("{}", formation.export_text());
}

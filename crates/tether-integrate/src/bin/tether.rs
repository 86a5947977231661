use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tether_error::{Error, ResultExt, TracingPolicy};
use tether_integrate::{IntegrateConfig, Integrator};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Populate associations for a find-with-associations request held in a JSON file.
///
/// The request file holds `{ "cache": { <table>: [rows...] }, "joinInstructions": [...] }`;
/// the populated parent rows are written to stdout as JSON.
#[derive(Parser, Debug)]
#[command(name = "tether", version, about = "In-memory join and populate harness")]
struct Args {
    /// Path to the JSON request
    #[arg(long)]
    request: PathBuf,

    /// Optional TOML configuration (strict_associations, parent_columns, missing_tables)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed output
    #[arg(long, default_value_t = false)]
    compact: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    info!("Starting tether with args: {:?}", args);

    match run(&args).emit_event(&TracingPolicy) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}

fn run(args: &Args) -> tether_error::Result<String> {
    let config = match &args.config {
        Some(path) => IntegrateConfig::load_from_path(path)?,
        None => IntegrateConfig::default(),
    };

    let raw = fs::read_to_string(&args.request).map_err(|source| Error::FileOperation {
        operation: "read request",
        path: args.request.clone(),
        source,
    })?;
    let request: serde_json::Value =
        serde_json::from_str(&raw).map_err(|e| Error::Serialization(e.to_string()))?;

    let rows = Integrator::new(config).integrate_json(&request)?;
    info!(
        "Integrated {} parent rows from {}",
        rows.as_array().map(Vec::len).unwrap_or(0),
        args.request.display()
    );

    let rendered = if args.compact {
        serde_json::to_string(&rows)
    } else {
        serde_json::to_string_pretty(&rows)
    };
    rendered.map_err(|e| Error::Serialization(e.to_string()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

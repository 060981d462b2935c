//! # cdr-synth
//!
//! Runs one simulation and writes its records to stdout.
//!
//! ```bash
//! cdr-synth --header > cdrs.csv
//! cdr-synth --config run.json --format json
//! cdr-synth --pairs --population 10 --seed 1
//! ```

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use cdr_synth::lifecycle::{setup_tracing, CdrSystem};
use cdr_synth::model::{Cdr, DialMode, GraphShape, SimulationConfig, CSV_HEADER};
use cdr_synth::simulation_actor::SimulationCreate;
use clap::{Parser, ValueEnum};
use tracing::{info, Instrument};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "cdr-synth", about = "Generate synthetic call detail records")]
struct Args {
    /// JSON file with a SimulationConfig; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    population: Option<usize>,

    #[arg(long)]
    degree_min: Option<usize>,

    #[arg(long)]
    degree_max: Option<usize>,

    /// Actors drawn for a new number at every epoch boundary
    #[arg(long)]
    churn: Option<usize>,

    #[arg(long)]
    ticks_per_epoch: Option<u64>,

    #[arg(long)]
    epochs: Option<u32>,

    /// Use fixed friend pairs instead of a random graph
    #[arg(long)]
    pairs: bool,

    /// Dial live numbers instead of phonebook entries
    #[arg(long)]
    live: bool,

    #[arg(long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Print a CSV header line first
    #[arg(long)]
    header: bool,
}

impl Args {
    fn load_config(&self) -> Result<SimulationConfig, String> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| format!("reading {}: {e}", path.display()))?;
                serde_json::from_str(&text).map_err(|e| format!("parsing {}: {e}", path.display()))?
            }
            None => SimulationConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(population) = self.population {
            config.population_size = population;
        }
        if let Some(min) = self.degree_min {
            config.degree_range.0 = min;
        }
        if let Some(max) = self.degree_max {
            config.degree_range.1 = max;
        }
        if let Some(churn) = self.churn {
            config.churn_per_epoch = churn;
        }
        if let Some(ticks) = self.ticks_per_epoch {
            config.ticks_per_epoch = ticks;
        }
        if let Some(epochs) = self.epochs {
            config.epoch_count = epochs;
        }
        if self.pairs {
            config.graph = GraphShape::Pairs;
        }
        if self.live {
            config.dial_mode = DialMode::Live;
        }
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

fn write_records(records: &[Cdr], format: OutputFormat, header: bool) -> Result<(), String> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let io_err = |e: io::Error| e.to_string();
    match format {
        OutputFormat::Csv => {
            if header {
                writeln!(out, "{CSV_HEADER}").map_err(io_err)?;
            }
            for record in records {
                writeln!(out, "{}", record.to_csv_line()).map_err(io_err)?;
            }
        }
        OutputFormat::Json => {
            for record in records {
                let line = serde_json::to_string(record).map_err(|e| e.to_string())?;
                writeln!(out, "{line}").map_err(io_err)?;
            }
        }
    }
    out.flush().map_err(io_err)
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let args = Args::parse();
    let config = args.load_config()?;
    info!(?config, "Starting cdr-synth");

    let system = CdrSystem::new();
    let client = system.simulation_client.clone();

    let span = tracing::info_span!("generation", seed = config.seed);
    let records = async {
        let run = client
            .create_run(SimulationCreate { config, names: None })
            .await
            .map_err(|e| e.to_string())?;
        client.generate(run).await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await;
    drop(client);

    // Stop the actor before reporting, whether or not the run succeeded.
    system.shutdown().await?;
    let records = records?;

    write_records(&records, args.format, args.header)?;
    info!(records = records.len(), "Done");
    Ok(())
}

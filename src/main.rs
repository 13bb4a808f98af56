//! Command-line driver for the product-regression experiment.
//!
//!   ferrite-blocks demo
//!   ferrite-blocks train --config experiment.json --save model.json
//!   ferrite-blocks run --model model.json --input 0.5,0.25

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ferrite_blocks::data::{csv, synthetic};
use ferrite_blocks::{train_loop, Dataset, ExperimentConfig, Network};

#[derive(Parser)]
#[command(name = "ferrite-blocks")]
#[command(about = "Train and run small block-based neural networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Train on y = x0*x1 + 2*x0 + 1 with the default hyperparameters
    Demo,
    /// Train a network described by an experiment config
    Train {
        /// JSON experiment config; missing fields use defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// CSV training data (two input columns, one target column)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Where to write the trained model
        #[arg(short, long)]
        save: Option<PathBuf>,
    },
    /// Run a saved model on one or more comma-separated inputs
    Run {
        #[arg(short, long)]
        model: PathBuf,

        #[arg(short, long, required = true)]
        input: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Demo => {
            train(ExperimentConfig::default(), None, None)?;
        }
        Commands::Train { config, data, save } => {
            let cfg = match config {
                Some(path) => ExperimentConfig::load_json(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => ExperimentConfig::default(),
            };
            let dataset = match data {
                Some(path) => Some(
                    csv::load_csv(&path, 1)
                        .with_context(|| format!("loading data {}", path.display()))?,
                ),
                None => None,
            };
            train(cfg, dataset, save)?;
        }
        Commands::Run { model, input } => {
            let network = Network::load_json(&model)
                .with_context(|| format!("loading model {}", model.display()))?;
            let rows = input
                .iter()
                .map(|row| parse_row(row))
                .collect::<Result<Vec<_>>>()?;
            for (row, out) in rows.iter().zip(network.run(&rows)?) {
                println!("{row:?} -> {out:?}");
            }
        }
    }

    Ok(())
}

fn train(cfg: ExperimentConfig, dataset: Option<Dataset>, save: Option<PathBuf>) -> Result<()> {
    let seed = cfg.seed.unwrap_or_else(rand::random);
    info!(?cfg, seed, "starting experiment");

    let dataset = match dataset {
        Some(ds) => ds,
        None => synthetic::product_plus_linear(cfg.example_count, seed)?,
    };
    let mut network = cfg.network_spec().build(Some(seed))?;

    let history = train_loop(&mut network, &dataset, &cfg.train_config())?;
    if let (Some(first), Some(last)) = (history.first(), history.last()) {
        info!(
            "loss {:.6} -> {:.6} over {} epochs",
            first.train_loss, last.train_loss, history.len()
        );
    }

    for ex in dataset.iter().take(5) {
        let out = network.evaluate(&ex.input)?;
        println!("{:?} -> {:.4} (expected {:.4})", ex.input, out[0], ex.expected[0]);
    }

    if let Some(path) = save {
        network
            .save_json(&path)
            .with_context(|| format!("saving model {}", path.display()))?;
        info!(path = %path.display(), "model saved");
    }
    Ok(())
}

fn parse_row(row: &str) -> Result<Vec<f64>> {
    row.split(',')
        .map(|cell| {
            cell.trim()
                .parse::<f64>()
                .with_context(|| format!("'{cell}' is not a number"))
        })
        .collect()
}

//! txncat CLI binary.

use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use txncat::pipeline::{self, PipelineConfig};

/// txncat - categorize transactions from their descriptions
#[derive(Parser, Debug, Clone)]
#[command(name = "txncat")]
#[command(about = "Train a transaction categorization model from labeled CSV data")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct TxncatArgs {
    /// Path to the CSV file of labeled transactions
    #[arg(long, value_name = "FILE", default_value = pipeline::DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Path where the trained model and vectorizer are saved
    #[arg(long = "model-out", value_name = "FILE", default_value = pipeline::DEFAULT_MODEL_FILE)]
    model_out: PathBuf,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    quiet: bool,
}

impl TxncatArgs {
    /// Get the effective verbosity level
    fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

fn main() {
    let args = TxncatArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let config = PipelineConfig {
        data_path: args.data,
        model_path: args.model_out,
        ..PipelineConfig::default()
    };

    match pipeline::run(&config) {
        Ok(report) => {
            println!("{report}");
            println!("Trained model and vectorizer saved to {}", config.model_path.display());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

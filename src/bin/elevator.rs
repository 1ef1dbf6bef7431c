//! elevator CLI - convert CybOX observables into STIX 2.0 objects
//!
//! Reads a CybOX JSON document and writes one container per converted
//! observable.

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use tracing_subscriber::EnvFilter;

use elevator::{
    write_containers, CollectingSink, ElevatorConfig, ElevatorError, Observable, OutputFormat,
    Severity, VocabularyKind,
};

#[derive(Parser)]
#[command(name = "elevator")]
#[command(version, about = "Convert CybOX observables into STIX 2.0 cyber-observable objects", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a CybOX JSON document
    Convert {
        /// CybOX JSON document (single observable, array, or package)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format - overrides config file
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print the effective vocabulary tables
    Vocab {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<ElevatorConfig, ElevatorError> {
    match path {
        Some(path) => ElevatorConfig::load_from_file(path),
        None => Ok(ElevatorConfig::default()),
    }
}

fn convert(
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<(), ElevatorError> {
    let config = load_config(config.as_ref())?;
    let elevator = config.elevator()?;
    let format = format.unwrap_or(config.output.format);

    let contents = fs::read_to_string(&input)?;
    let sink = CollectingSink::new();
    let observables = Observable::parse_document(&contents, &sink)?;
    tracing::info!("Read {} observables from {}", observables.len(), input.display());

    let report = elevator.convert_batch(&observables, &sink);

    let written = match &output {
        Some(path) => {
            let file = fs::File::create(path)?;
            write_containers(BufWriter::new(file), format, &report.containers)?
        }
        None => write_containers(io::stdout().lock(), format, &report.containers)?,
    };

    eprintln!(
        "✓ Converted {} observables ({} skipped), wrote {} containers",
        report.converted, report.skipped, written
    );
    eprintln!(
        "  {} warnings, {} errors",
        sink.count(Severity::Warning),
        sink.count(Severity::Error)
    );

    Ok(())
}

fn print_vocabularies(config: Option<PathBuf>) -> Result<(), ElevatorError> {
    let config = load_config(config.as_ref())?;
    let vocabularies = config.vocabularies()?;

    for kind in VocabularyKind::ALL {
        println!("{}:", kind);
        for (value, label) in vocabularies.table(kind).sorted_entries() {
            println!("  {} -> {}", value, label);
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            config,
            format,
        } => convert(input, output, config, format),
        Commands::Vocab { config } => print_vocabularies(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

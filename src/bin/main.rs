//! RCGS collection export CLI
//!
//! Command-line tool that converts a directory of RDF files into one CSV
//! table per entity kind.

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rcgs_export::{convert, ConvertError, ConvertOptions, EntityKind, TableOutcome};

#[derive(Parser)]
#[command(name = "rcgs-export")]
#[command(about = "Export RCGS collection RDF graphs to flat CSV tables")]
#[command(version)]
struct Cli {
    /// Directory containing .ttl, .rdf, .xml, .n3, .nt and .jsonld files
    #[arg(long, default_value = "./source")]
    source: PathBuf,

    /// Directory receiving the CSV files (created if missing)
    #[arg(long, default_value = "./output")]
    output: PathBuf,

    /// Only export these entity kinds, comma separated
    /// (package, item, person, organization, variation, work, related-item)
    #[arg(long, value_name = "KIND", value_delimiter = ',')]
    only: Vec<EntityKind>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_tracing(cli: &Cli) {
    // Log level comes from the flags only; RUST_LOG is not consulted.
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let options = ConvertOptions {
        source_dir: cli.source,
        output_dir: cli.output,
        entities: if cli.only.is_empty() {
            EntityKind::ALL.to_vec()
        } else {
            cli.only
        },
    };

    match convert(&options) {
        Ok(report) => {
            for (kind, outcome) in &report.tables {
                if let TableOutcome::Failed(reason) = outcome {
                    eprintln!("Failed to write {}: {}", kind.file_name(), reason);
                }
            }
            eprintln!(
                "Loaded {} of {} files ({} triples), wrote {} tables to {}",
                report.load.files_loaded,
                report.load.files_found,
                report.load.triples,
                report.written(),
                options.output_dir.display()
            );
        }
        Err(ConvertError::EmptyGraph) => {
            warn!(source = %options.source_dir.display(), "no RDF data was loaded, nothing to export");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

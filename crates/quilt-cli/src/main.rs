//! Quilt command-line interface.
//!
//! The main entry point for the `quilt` benchmark tool.

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{compare, optimize, report, version};

/// Quilt - partition, resynthesize and benchmark quantum circuits
#[derive(Parser)]
#[command(name = "quilt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize a circuit (or a directory of circuits) through the
    /// partition-optimize-merge pipeline
    Optimize {
        /// Input QASM file
        #[arg(short, long, conflicts_with = "dir")]
        input: Option<String>,

        /// Directory of QASM files to optimize in bulk
        #[arg(short, long)]
        dir: Option<String>,

        /// Output directory for optimized circuits and metrics
        #[arg(short, long, default_value = ".")]
        output_dir: String,

        /// Partitioning strategy (scan, quick)
        #[arg(short, long, default_value = "quick")]
        partitioner: String,

        /// Maximum wires per block
        #[arg(short, long, default_value = "3")]
        width: usize,

        /// Synthesis algorithm (greedy, lookahead)
        #[arg(short, long, default_value = "greedy")]
        algorithm: String,

        /// Replace filter (always, less-than, less-than-multi)
        #[arg(short, long, default_value = "less-than-multi")]
        filter: String,

        /// Identity tolerance for residual rotations
        #[arg(short, long, default_value = "1e-8")]
        threshold: f64,

        /// Lookahead search width
        #[arg(long, default_value = "4")]
        search_width: usize,

        /// Worker threads (defaults to one per core)
        #[arg(long)]
        workers: Option<usize>,

        /// Also run a monolithic baseline at this optimization level (0-3)
        #[arg(long)]
        baseline_level: Option<u8>,
    },

    /// Compare partition shapes between two circuits or directories
    Compare {
        /// First circuit file or directory
        a: String,

        /// Second circuit file or directory
        b: String,

        /// Maximum wires per block
        #[arg(short, long, default_value = "3")]
        width: usize,
    },

    /// Compare every circuit in a directory against every other
    Report {
        /// Directory of QASM files
        dir: String,

        /// Maximum wires per block
        #[arg(short, long, default_value = "3")]
        width: usize,

        /// Directory to write per-circuit reports into (stdout if omitted)
        #[arg(short, long)]
        output_dir: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Optimize {
            input,
            dir,
            output_dir,
            partitioner,
            width,
            algorithm,
            filter,
            threshold,
            search_width,
            workers,
            baseline_level,
        } => optimize::execute(optimize::Args {
            input,
            dir,
            output_dir,
            partitioner,
            width,
            algorithm,
            filter,
            threshold,
            search_width,
            workers,
            baseline_level,
        }),

        Commands::Compare { a, b, width } => compare::execute(&a, &b, width),

        Commands::Report {
            dir,
            width,
            output_dir,
        } => report::execute(&dir, width, output_dir.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

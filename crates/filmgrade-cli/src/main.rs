//! filmgrade - Film-emulation color grading CLI
//!
//! Decodes an image, runs one named operator over it, encodes the result.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "filmgrade")]
#[command(author, version, about = "Film-emulation color grading")]
#[command(long_about = "
Applies film-stock presets and classic photo filters to 8-bit images.

Examples:
  filmgrade list                                   # Show available operators
  filmgrade apply in.jpg -o out.png -f \"Kodak Portra 400\"
  filmgrade apply in.png -o edges.png -f EdgeDetection
  filmgrade apply in.png -o blur.png -f Blur --params blur.yaml
  filmgrade apply in.png -o old.jpg -f VintageEffect --seed 42
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply one operator to an image
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// List supported operators
    #[command(visible_alias = "ls")]
    List(ListArgs),
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Input image
    pub input: PathBuf,

    /// Output image (format from extension: png, jpg)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Operator name or label, e.g. Sepia, "Kodak Portra 400"
    #[arg(short, long)]
    pub filter: String,

    /// YAML file with operator params (blur_kernel, seed)
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Seed for stochastic operators; overrides the params file
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Print identifiers only, one per line
    #[arg(short, long)]
    pub names: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Apply(args) => commands::apply::run(args, cli.verbose),
        Commands::List(args) => commands::list::run(args),
    }
}

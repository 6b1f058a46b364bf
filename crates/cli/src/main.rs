//! Pallet planner CLI

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use u_pallet::{Config, IssuePolicy, PalletSpec, Palletizer};
use u_pallet_cli::{write_report, InputParser};

#[derive(Parser)]
#[command(name = "pallet-planner")]
#[command(about = "Plans pallet loads for warehouse orders")]
#[command(version)]
struct Cli {
    /// Log layer and pallet decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stack an order onto pallets
    Pack {
        /// Product master data (JSON)
        #[arg(short, long)]
        catalog: PathBuf,

        /// Order lines (JSON)
        #[arg(short, long)]
        order: PathBuf,

        #[command(flatten)]
        pallet: PalletArgs,

        /// Abort on the first unknown SKU or invalid box instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Time limit in seconds (0 = unlimited)
        #[arg(short, long, default_value = "0")]
        time_limit: u64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write the result to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List catalog entries that cannot be packed
    Check {
        /// Product master data (JSON)
        catalog: PathBuf,
    },
}

/// Pallet class; defaults to a Euro pallet.
#[derive(Args)]
struct PalletArgs {
    /// Pallet length (cm)
    #[arg(long, default_value = "120")]
    length: f64,

    /// Pallet width (cm)
    #[arg(long, default_value = "80")]
    width: f64,

    /// Maximum stack height (cm)
    #[arg(long, default_value = "170")]
    max_height: f64,

    /// Maximum gross weight including tare (kg)
    #[arg(long, default_value = "600")]
    max_weight: f64,

    /// Empty pallet weight (kg)
    #[arg(long, default_value = "25")]
    tare: f64,
}

impl From<&PalletArgs> for PalletSpec {
    fn from(args: &PalletArgs) -> Self {
        PalletSpec::new(args.length, args.width)
            .with_max_height(args.max_height)
            .with_max_gross_weight(args.max_weight)
            .with_tare_weight(args.tare)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Layer tables and order resume
    Text,
    /// Full result as JSON
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Pack {
            catalog,
            order,
            pallet,
            strict,
            time_limit,
            format,
            output,
        } => {
            let parser = InputParser::new();
            let products = parser
                .parse_catalog_file(&catalog)
                .with_context(|| format!("reading catalog {}", catalog.display()))?;
            let lines = parser
                .parse_order_file(&order)
                .with_context(|| format!("reading order {}", order.display()))?;

            let spec = PalletSpec::from(&pallet);
            spec.validate()?;

            let mut config = Config::new().with_time_limit(time_limit * 1000);
            if strict {
                config = config.with_issue_policy(IssuePolicy::Fail);
            }

            let result = Palletizer::new(config).pack_order(&products, &lines, &spec)?;

            let mut out: Box<dyn io::Write> = match &output {
                Some(path) => Box::new(io::BufWriter::new(
                    std::fs::File::create(path)
                        .with_context(|| format!("creating {}", path.display()))?,
                )),
                None => Box::new(io::stdout().lock()),
            };

            match format {
                OutputFormat::Text => write_report(&mut out, &result, &products)?,
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut out, &result)?;
                    writeln!(out)?;
                }
            }
            out.flush()?;

            if let Some(path) = output {
                println!("Load plan saved to: {}", path.display());
            }
        }

        Commands::Check { catalog } => {
            let products = InputParser::new()
                .parse_catalog_file(&catalog)
                .with_context(|| format!("reading catalog {}", catalog.display()))?;

            let invalid = products.invalid_variants();
            println!(
                "{} products, {} unusable box variant(s)",
                products.len(),
                invalid.len()
            );
            for error in invalid {
                println!("  - {}", error);
            }
        }
    }

    Ok(())
}

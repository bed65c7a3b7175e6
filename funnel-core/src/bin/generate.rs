//! funnel-generate - write a synthetic funnel dataset to disk

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use funnel_core::constants::{DEFAULT_GENERATE_OUTPUT, DEFAULT_GENERATE_ROWS, DEFAULT_SEED};
use funnel_core::logic::dataset::{export, generate_with, ExportFormat, LabelCoefficients};
use funnel_core::CoreResult;

/// Label coefficient set
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Coefficients {
    /// Same coefficients the simulation service labels with
    Service,
    /// Stronger discount and organic-search effects, used for model training data
    Training,
}

impl Coefficients {
    fn resolve(self) -> LabelCoefficients {
        match self {
            Coefficients::Service => LabelCoefficients::service(),
            Coefficients::Training => LabelCoefficients::training(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "funnel-generate",
    version,
    about = "Generate a synthetic marketing-funnel dataset with conversion labels."
)]
struct Args {
    /// Number of sessions to generate
    #[arg(long, default_value_t = DEFAULT_GENERATE_ROWS)]
    rows: usize,

    /// RNG seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Label coefficient set
    #[arg(long, value_enum, default_value_t = Coefficients::Training)]
    coefficients: Coefficients,

    /// Output file
    #[arg(long, short, default_value = DEFAULT_GENERATE_OUTPUT)]
    output: PathBuf,

    /// Output format (guessed from the extension when omitted)
    #[arg(long, value_enum)]
    format: Option<ExportFormat>,
}

fn main() -> CoreResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let format = args.format.unwrap_or_else(|| ExportFormat::from_path(&args.output));

    log::info!(
        "Generating {} sessions (seed {}, {:?} coefficients)",
        args.rows,
        args.seed,
        args.coefficients
    );

    let dataset = generate_with(args.rows, args.seed, &args.coefficients.resolve())?;

    for record in dataset.head(5) {
        log::info!("{}", serde_json::to_string(record)?);
    }
    log::info!("Conversion rate: {:.4}", dataset.conversion_rate());

    export::to_file(&dataset.records, &args.output, format)?;
    Ok(())
}

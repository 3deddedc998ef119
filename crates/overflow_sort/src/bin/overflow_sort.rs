use std::time::Instant;

use clap::{Parser, ValueEnum};
use overflow_sort::{
    DEFAULT_COUNT, DEFAULT_THRESHOLD, Distribution, InsertionStrategy, OverflowSorter, SortConfig,
    generate, render_report,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DistributionArg {
    Uniform,
    RealWorld,
}

impl From<DistributionArg> for Distribution {
    fn from(arg: DistributionArg) -> Self {
        match arg {
            DistributionArg::Uniform => Self::Uniform,
            DistributionArg::RealWorld => Self::RealWorld,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InsertionArg {
    LinearScan,
    BinarySearch,
}

impl From<InsertionArg> for InsertionStrategy {
    fn from(arg: InsertionArg) -> Self {
        match arg {
            InsertionArg::LinearScan => Self::LinearScan,
            InsertionArg::BinarySearch => Self::BinarySearch,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "overflow_sort",
    about = "Sort random values by repeated doubling until they overflow a threshold",
    version
)]
struct Cli {
    /// Values settle once their doubled total exceeds this bound
    #[arg(long, default_value_t = DEFAULT_THRESHOLD as i64, allow_negative_numbers = true)]
    threshold: i64,
    /// Number of values to generate
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    count: usize,
    /// RNG seed for the generated input (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = DistributionArg::Uniform)]
    distribution: DistributionArg,
    #[arg(long, value_enum, default_value_t = InsertionArg::BinarySearch)]
    insertion: InsertionArg,
    /// Print at most this many values per sequence
    #[arg(long, default_value_t = 100)]
    limit: usize,
    /// Print the per-round settlement trace
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("overflow_sort=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SortConfig::try_new(cli.threshold, cli.count)?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    let distribution = Distribution::from(cli.distribution);

    info!(
        threshold = config.threshold,
        count = config.count,
        seed,
        distribution = distribution.label(),
        "generating input"
    );
    let original = generate(distribution, config.count, config.threshold, seed);

    let mut sorter =
        OverflowSorter::from_config(&config).with_insertion(InsertionStrategy::from(cli.insertion));
    let start = Instant::now();
    let (sorted, trace) = sorter.sort_traced(&original);
    let elapsed = start.elapsed();
    info!(
        rounds = trace.round_count(),
        insertion = sorter.insertion().label(),
        "sort finished"
    );

    print!("{}", render_report(&original, &sorted, elapsed, cli.limit));
    if cli.trace {
        print!("{trace}");
    }
    Ok(())
}

use anyhow::Context as _;
use anyhow::Result;
use kmeanspp::args::Arguments;
use kmeanspp::dataset::{self, KeyedTable};
use kmeanspp::{output, Fit, KMeans, KMeansConfig, Lloyd};
use rand::SeedableRng as _;
use std::env;
use std::fmt;
use std::io;
use std::io::Write as _;
use std::process;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::Registry;

const USAGE: &str = "Usage: kmeans-pp [options] k [max_iter] eps file1 file2";

fn invalid_argument(reason: impl fmt::Display) -> ! {
    println!("Invalid argument!");
    println!("{reason}");
    process::exit(1);
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_env("LOG")
    };
    Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let mut options = getopts::Options::new();
    options.optflag("h", "help", "print this help menu");
    options.optopt("s", "seed", "seed of the random generator (default: 0)", "N");
    options.optflag("v", "verbose", "print diagnostic data");

    let matches = match options.parse(env::args().skip(1)) {
        Ok(matches) => matches,
        Err(err) => invalid_argument(err),
    };

    if matches.opt_present("h") {
        eprintln!("{}", options.usage(USAGE));
        return Ok(());
    }

    init_logging(matches.opt_present("v"));

    let seed: u64 = match matches.opt_get_default("s", 0) {
        Ok(seed) => seed,
        Err(err) => invalid_argument(format!("seed: {err}")),
    };
    let args = Arguments::from_free_args(&matches.free).unwrap_or_else(|err| invalid_argument(err.reason()));
    tracing::debug!(?args, seed);

    let left = KeyedTable::from_path(&args.file_1)
        .with_context(|| format!("failed to read {}", args.file_1.display()))?;
    let right = KeyedTable::from_path(&args.file_2)
        .with_context(|| format!("failed to read {}", args.file_2.display()))?;
    let kmean = dataset::inner_join(&left, &right)
        .into_kmeans::<f64>()
        .context("failed to build the point set")?;

    let config = KMeansConfig::build()
        .random_generator(rand_pcg::Pcg64::seed_from_u64(seed))
        .build();
    let seeds = match kmean.initialize(args.k, KMeans::init_kmeanplusplus, &config) {
        Ok(seeds) => seeds,
        Err(err) if err.is_invalid_argument() => invalid_argument(err.reason()),
        Err(err) => return Err(err).context("k-means++ seeding failed"),
    };

    let centroids = Lloyd
        .fit(&seeds.centroids, &kmean, args.k, args.max_iter, args.epsilon)
        .context("failed to fit the centroids")?;

    let stdout = io::stdout();
    let mut stdout = io::BufWriter::new(stdout.lock());
    output::write_result(&mut stdout, &seeds.centroid_indices, &centroids, kmean.sample_dims())
        .and_then(|_| stdout.flush())
        .context("failed to print the result")?;

    Ok(())
}

use anyhow::Context as _;
use anyhow::Result;
use kmeanspp::dataset::PointSet;
use kmeanspp::{datasets, elbow, KMeansConfig};
use rand::SeedableRng as _;
use std::env;
use std::io;
use std::io::Write as _;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::Registry;

const USAGE: &str = "Usage: elbow [options] >inertia.csv";

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
    options.optopt("f", "file", "headerless CSV of features (default: iris)", "FILE");
    options.optopt("i", "max-iter", "iteration limit of every run (default: 300)", "N");
    options.optopt("m", "mark", "cluster count to mark in the table (default: 3)", "K");
    options.optopt("r", "runs", "runs per cluster count, the best one is kept (default: 10)", "N");
    options.optopt("s", "seed", "seed of the random generator (default: 0)", "N");
    options.optflag("v", "verbose", "print diagnostic data");

    let matches = options.parse(env::args().skip(1))?;

    if matches.opt_present("h") {
        eprintln!("{}", options.usage(USAGE));
        return Ok(());
    }

    init_logging(matches.opt_present("v"));

    let max_iter: usize = matches.opt_get_default("i", 300).context("invalid value for --max-iter")?;
    let mark: usize = matches.opt_get_default("m", 3).context("invalid value for --mark")?;
    let runs: usize = matches.opt_get_default("r", 10).context("invalid value for --runs")?;
    let seed: u64 = matches.opt_get_default("s", 0).context("invalid value for --seed")?;

    let kmean = match matches.opt_str("f") {
        Some(file) => PointSet::from_unkeyed_path(&file)
            .and_then(PointSet::into_kmeans::<f64>)
            .with_context(|| format!("failed to read {file}"))?,
        None => datasets::iris()?,
    };

    let max_k = usize::min(*elbow::DEFAULT_KS.end(), kmean.sample_cnt());
    if max_k < *elbow::DEFAULT_KS.end() {
        tracing::warn!(points = kmean.sample_cnt(), "fewer points than cluster counts to sweep");
    }

    let config = KMeansConfig::build()
        .random_generator(rand_pcg::Pcg64::seed_from_u64(seed))
        .build();
    let inertias = elbow::sweep(&kmean, *elbow::DEFAULT_KS.start()..=max_k, max_iter, runs, &config)?;

    let stdout = io::stdout();
    let mut stdout = io::BufWriter::new(stdout.lock());
    writeln!(stdout, "k,inertia")?;
    for (k, inertia) in inertias {
        let marker = if k == mark { " *" } else { "" };
        writeln!(stdout, "{k},{inertia:.4}{marker}")?;
    }
    stdout.flush()?;

    Ok(())
}

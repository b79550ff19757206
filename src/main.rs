use linext::brute::BruteForceCounter;
use linext::counter::{CounterConfig, ExtensionCounter, HashMode};
use linext::dags::{tom_prior, DagCountEstimator};
use linext::graph::{FixedWidthGraph, OrderedModel, WideGraph};
use linext::matrix::ArcMatrix;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = CounterConfig::default();
    let mut validate_only = false;
    let mut force_wide = false;
    let mut brute = false;
    let mut path: Option<String> = None;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--test" | "--validate" => validate_only = true,
            "--wide" => force_wide = true,
            "--brute" => brute = true,
            "--no-cache" => cfg.hash_mode = HashMode::None,
            "--labelled-hash" => cfg.hash_mode = HashMode::Labelled,
            "--help" | "-h" => usage_and_exit(0),
            s if s.starts_with('-') => usage_and_exit(2),
            s => {
                if path.replace(s.to_string()).is_some() {
                    usage_and_exit(2);
                }
            }
        }
        i += 1;
    }

    if validate_only {
        match linext::validate::validate_known_graphs() {
            Ok(()) => {
                println!("Validation OK: bundled extension counts are correct.");
                return;
            }
            Err(e) => {
                eprintln!("Validation FAILED: {e}");
                std::process::exit(1);
            }
        }
    }

    let path = path.unwrap_or_else(|| usage_and_exit(2));
    let matrix = ArcMatrix::load_from_file(&path).unwrap_or_else(|e| {
        eprintln!("{path}: {e}");
        std::process::exit(1);
    });
    let n = matrix.num_nodes();

    let extensions = if brute {
        FixedWidthGraph::from_model(&matrix)
            .and_then(|g| BruteForceCounter::new().count_extensions(&g))
            .map(|c| c as f64)
    } else {
        let mut counter = ExtensionCounter::with_config(cfg);
        if force_wide {
            WideGraph::from_model(&matrix).and_then(|g| counter.count_perms(&g))
        } else {
            counter.count_model(&matrix)
        }
    };
    let extensions = extensions.unwrap_or_else(|e| {
        eprintln!("{path}: {e}");
        std::process::exit(1);
    });

    let tom = tom_prior(extensions, n);
    let dag = DagCountEstimator::new().dag_prior(n);
    println!("nodes          = {n}");
    println!("extensions     = {extensions}");
    println!("ln(extensions) = {}", extensions.ln());
    println!("TOM prior      = {tom:e}");
    println!("DAG prior      = {dag:e}");
    println!("TOM / DAG      = {}", tom / dag);
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  linext [--wide] [--brute] [--no-cache | --labelled-hash] FILE\n  linext --test\n\nFILE is a square 0/1 arc matrix (row i, column j set means i -> j).\n\nOptions:\n  --wide             Use growable rows even for graphs of at most 64 nodes\n  --brute            Count by enumerating permutations (at most 31 nodes)\n  --no-cache         Disable memoization of branching results\n  --labelled-hash    Key the memo table by the labelled hash instead of the canonical one\n  --test/--validate  Validate bundled graphs with known counts (fast, deterministic)\n\nSet RUST_LOG=debug to trace the counter.\n"
    );
    std::process::exit(code)
}

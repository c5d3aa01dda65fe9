use std::any::Any;
use std::time::Instant;

use ark_bn254::{Fr, G1Projective};
use ark_ec::CurveGroup;
use ark_std::UniformRand;
use clap::{Parser, ValueEnum};
use eyre::WrapErr;
use msm_core::utils::math::Math;
use msm_core::{MsmConfig, MsmEngine};
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;
use tracing_chrome::ChromeLayerBuilder;
use tracing_subscriber::{self, fmt::format::FmtSpan, prelude::*, EnvFilter};

/// Runs a BN254 G1 multi-scalar multiplication on random inputs and traces it.
#[derive(Parser, Debug)]
struct Cli {
    /// Number of points (as 2^scale)
    #[clap(short, long, default_value_t = 16)]
    scale: usize,

    /// Window widths to choose from. Defaults to the built-in table.
    #[clap(short, long, value_delimiter = ',')]
    window: Vec<usize>,

    /// Size of a dedicated worker pool. Defaults to the global rayon pool.
    #[clap(long)]
    workers: Option<usize>,

    /// Number of scalar vectors to run against the same bases
    #[clap(short, long, default_value_t = 1)]
    batches: usize,

    /// Seed for the input generator
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Output formats
    #[clap(short, long, value_enum)]
    format: Option<Vec<Format>>,
}

#[derive(Debug, Clone, ValueEnum, PartialEq)]
enum Format {
    Default,
    Chrome,
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    let _guards = init_tracing(cli.format.as_deref().unwrap_or_default());

    let mut config = if cli.window.is_empty() {
        MsmConfig::default()
    } else {
        MsmConfig::from_widths(&cli.window).wrap_err("invalid --window")?
    };
    if let Some(workers) = cli.workers {
        config = config.with_num_workers(workers);
    }
    let engine = MsmEngine::new(config).wrap_err("failed to build the MSM engine")?;

    let n = cli.scale.pow2();
    let span = tracing::info_span!("generate_inputs", n, batches = cli.batches);
    let (bases, scalar_batches) = span.in_scope(|| {
        let mut rng = ChaCha20Rng::seed_from_u64(cli.seed);
        let bases: Vec<G1Projective> = (0..n).map(|_| G1Projective::rand(&mut rng)).collect();
        let scalar_batches: Vec<Vec<Fr>> = (0..cli.batches)
            .map(|_| (0..n).map(|_| Fr::rand(&mut rng)).collect())
            .collect();
        (G1Projective::normalize_batch(&bases), scalar_batches)
    });

    tracing::info!(
        n,
        batches = cli.batches,
        workers = engine.num_workers(),
        "running msm"
    );
    let start = Instant::now();
    let results = if let [scalars] = scalar_batches.as_slice() {
        vec![engine.multi_exp(&bases, scalars)?]
    } else {
        let batches: Vec<&[Fr]> = scalar_batches.iter().map(Vec::as_slice).collect();
        engine.batch_multi_exp(&bases, &batches)?
    };
    let elapsed = start.elapsed();

    for (i, result) in results.iter().enumerate() {
        tracing::info!(batch = i, result = %result.into_affine(), "msm result");
    }
    tracing::info!(?elapsed, "msm complete");
    Ok(())
}

fn init_tracing(format: &[Format]) -> Vec<Box<dyn Any>> {
    let mut layers = Vec::new();

    let log_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(log_filter)
        .boxed();
    layers.push(log_layer);

    let mut guards: Vec<Box<dyn Any>> = vec![];

    if format.contains(&Format::Default) {
        let collector_layer = tracing_subscriber::fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .compact()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_thread_names(true)
            .boxed();
        layers.push(collector_layer);
    }
    if format.contains(&Format::Chrome) {
        let (chrome_layer, guard) = ChromeLayerBuilder::new().include_args(true).build();
        layers.push(chrome_layer.boxed());
        guards.push(Box::new(guard));
    }

    tracing_subscriber::registry().with(layers).init();
    if format.contains(&Format::Chrome) {
        tracing::info!("Running tracing-chrome. Files will be saved as trace-<some timestamp>.json and can be viewed in https://ui.perfetto.dev/");
    }
    guards
}

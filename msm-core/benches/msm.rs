use ark_bn254::{Fr, G1Affine, G1Projective};
use ark_ec::{CurveGroup, VariableBaseMSM};
use ark_std::UniformRand;
use criterion::Criterion;
use msm_core::msm::{MsmConfig, MsmEngine, WindowWidth, DEFAULT_WINDOWS};
use msm_core::utils::math::Math;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

fn setup_bench(log_n: usize) -> (Vec<G1Affine>, Vec<Fr>) {
    let mut rng = ChaCha20Rng::seed_from_u64(log_n as u64);
    let n = log_n.pow2();
    let bases: Vec<G1Projective> = std::iter::repeat_with(|| G1Projective::rand(&mut rng))
        .take(n)
        .collect();
    let scalars = std::iter::repeat_with(|| Fr::rand(&mut rng)).take(n).collect();
    (G1Projective::normalize_batch(&bases), scalars)
}

fn benchmark_windows(c: &mut Criterion, log_n: usize) {
    let (bases, scalars) = setup_bench(log_n);

    let engine = MsmEngine::default();
    c.bench_function(&format!("multi_exp 2^{log_n} [selected]"), |b| {
        b.iter(|| engine.multi_exp(&bases, &scalars).unwrap());
    });

    for &window in DEFAULT_WINDOWS.iter().chain([WindowWidth::C11].iter()) {
        let engine = MsmEngine::new(MsmConfig::default().with_window(window)).unwrap();
        c.bench_function(&format!("multi_exp 2^{log_n} [c = {}]", window.bits()), |b| {
            b.iter(|| engine.multi_exp(&bases, &scalars).unwrap());
        });
    }

    c.bench_function(&format!("ark_ec msm 2^{log_n}"), |b| {
        b.iter(|| G1Projective::msm(&bases, &scalars).unwrap());
    });
}

fn main() {
    let mut criterion = Criterion::default()
        .configure_from_args()
        .sample_size(10)
        .warm_up_time(std::time::Duration::from_secs(5));

    benchmark_windows(&mut criterion, 10);
    benchmark_windows(&mut criterion, 14);
    benchmark_windows(&mut criterion, 18);

    criterion.final_summary();
}

use ark_ec::short_weierstrass::{Affine, Projective, SWCurveConfig};
use ark_ff::{BigInteger, PrimeField};
use ark_std::Zero;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod accumulator;
pub mod config;
pub mod extended_jacobian;
pub mod partition;
pub mod reduce;
pub mod scheduler;
pub mod window;

pub use config::MsmConfig;
pub use partition::{partition_scalars, PartitionedScalars};
pub use reduce::reduce_chunks;
pub use scheduler::{ChunkResults, ChunkScheduler};
pub use window::{select_window, WindowWidth, DEFAULT_WINDOWS};

use crate::utils::errors::MsmError;
use accumulator::accumulate_chunk;
use window::WindowVisitor;

type BigIntOf<P> = <<P as ark_ec::CurveConfig>::ScalarField as PrimeField>::BigInt;

/// Multi-scalar multiplication `sum_i scalars[i] * bases[i]` by the signed
/// bucket method (https://eprint.iacr.org/2012/549.pdf, section 4).
pub trait MultiExp: Sized {
    type Base;
    type Scalar;

    fn multi_exp(bases: &[Self::Base], scalars: &[Self::Scalar]) -> Result<Self, MsmError> {
        Self::multi_exp_with_config(bases, scalars, &MsmConfig::default())
    }

    /// Builds a fresh [`MsmEngine`] from `config` on every call, so a
    /// `num_workers` setting spawns a new worker pool each time. Hold an
    /// [`MsmEngine`] instead when calling repeatedly.
    fn multi_exp_with_config(
        bases: &[Self::Base],
        scalars: &[Self::Scalar],
        config: &MsmConfig,
    ) -> Result<Self, MsmError>;

    fn batch_multi_exp(
        bases: &[Self::Base],
        scalar_batches: &[&[Self::Scalar]],
    ) -> Result<Vec<Self>, MsmError>;
}

impl<P: SWCurveConfig> MultiExp for Projective<P> {
    type Base = Affine<P>;
    type Scalar = P::ScalarField;

    fn multi_exp_with_config(
        bases: &[Affine<P>],
        scalars: &[P::ScalarField],
        config: &MsmConfig,
    ) -> Result<Self, MsmError> {
        MsmEngine::new(config.clone())?.multi_exp(bases, scalars)
    }

    fn batch_multi_exp(
        bases: &[Affine<P>],
        scalar_batches: &[&[P::ScalarField]],
    ) -> Result<Vec<Self>, MsmError> {
        MsmEngine::default().batch_multi_exp(bases, scalar_batches)
    }
}

/// An [`MsmConfig`] together with the scheduler it describes. Building an
/// engine with a dedicated worker count spawns its pool once, so reuse the
/// engine across calls.
pub struct MsmEngine {
    config: MsmConfig,
    scheduler: ChunkScheduler,
}

impl Default for MsmEngine {
    fn default() -> Self {
        Self {
            config: MsmConfig::default(),
            scheduler: ChunkScheduler::global(),
        }
    }
}

impl MsmEngine {
    pub fn new(config: MsmConfig) -> Result<Self, MsmError> {
        config.validate()?;
        let scheduler = match config.num_workers {
            Some(num_workers) => ChunkScheduler::with_workers(num_workers)?,
            None => ChunkScheduler::global(),
        };
        Ok(Self { config, scheduler })
    }

    pub fn config(&self) -> &MsmConfig {
        &self.config
    }

    pub fn num_workers(&self) -> usize {
        self.scheduler.num_workers()
    }

    #[tracing::instrument(skip_all, name = "MsmEngine::multi_exp", fields(n = bases.len()))]
    pub fn multi_exp<P: SWCurveConfig>(
        &self,
        bases: &[Affine<P>],
        scalars: &[P::ScalarField],
    ) -> Result<Projective<P>, MsmError> {
        if bases.len() != scalars.len() {
            return Err(MsmError::LengthMismatch(bases.len(), scalars.len()));
        }
        let scalars = ark_std::cfg_iter!(scalars)
            .map(|s| s.into_bigint())
            .collect::<Vec<_>>();
        self.multi_exp_bigint(bases, &scalars)
    }

    /// Same as [`Self::multi_exp`] on scalars already in integer form. Each
    /// scalar must fit in `MODULUS_BIT_SIZE` bits; it need not be reduced. A
    /// wider scalar is rejected with [`MsmError::ScalarTooWide`].
    pub fn multi_exp_bigint<P: SWCurveConfig>(
        &self,
        bases: &[Affine<P>],
        scalars: &[BigIntOf<P>],
    ) -> Result<Projective<P>, MsmError> {
        if bases.len() != scalars.len() {
            return Err(MsmError::LengthMismatch(bases.len(), scalars.len()));
        }
        let scalar_bits = P::ScalarField::MODULUS_BIT_SIZE as usize;
        if let Some((i, scalar)) = scalars
            .iter()
            .enumerate()
            .find(|(_, scalar)| scalar.num_bits() as usize > scalar_bits)
        {
            return Err(MsmError::ScalarTooWide(i, scalar.num_bits() as usize));
        }
        if bases.is_empty() {
            return Ok(Projective::zero());
        }

        let window = select_window(bases.len(), scalar_bits, &self.config.windows)?;
        tracing::debug!(
            c = window.bits(),
            workers = self.scheduler.num_workers(),
            "msm window selected"
        );

        let partitioned = partition_scalars(scalars, window, scalar_bits);
        Ok(window.dispatch(ChunkedMsm {
            bases,
            scalars: &partitioned,
            scheduler: &self.scheduler,
        }))
    }

    /// MSMs of several scalar vectors against the same bases.
    #[tracing::instrument(skip_all, name = "MsmEngine::batch_multi_exp", fields(batches = scalar_batches.len()))]
    pub fn batch_multi_exp<P: SWCurveConfig>(
        &self,
        bases: &[Affine<P>],
        scalar_batches: &[&[P::ScalarField]],
    ) -> Result<Vec<Projective<P>>, MsmError> {
        for (i, scalars) in scalar_batches.iter().enumerate() {
            if scalars.len() != bases.len() {
                return Err(MsmError::BatchLengthMismatch(i, scalars.len(), bases.len()));
            }
        }
        self.scheduler.install(|| {
            ark_std::cfg_iter!(scalar_batches)
                .map(|scalars| self.multi_exp(bases, scalars))
                .collect()
        })
    }
}

/// One MSM at a fixed window width: fan out a bucket accumulator per chunk,
/// then fold the chunk sums.
struct ChunkedMsm<'a, P: SWCurveConfig> {
    bases: &'a [Affine<P>],
    scalars: &'a PartitionedScalars,
    scheduler: &'a ChunkScheduler,
}

impl<P: SWCurveConfig> WindowVisitor for ChunkedMsm<'_, P> {
    type Output = Projective<P>;

    fn visit<const C: usize>(self) -> Projective<P> {
        let num_chunks = self.scalars.num_chunks();
        let chunk_results = self.scheduler.run(num_chunks, |chunk| {
            let _span = tracing::trace_span!("accumulate_chunk", chunk).entered();
            accumulate_chunk::<P, C>(chunk, self.bases, self.scalars)
        });
        reduce_chunks(C, &chunk_results.into_ordered())
    }
}

use ark_ec::short_weierstrass::{Affine, Projective, SWCurveConfig};
use ark_std::Zero;

use super::extended_jacobian::ExtendedJacobian;
use super::partition::{PartitionedScalars, Selector};

/// Per-width constants of the bucket method.
pub struct Window<const C: usize>;

impl<const C: usize> Window<C> {
    /// Signed digits halve the buckets: 2^(c-1) instead of 2^c - 1.
    pub const NUM_BUCKETS: usize = 1 << (C - 1);
    pub const MSB: u64 = 1 << (C - 1);
}

/// Computes `sum_i digit_i * point_i` for one chunk, where `digit_i` is the
/// signed digit of scalar `i` at position `chunk`.
pub fn accumulate_chunk<P: SWCurveConfig, const C: usize>(
    chunk: usize,
    points: &[Affine<P>],
    scalars: &PartitionedScalars,
) -> Projective<P> {
    debug_assert_eq!(scalars.window(), C);
    debug_assert_eq!(points.len(), scalars.len());

    let selector = Selector::new(chunk, C);
    let mut buckets = vec![ExtendedJacobian::<P>::identity(); Window::<C>::NUM_BUCKETS];
    let mut empty = true;

    for (point, scalar) in points.iter().zip(scalars.iter()) {
        let digit = selector.select(scalar);
        if digit == 0 {
            continue;
        }
        empty = false;

        if digit & Window::<C>::MSB == 0 {
            buckets[(digit - 1) as usize].add_mixed(point);
        } else {
            buckets[(digit & !Window::<C>::MSB) as usize].sub_mixed(point);
        }
    }

    if empty {
        return Projective::zero();
    }
    reduce_buckets(&buckets)
}

/// `bucket[0] + 2 * bucket[1] + ... + n * bucket[n - 1]`
pub fn reduce_buckets<P: SWCurveConfig>(buckets: &[ExtendedJacobian<P>]) -> Projective<P> {
    // `running_sum` = sum_{j in k..n} bucket[j], walking k from n - 1 down to 0
    let mut running_sum = Projective::<P>::zero();
    let mut total = Projective::<P>::zero();
    for bucket in buckets.iter().rev() {
        if !bucket.is_identity() {
            running_sum += bucket.into_jacobian();
        }
        total += &running_sum;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msm::partition::partition_scalars;
    use crate::msm::window::WindowWidth;
    use ark_bn254::{g1::Config as G1Config, Fr, G1Affine, G1Projective};
    use ark_ec::AffineRepr;
    use ark_ff::PrimeField;
    use ark_std::{test_rng, UniformRand};

    fn signed(digit: i64) -> Fr {
        if digit < 0 {
            -Fr::from(digit.unsigned_abs())
        } else {
            Fr::from(digit as u64)
        }
    }

    #[test]
    fn bucket_sum_is_weighted() {
        let mut rng = test_rng();
        let points: Vec<G1Affine> = (0..3).map(|_| G1Affine::rand(&mut rng)).collect();
        let mut buckets = vec![ExtendedJacobian::<G1Config>::identity(); 4];
        buckets[0].add_mixed(&points[0]);
        buckets[1].add_mixed(&points[1]);
        buckets[3].sub_mixed(&points[2]);

        let expected = points[0].into_group() + points[1] * Fr::from(2u64)
            - points[2] * Fr::from(4u64);
        assert_eq!(reduce_buckets(&buckets), expected);
    }

    #[test]
    fn all_identity_buckets_reduce_to_identity() {
        let buckets = vec![ExtendedJacobian::<G1Config>::identity(); 8];
        assert!(reduce_buckets(&buckets).is_zero());
    }

    fn check_chunks<const C: usize>(points: &[G1Affine], scalars: &[Fr]) {
        let window = WindowWidth::try_from(C).unwrap();
        let bigints: Vec<_> = scalars.iter().map(|s| s.into_bigint()).collect();
        let partitioned = partition_scalars(&bigints, window, Fr::MODULUS_BIT_SIZE as usize);

        for chunk in 0..partitioned.num_chunks() {
            let expected = points
                .iter()
                .enumerate()
                .map(|(i, p)| *p * signed(partitioned.digits(i).nth(chunk).unwrap()))
                .sum::<G1Projective>();
            assert_eq!(
                accumulate_chunk::<G1Config, C>(chunk, points, &partitioned),
                expected,
                "c = {}, chunk = {}",
                C,
                chunk
            );
        }
    }

    #[test]
    fn chunk_sum_matches_digits() {
        let mut rng = test_rng();
        let points: Vec<G1Affine> = (0..24).map(|_| G1Affine::rand(&mut rng)).collect();
        let mut scalars: Vec<Fr> = (0..24).map(|_| Fr::rand(&mut rng)).collect();
        // repeated scalars land in the same buckets
        scalars[1] = scalars[0];
        scalars[2] = -scalars[0];

        check_chunks::<4>(&points, &scalars);
        check_chunks::<7>(&points, &scalars);
        check_chunks::<11>(&points, &scalars);
    }

    #[test]
    fn zero_chunk_is_identity() {
        let mut rng = test_rng();
        let points: Vec<G1Affine> = (0..4).map(|_| G1Affine::rand(&mut rng)).collect();
        let scalars = vec![Fr::from(3u64).into_bigint(); 4];
        let partitioned = partition_scalars(&scalars, WindowWidth::C4, 254);
        assert!(accumulate_chunk::<G1Config, 4>(5, &points, &partitioned).is_zero());
    }

    #[test]
    fn bucket_counts() {
        assert_eq!(Window::<4>::NUM_BUCKETS, 8);
        assert_eq!(Window::<16>::NUM_BUCKETS, 32768);
        assert_eq!(Window::<5>::MSB, 0b10000);
    }
}

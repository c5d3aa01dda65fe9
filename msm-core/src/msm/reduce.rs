use ark_ec::CurveGroup;

/// Folds per-chunk results into the MSM result by Horner's rule in base
/// `2^c`: starting from the most significant chunk, double `c` times and add
/// the next chunk down. `chunk_results[0]` is the least significant chunk.
pub fn reduce_chunks<G: CurveGroup>(c: usize, chunk_results: &[G]) -> G {
    let Some((most_significant, rest)) = chunk_results.split_last() else {
        return G::zero();
    };

    let mut total = *most_significant;
    for chunk_result in rest.iter().rev() {
        for _ in 0..c {
            total.double_in_place();
        }
        total += chunk_result;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G1Projective};
    use ark_ec::PrimeGroup;
    use ark_std::Zero;

    #[test]
    fn horner_in_base_two_pow_c() {
        let g = G1Projective::generator();
        // 3 + 5 * 16 + 2 * 256
        let chunks = [g * Fr::from(3u64), g * Fr::from(5u64), g * Fr::from(2u64)];
        assert_eq!(reduce_chunks(4, &chunks), g * Fr::from(595u64));
    }

    #[test]
    fn negative_chunks() {
        let g = G1Projective::generator();
        // -1 + 1 * 2^8
        let chunks = [-g, g];
        assert_eq!(reduce_chunks(8, &chunks), g * Fr::from(255u64));
    }

    #[test]
    fn empty_reduces_to_identity() {
        assert!(reduce_chunks::<G1Projective>(16, &[]).is_zero());
    }
}

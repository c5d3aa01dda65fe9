use ark_ff::BigInteger;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::window::WindowWidth;

pub const WORD_BITS: usize = 64;

/// Location of one `c`-bit chunk inside a little-endian word array.
///
/// Computed once per chunk and reused for every scalar. A chunk straddles
/// two words only when `c` does not divide the word width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selector {
    index: usize,
    shift: usize,
    mask: u64,
    multi_word: bool,
}

impl Selector {
    pub fn new(chunk: usize, c: usize) -> Self {
        debug_assert!((2..=16).contains(&c));
        let start = chunk * c;
        let index = start / WORD_BITS;
        let shift = start - index * WORD_BITS;
        Self {
            index,
            shift,
            mask: (1 << c) - 1,
            multi_word: shift + c > WORD_BITS,
        }
    }

    #[inline(always)]
    pub fn select(&self, words: &[u64]) -> u64 {
        let mut bits = words[self.index] >> self.shift;
        if self.multi_word {
            bits |= words[self.index + 1] << (WORD_BITS - self.shift);
        }
        bits & self.mask
    }

    #[inline(always)]
    fn replace(&self, words: &mut [u64], value: u64) {
        let low = &mut words[self.index];
        *low = (*low & !(self.mask << self.shift)) | (value << self.shift);
        if self.multi_word {
            let low_bits = WORD_BITS - self.shift;
            let high = &mut words[self.index + 1];
            *high = (*high & !(self.mask >> low_bits)) | (value >> low_bits);
        }
    }

    pub fn is_multi_word(&self) -> bool {
        self.multi_word
    }
}

/// Number of chunks used for `scalar_bits`-bit scalars: one per `c`-bit
/// window plus a most-significant chunk that absorbs the final carry.
pub fn num_chunks(scalar_bits: usize, c: usize) -> usize {
    scalar_bits.div_ceil(c) + 1
}

/// Scalars re-encoded as signed base-`2^c` digits, packed `c` bits per chunk.
///
/// A stored chunk value `v` means:
/// - `0`: digit 0
/// - `v` with the window msb clear: digit `+v`
/// - `v` with the window msb set: digit `-((v & !msb) + 1)`
#[derive(Clone, Debug)]
pub struct PartitionedScalars {
    c: usize,
    num_chunks: usize,
    words_per_scalar: usize,
    words: Vec<u64>,
}

impl PartitionedScalars {
    pub fn window(&self) -> usize {
        self.c
    }

    pub fn num_chunks(&self) -> usize {
        self.num_chunks
    }

    pub fn len(&self) -> usize {
        self.words.len() / self.words_per_scalar
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn scalar(&self, i: usize) -> &[u64] {
        &self.words[i * self.words_per_scalar..(i + 1) * self.words_per_scalar]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u64]> + '_ {
        self.words.chunks_exact(self.words_per_scalar)
    }

    /// Signed digits of the `i`-th scalar, least significant chunk first.
    pub fn digits(&self, i: usize) -> impl Iterator<Item = i64> + '_ {
        let words = self.scalar(i);
        let msb = 1u64 << (self.c - 1);
        (0..self.num_chunks).map(move |chunk| {
            let bits = Selector::new(chunk, self.c).select(words);
            if bits & msb == 0 {
                bits as i64
            } else {
                -(((bits & !msb) + 1) as i64)
            }
        })
    }
}

/// Recodes every scalar into signed `c`-bit digits.
///
/// Scalars must be below `2^scalar_bits`. The carry chain is sequential per
/// scalar, so the pass is parallel over scalars only.
#[tracing::instrument(skip_all, fields(c = window.bits(), n = scalars.len()))]
pub fn partition_scalars<B: BigInteger>(
    scalars: &[B],
    window: WindowWidth,
    scalar_bits: usize,
) -> PartitionedScalars {
    let c = window.bits();
    let num_chunks = num_chunks(scalar_bits, c);
    let words_per_scalar = (num_chunks * c).div_ceil(WORD_BITS).max(B::NUM_LIMBS);
    let selectors: Vec<Selector> = (0..num_chunks).map(|chunk| Selector::new(chunk, c)).collect();

    let mut words = vec![0u64; scalars.len() * words_per_scalar];
    ark_std::cfg_chunks_mut!(words, words_per_scalar)
        .zip(ark_std::cfg_iter!(scalars))
        .for_each(|(out, scalar)| {
            debug_assert!(scalar.num_bits() as usize <= scalar_bits);
            out[..B::NUM_LIMBS].copy_from_slice(scalar.as_ref());
            recode(out, &selectors, c);
        });

    PartitionedScalars {
        c,
        num_chunks,
        words_per_scalar,
        words,
    }
}

/// Rewrites the chunks of `words` in place, low to high. Chunk `j` is read
/// before it is written and writing it never touches chunk `j + 1`.
fn recode(words: &mut [u64], selectors: &[Selector], c: usize) {
    let msb = 1u64 << (c - 1);
    let radix = 1u64 << c;
    let mut carry = 0;
    for selector in selectors {
        let value = selector.select(words) + carry;
        let encoded = if value >= msb {
            // borrow 2^c from the next window: digit = value - 2^c <= 0
            carry = 1;
            match radix - value {
                0 => 0,
                magnitude => (magnitude - 1) | msb,
            }
        } else {
            carry = 0;
            value
        };
        selector.replace(words, encoded);
    }
    debug_assert_eq!(carry, 0);
}

use crate::utils::errors::MsmError;
use crate::utils::math::Math;

/// Receives the window width as a const generic, so that every width
/// gets its own monomorphised bucket-accumulation path.
pub trait WindowVisitor {
    type Output;

    fn visit<const C: usize>(self) -> Self::Output;
}

macro_rules! window_widths {
    ($($variant:ident => $c:literal),+ $(,)?) => {
        /// Window widths for which a bucket-accumulation path is compiled.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum WindowWidth {
            $($variant),+
        }

        impl WindowWidth {
            pub const ALL: &'static [WindowWidth] = &[$(WindowWidth::$variant),+];

            #[inline]
            pub const fn bits(self) -> usize {
                match self {
                    $(WindowWidth::$variant => $c),+
                }
            }

            #[inline]
            pub fn dispatch<V: WindowVisitor>(self, visitor: V) -> V::Output {
                match self {
                    $(WindowWidth::$variant => visitor.visit::<$c>()),+
                }
            }
        }

        impl TryFrom<usize> for WindowWidth {
            type Error = MsmError;

            fn try_from(c: usize) -> Result<Self, Self::Error> {
                match c {
                    $($c => Ok(WindowWidth::$variant),)+
                    _ => Err(MsmError::UnsupportedWindow(c)),
                }
            }
        }
    };
}

window_widths! {
    C3 => 3,
    C4 => 4,
    C5 => 5,
    C6 => 6,
    C7 => 7,
    C8 => 8,
    C9 => 9,
    C10 => 10,
    C11 => 11,
    C12 => 12,
    C13 => 13,
    C14 => 14,
    C15 => 15,
    C16 => 16,
}

/// Candidate widths considered by [`select_window`] unless configured otherwise.
pub const DEFAULT_WINDOWS: &[WindowWidth] = &[WindowWidth::C4, WindowWidth::C8, WindowWidth::C16];

/// Approximate group operations for an MSM of `num_points` `scalar_bits`-bit
/// scalars with `c`-bit windows: `bits / c * (n + 2^(c-1))`.
///
/// This is a heuristic. It ignores cache effects, the number of workers and
/// the extra cost of windows that straddle two words.
pub fn window_cost(num_points: usize, scalar_bits: usize, c: usize) -> f64 {
    let ops = scalar_bits * (num_points + (c - 1).pow2());
    ops as f64 / c as f64
}

/// Picks the candidate with the lowest [`window_cost`]. Ties go to the
/// earlier candidate.
pub fn select_window(
    num_points: usize,
    scalar_bits: usize,
    candidates: &[WindowWidth],
) -> Result<WindowWidth, MsmError> {
    let mut best: Option<(WindowWidth, f64)> = None;
    for &window in candidates {
        let cost = window_cost(num_points, scalar_bits, window.bits());
        match best {
            Some((_, min)) if cost >= min => {}
            _ => best = Some((window, cost)),
        }
    }
    best.map(|(window, _)| window).ok_or(MsmError::EmptyWindowTable)
}

use core::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MsmError {
    #[error("Length Error: {0} points but {1} scalars")]
    LengthMismatch(usize, usize),
    #[error("Batch {0} has {1} scalars, expected {2}")]
    BatchLengthMismatch(usize, usize, usize),
    #[error("Scalar {0} has {1} bits, more than the scalar field modulus")]
    ScalarTooWide(usize, usize),
    #[error("Unsupported window width: {0}")]
    UnsupportedWindow(usize),
    #[error("Window candidate table is empty")]
    EmptyWindowTable,
    #[error("Invalid worker count: {0}")]
    InvalidWorkerCount(usize),
    #[cfg(feature = "parallel")]
    #[error("Failed to build MSM worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

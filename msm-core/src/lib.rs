#![allow(clippy::needless_range_loop)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::too_long_first_doc_paragraph)]

pub mod msm;
pub mod utils;

pub use msm::{MsmConfig, MsmEngine, MultiExp, WindowWidth};
pub use utils::errors::MsmError;

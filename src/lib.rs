#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::just_underscores_and_digits, clippy::len_without_is_empty)]

extern crate alloc;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod utils;
pub(crate) use utils::helper;
pub use utils::align;

mod error;
pub use error::{ConfigError, MatrixError};

mod config;
pub use config::{AnalysisConfig, Lookback};

mod series;
pub use series::{Instrument, Listing, PriceSample};

mod descriptive;
pub use descriptive::{InstrumentStats, average, mean, standard_deviation, stddev};

mod correlation;
pub use correlation::{correlation, pearson};

mod matrix;
pub use matrix::CorrelationMatrix;

mod matrix_builder;
pub use matrix_builder::{CorrelationReport, build};

mod source;
pub use source::{PriceSource, analyze, collect};

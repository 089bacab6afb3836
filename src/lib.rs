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

mod utils;
pub(crate) use utils::helper;

mod error;
pub use error::CoincidenceError;

mod observation;
pub use observation::Observation;

mod pairs;
pub use pairs::{Pair, Pairs, Partition};

mod tally;
pub use tally::{
    CoincidenceTally, PartitionSummary, PartitionTally, Proportions, proportions, tally,
    tally_outer,
};

mod census;
pub use census::{GroupCount, SeriesCensus};

mod columns;
pub use columns::{observations_from_columns, proportions_from_columns};

//! sluice-core
//!
//! Core types, traits, and utilities shared across the sluice workspace.
//!
//! - `types`: re-exported data model (tags, series, frames, configs, errors).
//! - `provider`: the `DataProvider` trait every upstream source implements.
//! - `preprocessor`: the two-phase `Preprocessor` trait.
//! - `timeseries`: gap detection, resampling, and the join that builds merged frames.
//!
//! Everything here is synchronous; laziness is expressed with iterators.
#![warn(missing_docs)]

/// The two-phase preprocessor contract.
pub mod preprocessor;
/// Provider capability contract.
pub mod provider;
/// Time-series utilities for gap detection, resampling and joining.
pub mod timeseries;
pub mod types;

pub use preprocessor::Preprocessor;
pub use provider::{DataProvider, SeriesStream};
pub use timeseries::infer::find_gaps;
pub use timeseries::merge::{interpolate, join_series};
pub use timeseries::resample::{grid, resample};
pub use types::*;

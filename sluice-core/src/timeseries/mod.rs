//! Time-series utilities shared by preprocessors and the dataset pipeline.
//!
//! Modules include:
//! - `infer`: detect sampling gaps in a raw series
//! - `resample`: bucket raw samples onto a dense timestamp grid
//! - `merge`: interpolate and join resampled series into one frame
/// Gap detection and cadence estimation helpers.
pub mod infer;
/// Merge utilities for joining multiple series into a frame.
pub mod merge;
/// Resampling utilities for aggregating samples onto a fixed grid.
pub mod resample;

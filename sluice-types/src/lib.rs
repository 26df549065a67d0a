//! Sluice-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod frame;
mod reports;
mod series;

pub use config::{
    Aggregation, DatasetConfig, DurationLiteral, FillGapsConfig, Interpolation,
    PreprocessorConfig, ProviderConfig,
};
pub use error::SluiceError;
pub use frame::Frame;
pub use reports::{DatasetReport, GapSummary};
pub use series::{Gap, Series, Tag, TimeRange};

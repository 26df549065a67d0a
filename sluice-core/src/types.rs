//! Re-export of foundational types from `sluice-types`.
// Consolidated re-exports so downstream crates can depend on `sluice-core` only

pub use sluice_types::{
    Aggregation, DatasetConfig, DatasetReport, DurationLiteral, FillGapsConfig, Frame, Gap,
    GapSummary, Interpolation, PreprocessorConfig, ProviderConfig, Series, SluiceError, Tag,
    TimeRange,
};

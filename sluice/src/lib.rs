//! Sluice assembles machine-learning datasets from tag-addressed time series.
//!
//! Overview
//! - Routes each requested tag to the first registered provider that claims it and
//!   loads every provider's tags in one batch call.
//! - Scans raw series for sampling gaps before they are merged and blanks those
//!   spans in the merged frame afterwards, so interpolation cannot invent data.
//! - Resolves declarative `{"type": ..., ...}` preprocessor records through an
//!   explicit [`PreprocessorRegistry`].
//!
//! Key behaviors and trade-offs
//! - Routing is lazy: [`Sluice::load`] does nothing until iterated, and an unroutable
//!   tag is reported before any provider is called. Partial consumption never
//!   invokes later provider groups.
//! - Provider priority is registration order; there is no fallback to a lower
//!   priority provider when the chosen one fails.
//! - Gap registries accumulate across scans until `reset()`; the dataset pipeline
//!   resets before every assembly.
//!
//! Examples
//! Loading raw series:
//! ```rust,ignore
//! use std::sync::Arc;
//! use sluice::{Sluice, Tag, TimeRange};
//! use sluice_mock::RandomDataProvider;
//!
//! let sluice = Sluice::builder()
//!     .with_provider(Arc::new(RandomDataProvider::new(10, 100, Some(1))?))
//!     .build()?;
//! for series in sluice.load(range, &[Tag::from("tag-1")]) {
//!     let series = series?;
//! }
//! ```
//!
//! Building a dataset with gap handling:
//! ```rust,ignore
//! use serde_json::json;
//! use sluice::DatasetConfig;
//!
//! let mut cfg = DatasetConfig::new(tags, range);
//! cfg.preprocessor = json!({"type": "fill_gaps", "gap_size": "30min", "replace_value": null})
//!     .as_object()
//!     .cloned();
//! let report = sluice.dataset(&cfg).get_data()?;
//! for summary in &report.gap_summaries {
//!     println!("{summary}");
//! }
//! ```
//!
//! See `sluice/examples/` for a runnable end-to-end demonstration.
#![warn(missing_docs)]

pub(crate) mod core;
pub mod dataset;
pub mod preprocess;
mod router;

pub use core::{Sluice, SluiceBuilder};
pub use dataset::TimeSeriesDataset;
pub use preprocess::{
    FILL_GAPS, FillGapsPreprocessor, PreprocessorCtor, PreprocessorRegistry, PreprocessorSpec,
};
pub use router::load::{RoutedSeries, load_from_providers};

pub use sluice_core::{DataProvider, Preprocessor, SeriesStream};
pub use sluice_core::{find_gaps, grid, interpolate, join_series, resample};

// Re-export core types for convenience
pub use sluice_types::{
    Aggregation, DatasetConfig, DatasetReport, DurationLiteral, FillGapsConfig, Frame, Gap,
    GapSummary, Interpolation, PreprocessorConfig, ProviderConfig, Series, SluiceError, Tag,
    TimeRange,
};

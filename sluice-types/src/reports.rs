//! Report envelopes produced by the orchestrator and preprocessors.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::series::Tag;

/// Number of gaps recorded for one tag after a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapSummary {
    /// Tag the gaps belong to.
    pub tag: Tag,
    /// Gap intervals currently recorded for the tag.
    pub count: usize,
}

impl fmt::Display for GapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.count == 1 { "gap" } else { "gaps" };
        write!(f, "Found {} {noun} in '{}' time-series", self.count, self.tag)
    }
}

/// Result of assembling a dataset.
///
/// Carries the merged, preprocessed `frame` and the gap summaries emitted while
/// scanning the raw series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DatasetReport {
    /// Merged table after preprocessing and optional row dropping.
    pub frame: Frame,
    /// One entry per scanned tag, in scan order.
    pub gap_summaries: Vec<GapSummary>,
    /// Rows removed because they still held missing values.
    pub rows_dropped: usize,
}

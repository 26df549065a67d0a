//! Preprocessor trait for stateful transforms around the merge step.

use core::fmt;

use crate::{Frame, GapSummary, Series};

/// Trait implemented by dataset preprocessors.
///
/// A preprocessor observes the raw per-tag series before they are merged
/// ([`Preprocessor::prepare_series`]) and then corrects the merged frame
/// ([`Preprocessor::prepare_data`]). State recorded in the first phase lives until
/// [`Preprocessor::reset`].
pub trait Preprocessor: Send + Sync + fmt::Debug {
    /// Registered type name (e.g. `"fill_gaps"`).
    fn type_name(&self) -> &'static str;

    /// Opaque configuration snapshot for serialization/inspection.
    ///
    /// Two preprocessors built from the same parameters report equal snapshots.
    fn config_json(&self) -> serde_json::Value;

    /// Discard all recorded state, keeping configuration.
    fn reset(&mut self);

    /// Observe a batch of raw series and return it unchanged.
    fn prepare_series(&mut self, series: Vec<Series>) -> Vec<Series>;

    /// Correct the merged frame in place and hand it back.
    fn prepare_data<'f>(&self, frame: &'f mut Frame) -> &'f mut Frame;

    /// Per-tag gap counts reported by the most recent [`Preprocessor::prepare_series`].
    ///
    /// Preprocessors that do not track gaps report nothing.
    fn gap_summaries(&self) -> &[GapSummary] {
        &[]
    }
}

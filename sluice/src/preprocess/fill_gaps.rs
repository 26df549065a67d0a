//! Gap-aware preprocessing: record raw-series gaps, blank them in the merged frame.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use sluice_core::{
    FillGapsConfig, Frame, Gap, GapSummary, Preprocessor, Series, SluiceError, Tag, find_gaps,
};

/// Registered type name of [`FillGapsPreprocessor`].
pub const FILL_GAPS: &str = "fill_gaps";

/// Remembers where each raw series had gaps and blanks those spans after merging.
///
/// Resampling and interpolation paper over missing data; this preprocessor
/// records every step wider than `gap_size` in the raw series and, once the
/// frame is built, overwrites the rows strictly inside each recorded gap with
/// `replace_value` (usually `NaN`, so the rows can be dropped later).
///
/// Gaps accumulate across [`Preprocessor::prepare_series`] calls until
/// [`Preprocessor::reset`].
#[derive(Debug, Clone)]
pub struct FillGapsPreprocessor {
    config: FillGapsConfig,
    gaps: BTreeMap<Tag, Vec<Gap>>,
    summaries: Vec<GapSummary>,
}

impl FillGapsPreprocessor {
    /// Create a preprocessor with an empty gap registry.
    #[must_use]
    pub const fn new(config: FillGapsConfig) -> Self {
        Self {
            config,
            gaps: BTreeMap::new(),
            summaries: Vec::new(),
        }
    }

    /// Build from constructor keyword arguments (`gap_size`, `replace_value`).
    ///
    /// # Errors
    /// Returns `InvalidArg` for missing, unknown or malformed arguments.
    pub fn from_params(params: &Map<String, Value>) -> Result<Self, SluiceError> {
        let config = serde_json::from_value(Value::Object(params.clone()))
            .map_err(|e| SluiceError::InvalidArg(format!("{FILL_GAPS}: {e}")))?;
        Ok(Self::new(config))
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &FillGapsConfig {
        &self.config
    }

    /// Recorded gaps per tag.
    #[must_use]
    pub const fn gaps(&self) -> &BTreeMap<Tag, Vec<Gap>> {
        &self.gaps
    }
}

impl Preprocessor for FillGapsPreprocessor {
    fn type_name(&self) -> &'static str {
        FILL_GAPS
    }

    fn config_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".into(), Value::String(FILL_GAPS.into()));
        if let Ok(Value::Object(params)) = serde_json::to_value(&self.config) {
            out.extend(params);
        }
        Value::Object(out)
    }

    fn reset(&mut self) {
        self.gaps.clear();
        self.summaries.clear();
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "sluice::preprocess::fill_gaps::prepare_series",
            skip(self, series),
            fields(series = series.len(), gap_size = %self.config.gap_size),
        )
    )]
    fn prepare_series(&mut self, series: Vec<Series>) -> Vec<Series> {
        let threshold = self.config.gap_size.as_delta();
        let mut touched: Vec<Tag> = Vec::new();
        for s in &series {
            let found = find_gaps(s, threshold);
            self.gaps.entry(s.name().clone()).or_default().extend(found);
            if !touched.contains(s.name()) {
                touched.push(s.name().clone());
            }
        }

        self.summaries = touched
            .into_iter()
            .map(|tag| {
                let count = self.gaps.get(&tag).map_or(0, Vec::len);
                GapSummary { tag, count }
            })
            .collect();
        #[cfg(feature = "tracing")]
        for summary in &self.summaries {
            tracing::info!(tag = %summary.tag, count = summary.count, "{summary}");
        }
        series
    }

    fn prepare_data<'f>(&self, frame: &'f mut Frame) -> &'f mut Frame {
        let fill = self.config.replace_value;
        for (tag, gaps) in &self.gaps {
            let rows: Vec<_> = gaps
                .iter()
                .map(|g| frame.rows_between(g.start, g.end))
                .collect();
            let Some(column) = frame.column_mut(tag.as_str()) else {
                continue;
            };
            for r in rows {
                column[r].fill(fill);
            }
        }
        frame
    }

    fn gap_summaries(&self) -> &[GapSummary] {
        &self.summaries
    }
}

//! Dataset assembly: route, scan, join, correct.

use std::collections::HashMap;

use chrono::TimeDelta;
use sluice_core::{
    DatasetConfig, DatasetReport, Preprocessor, Series, SluiceError, TimeRange, join_series,
};

use crate::Sluice;
use crate::preprocess::PreprocessorSpec;

/// A dataset description bound to a `Sluice` orchestrator.
///
/// Assembly pipeline run by [`TimeSeriesDataset::get_data`]:
/// 1. validate the training range and resolution;
/// 2. route and load every configured tag;
/// 3. reset the preprocessor and let it scan the raw series;
/// 4. resample, interpolate and join the series on the dense row grid;
/// 5. let the preprocessor correct the merged frame;
/// 6. drop rows still holding `NaN` when `drop_na` is set.
pub struct TimeSeriesDataset<'a> {
    sluice: &'a Sluice,
    config: DatasetConfig,
    preprocessor: Option<Box<dyn Preprocessor>>,
}

impl<'a> TimeSeriesDataset<'a> {
    pub(crate) const fn new(sluice: &'a Sluice, config: DatasetConfig) -> Self {
        Self {
            sluice,
            config,
            preprocessor: None,
        }
    }

    /// Use `spec` instead of the preprocessor record in the config.
    ///
    /// # Errors
    /// Returns the registry's error if a record cannot be resolved.
    pub fn with_preprocessor(
        mut self,
        spec: impl Into<PreprocessorSpec>,
    ) -> Result<Self, SluiceError> {
        self.preprocessor = Some(self.sluice.registry.normalize(spec)?);
        Ok(self)
    }

    /// The bound configuration.
    #[must_use]
    pub const fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// The resolved preprocessor, once one has been set or resolved by `get_data`.
    #[must_use]
    pub fn preprocessor(&self) -> Option<&dyn Preprocessor> {
        self.preprocessor.as_deref()
    }

    fn validate(&self) -> Result<(TimeRange, TimeDelta), SluiceError> {
        let range = TimeRange::try_new(self.config.train_start_date, self.config.train_end_date)?;
        let resolution = self.config.resolution.as_delta();
        if resolution <= TimeDelta::zero() {
            return Err(SluiceError::InvalidArg(format!(
                "resolution must be positive, got {}",
                self.config.resolution
            )));
        }
        if self.config.tags.is_empty() {
            return Err(SluiceError::InvalidArg("no tags configured for dataset".into()));
        }
        Ok((range, resolution))
    }

    /// Load, preprocess and merge the configured tags.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty or inverted range, a non-positive resolution or
    /// an empty tag list; routing and provider errors unchanged; registry errors while
    /// resolving the preprocessor record; `Data` for duplicate tags.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "sluice::dataset::get_data",
            skip(self),
            fields(
                tags = self.config.tags.len(),
                from = %self.config.train_start_date,
                to = %self.config.train_end_date,
            ),
        )
    )]
    pub fn get_data(&mut self) -> Result<DatasetReport, SluiceError> {
        let (range, resolution) = self.validate()?;

        let mut series: Vec<Series> = self
            .sluice
            .load(range, &self.config.tags)
            .collect::<Result<_, _>>()?;
        let order: HashMap<&str, usize> = self
            .config
            .tags
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();
        series.sort_by_key(|s| order.get(s.name().as_str()).copied().unwrap_or(usize::MAX));

        if self.preprocessor.is_none()
            && let Some(record) = &self.config.preprocessor
        {
            self.preprocessor = Some(self.sluice.registry.resolve_record(record)?);
        }

        let mut gap_summaries = Vec::new();
        if let Some(p) = self.preprocessor.as_mut() {
            p.reset();
            series = p.prepare_series(series);
            gap_summaries = p.gap_summaries().to_vec();
        }

        let mut frame = join_series(
            &series,
            range,
            resolution,
            self.config.aggregation,
            self.config.interpolation,
            self.config.interpolation_limit.map(|l| l.as_delta()),
        )?;

        if let Some(p) = self.preprocessor.as_ref() {
            p.prepare_data(&mut frame);
        }

        let rows_dropped = if self.config.drop_na {
            frame.drop_na_rows()
        } else {
            0
        };

        #[cfg(feature = "tracing")]
        tracing::info!(
            rows = frame.height(),
            columns = frame.width(),
            rows_dropped,
            "dataset assembled"
        );

        Ok(DatasetReport {
            frame,
            gap_summaries,
            rows_dropped,
        })
    }
}

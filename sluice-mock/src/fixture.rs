use std::collections::BTreeMap;
use std::sync::Mutex;

use sluice_core::{DataProvider, Series, SeriesStream, SluiceError, Tag, TimeRange};

/// In-memory provider serving pre-built series.
///
/// Series are clipped to the requested range. Tags without a fixture fail with
/// `NotFound`; a tag registered through [`FixtureProvider::fail_with`] yields
/// that error instead.
pub struct FixtureProvider {
    name: &'static str,
    series: BTreeMap<Tag, Series>,
    failures: BTreeMap<Tag, SluiceError>,
    calls: Mutex<Vec<Vec<Tag>>>,
}

impl FixtureProvider {
    /// Empty provider named `name`.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            series: BTreeMap::new(),
            failures: BTreeMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Serve `series` under its own name.
    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.insert(series.name().clone(), series);
        self
    }

    /// Claim `tag` but fail with `err` when it is loaded.
    #[must_use]
    pub fn fail_with(mut self, tag: impl Into<Tag>, err: SluiceError) -> Self {
        self.failures.insert(tag.into(), err);
        self
    }

    /// Tag batches received so far, one entry per loader invocation.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<Tag>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn clipped(&self, tag: &Tag, range: TimeRange) -> Result<Series, SluiceError> {
        if let Some(err) = self.failures.get(tag) {
            return Err(err.clone());
        }
        let s = self
            .series
            .get(tag)
            .ok_or_else(|| SluiceError::not_found(format!("fixture for tag '{tag}'")))?;
        Series::from_points(tag.clone(), s.iter().filter(|(ts, _)| range.contains(*ts)))
    }
}

impl DataProvider for FixtureProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn can_handle_tag(&self, tag: &Tag) -> bool {
        self.series.contains_key(tag) || self.failures.contains_key(tag)
    }

    fn load_series<'a>(&'a self, range: TimeRange, tags: Vec<Tag>) -> SeriesStream<'a> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(tags.clone());
        }
        Box::new(tags.into_iter().map(move |t| self.clipped(&t, range)))
    }
}

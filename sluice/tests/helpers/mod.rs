// Shared fixtures for integration tests; not every suite uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sluice::{DataProvider, Series, Sluice, Tag, TimeRange};
use sluice_mock::{FixtureProvider, RegexProvider};

/// Whole-second UTC timestamp.
pub fn t(sec: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(sec, 0).unwrap()
}

/// `[from, to)` in whole seconds.
pub fn range(from: i64, to: i64) -> TimeRange {
    TimeRange::new(t(from), t(to))
}

pub fn tags(names: &[&str]) -> Vec<Tag> {
    names.iter().copied().map(Tag::from).collect()
}

pub fn names<'a>(series: impl IntoIterator<Item = &'a Series>) -> Vec<String> {
    series.into_iter().map(|s| s.name().to_string()).collect()
}

/// Series with value `v` at each of the given seconds.
pub fn flat(name: &str, secs: &[i64], v: f64) -> Series {
    Series::from_points(name, secs.iter().map(|&s| (t(s), v))).unwrap()
}

/// Provider claiming tags starting with "ab".
pub fn ab_provider() -> Arc<RegexProvider> {
    Arc::new(RegexProvider::new("ab", "ab.*").unwrap())
}

/// Provider claiming tags containing a "b".
pub fn containing_b_provider() -> Arc<RegexProvider> {
    Arc::new(RegexProvider::new("containing-b", ".*b.*").unwrap())
}

pub fn sluice_with(providers: &[Arc<dyn DataProvider>]) -> Sluice {
    providers
        .iter()
        .cloned()
        .fold(Sluice::builder(), sluice::SluiceBuilder::with_provider)
        .build()
        .unwrap()
}

pub fn fixture(name: &'static str, series: impl IntoIterator<Item = Series>) -> FixtureProvider {
    series
        .into_iter()
        .fold(FixtureProvider::new(name), FixtureProvider::with_series)
}

//! Tags, time ranges and raw per-tag series.

use core::fmt;
use std::borrow::Borrow;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SluiceError;

/// Opaque identifier of one logical measurement stream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Construct a tag from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the tag name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the tag and return the inner name.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Half-open interval `[from, to)` bounding a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive start.
    pub from: DateTime<Utc>,
    /// Exclusive end.
    pub to: DateTime<Utc>,
}

impl TimeRange {
    /// Construct a range without validating ordering.
    ///
    /// Providers receive whatever the caller asked for; use [`TimeRange::try_new`]
    /// where an empty or inverted range must be rejected.
    #[must_use]
    pub const fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Construct a range, rejecting `from >= to`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the range is empty or inverted.
    pub fn try_new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, SluiceError> {
        if from >= to {
            return Err(SluiceError::InvalidArg(format!(
                "time range start {from} must be before end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// Whether `ts` falls inside `[from, to)`.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.from <= ts && ts < self.to
    }

    /// Length of the range; negative for inverted ranges.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.to - self.from
    }
}

/// A gap between two real, present samples of one tag.
///
/// No reliable sample exists strictly between `start` and `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Gap {
    /// Timestamp of the last sample before the gap.
    pub start: DateTime<Utc>,
    /// Timestamp of the first sample after the gap.
    pub end: DateTime<Utc>,
}

impl Gap {
    /// Whether `ts` lies strictly inside the gap; the bounding samples do not.
    #[must_use]
    pub fn covers(&self, ts: DateTime<Utc>) -> bool {
        self.start < ts && ts < self.end
    }

    /// Length of the gap.
    #[must_use]
    pub fn width(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// Time-indexed scalar values for a single tag.
///
/// Invariant: timestamps are strictly increasing and there is exactly one value
/// per timestamp. `NaN` marks a missing value. Deserialization goes through
/// [`Series::new`], so serialized input is held to the same invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct Series {
    name: Tag,
    index: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl Series {
    /// Build a series from parallel index/value vectors.
    ///
    /// # Errors
    /// Returns `Data` if the lengths differ or the index is not strictly increasing.
    pub fn new(
        name: impl Into<Tag>,
        index: Vec<DateTime<Utc>>,
        values: Vec<f64>,
    ) -> Result<Self, SluiceError> {
        let name = name.into();
        if index.len() != values.len() {
            return Err(SluiceError::Data(format!(
                "series '{name}' has {} timestamps but {} values",
                index.len(),
                values.len()
            )));
        }
        if let Some(w) = index.windows(2).find(|w| w[0] >= w[1]) {
            return Err(SluiceError::Data(format!(
                "series '{name}' index is not strictly increasing at {}",
                w[1]
            )));
        }
        Ok(Self {
            name,
            index,
            values,
        })
    }

    /// Build a series from `(timestamp, value)` pairs.
    ///
    /// # Errors
    /// Returns `Data` if the timestamps are not strictly increasing.
    pub fn from_points<I>(name: impl Into<Tag>, points: I) -> Result<Self, SluiceError>
    where
        I: IntoIterator<Item = (DateTime<Utc>, f64)>,
    {
        let (index, values): (Vec<_>, Vec<_>) = points.into_iter().unzip();
        Self::new(name, index, values)
    }

    /// An empty series for `name`.
    pub fn empty(name: impl Into<Tag>) -> Self {
        Self {
            name: name.into(),
            index: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Tag this series belongs to.
    #[must_use]
    pub const fn name(&self) -> &Tag {
        &self.name
    }

    /// Sample timestamps.
    #[must_use]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Sample values, aligned with [`Series::index`].
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the series has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterate `(timestamp, value)` pairs in time order.
    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.index.iter().copied().zip(self.values.iter().copied())
    }

    /// Consecutive timestamp pairs `(earlier, later)`.
    pub fn steps(&self) -> impl Iterator<Item = (DateTime<Utc>, DateTime<Utc>)> + '_ {
        self.index.windows(2).map(|w| (w[0], w[1]))
    }
}

#[derive(Deserialize)]
struct RawSeries {
    name: Tag,
    index: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TryFrom<RawSeries> for Series {
    type Error = SluiceError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.index, raw.values)
    }
}

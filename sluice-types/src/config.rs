//! Configuration records shared by the orchestrator, preprocessors and providers.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::SluiceError;
use crate::series::{Tag, TimeRange};

/// A duration that can be written as a literal (`"10min"`, `"1h 30m"`) or as seconds.
///
/// Literals are parsed with `humantime`; numbers are interpreted as seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DurationLiteral(TimeDelta);

impl DurationLiteral {
    /// Wrap an existing delta.
    #[must_use]
    pub const fn new(delta: TimeDelta) -> Self {
        Self(delta)
    }

    /// Build from whole seconds.
    #[must_use]
    pub fn from_seconds(secs: i64) -> Self {
        Self(TimeDelta::seconds(secs))
    }

    /// Parse a human-readable duration literal such as `"5min"` or `"2h"`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the literal cannot be parsed or does not fit a `TimeDelta`.
    pub fn parse(literal: &str) -> Result<Self, SluiceError> {
        let std = humantime::parse_duration(literal.trim())?;
        TimeDelta::from_std(std)
            .map(Self)
            .map_err(|_| SluiceError::InvalidArg(format!("duration out of range: {literal}")))
    }

    /// The wrapped delta.
    #[must_use]
    pub const fn as_delta(self) -> TimeDelta {
        self.0
    }
}

impl From<TimeDelta> for DurationLiteral {
    fn from(d: TimeDelta) -> Self {
        Self(d)
    }
}

impl FromStr for DurationLiteral {
    type Err = SluiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DurationLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.to_std() {
            Ok(std) => write!(f, "{}", humantime::format_duration(std)),
            Err(_) => write!(f, "{}s", self.0.num_seconds()),
        }
    }
}

impl Serialize for DurationLiteral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DurationLiteral {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seconds(i64),
            FractionalSeconds(f64),
            Literal(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Seconds(s) => Ok(Self::from_seconds(s)),
            Raw::FractionalSeconds(s) if s.is_finite() => {
                #[allow(clippy::cast_possible_truncation)]
                let micros = (s * 1_000_000.0).round() as i64;
                Ok(Self(TimeDelta::microseconds(micros)))
            }
            Raw::FractionalSeconds(s) => Err(serde::de::Error::custom(format!(
                "duration must be finite, got {s}"
            ))),
            Raw::Literal(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

/// Bucket aggregation applied when resampling a raw series onto the dataset grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Aggregation {
    /// Arithmetic mean of the samples in the bucket.
    #[default]
    Mean,
    /// Smallest sample in the bucket.
    Min,
    /// Largest sample in the bucket.
    Max,
    /// Earliest sample in the bucket.
    First,
    /// Latest sample in the bucket.
    Last,
    /// Sum of the samples in the bucket.
    Sum,
}

/// How empty grid cells between real samples are filled after resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Interpolation {
    /// Linear interpolation between the neighbouring real samples.
    #[default]
    LinearInterpolation,
    /// Carry the last real sample forward.
    Ffill,
    /// Leave empty cells as `NaN`.
    None,
}

/// Parameters of the `fill_gaps` preprocessor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FillGapsConfig {
    /// Consecutive samples further apart than this are considered a gap.
    pub gap_size: DurationLiteral,
    /// Value written into gap rows of the merged table; `null` means `NaN`.
    #[serde(
        serialize_with = "serialize_nan_as_null",
        deserialize_with = "deserialize_null_as_nan"
    )]
    pub replace_value: f64,
}

impl FillGapsConfig {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(gap_size: TimeDelta, replace_value: f64) -> Self {
        Self {
            gap_size: DurationLiteral::new(gap_size),
            replace_value,
        }
    }
}

fn serialize_nan_as_null<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if v.is_nan() {
        serializer.serialize_none()
    } else {
        serializer.serialize_f64(*v)
    }
}

fn deserialize_null_as_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// A declarative preprocessor record: `{"type": <name>, ...constructor kwargs}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// Registered type name, e.g. `"fill_gaps"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Remaining constructor keyword arguments.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl PreprocessorConfig {
    /// Split a raw JSON record into its type name and kwargs.
    ///
    /// The input is left untouched; the parameters are copied.
    ///
    /// # Errors
    /// Returns `Config` if `type` is absent or not a string.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, SluiceError> {
        let kind = match record.get("type") {
            None | Some(Value::Null) => {
                return Err(SluiceError::Config("a preprocessor type is empty".into()));
            }
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(SluiceError::Config(format!(
                    "preprocessor type must be a string, got {other}"
                )));
            }
        };
        let mut params = record.clone();
        params.remove("type");
        Ok(Self { kind, params })
    }

    /// Render back into a single JSON record including `type`.
    #[must_use]
    pub fn to_record(&self) -> Map<String, Value> {
        let mut out = Map::with_capacity(self.params.len() + 1);
        out.insert("type".into(), Value::String(self.kind.clone()));
        out.extend(self.params.iter().map(|(k, v)| (k.clone(), v.clone())));
        out
    }
}

/// Serializable description of a synthetic data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[non_exhaustive]
pub enum ProviderConfig {
    /// Random values at random timestamps for any tag.
    RandomDataProvider {
        /// Minimum number of samples per generated series.
        min_size: usize,
        /// Maximum number of samples per generated series.
        max_size: usize,
        /// Optional RNG seed for reproducible output.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },
}

fn default_resolution() -> DurationLiteral {
    DurationLiteral::from_seconds(600)
}

fn default_interpolation_limit() -> Option<DurationLiteral> {
    Some(DurationLiteral::from_seconds(8 * 3600))
}

const fn default_true() -> bool {
    true
}

/// Declarative description of a training/inference dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Tags to load, in column order.
    pub tags: Vec<Tag>,
    /// Inclusive start of the dataset.
    pub train_start_date: DateTime<Utc>,
    /// Exclusive end of the dataset.
    pub train_end_date: DateTime<Utc>,
    /// Spacing of the merged table's row grid.
    #[serde(default = "default_resolution")]
    pub resolution: DurationLiteral,
    /// Aggregation used when several samples fall into one grid cell.
    #[serde(default)]
    pub aggregation: Aggregation,
    /// Fill method for empty grid cells.
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Longest run of empty cells that interpolation may fill; `None` means unlimited.
    #[serde(default = "default_interpolation_limit")]
    pub interpolation_limit: Option<DurationLiteral>,
    /// Drop rows that still contain `NaN` after preprocessing.
    #[serde(default = "default_true")]
    pub drop_na: bool,
    /// Optional preprocessor record (`{"type": ..., ...}`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocessor: Option<Map<String, Value>>,
}

impl DatasetConfig {
    /// Create a config for `tags` over `range` with default resampling settings.
    #[must_use]
    pub fn new(tags: Vec<Tag>, range: TimeRange) -> Self {
        Self {
            tags,
            train_start_date: range.from,
            train_end_date: range.to,
            resolution: default_resolution(),
            aggregation: Aggregation::default(),
            interpolation: Interpolation::default(),
            interpolation_limit: default_interpolation_limit(),
            drop_na: true,
            preprocessor: None,
        }
    }

    /// The configured `[train_start_date, train_end_date)` range.
    #[must_use]
    pub const fn range(&self) -> TimeRange {
        TimeRange::new(self.train_start_date, self.train_end_date)
    }
}

//! The merged table: a shared timestamp axis with one `f64` column per tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SluiceError;
use crate::series::Tag;

/// Column-major table keyed by a strictly increasing timestamp index.
///
/// Columns are identified by tag name and keep their insertion order. `NaN`
/// marks a missing cell. Deserialized frames are rebuilt column by column, so
/// every column matches the row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(try_from = "RawFrame")]
pub struct Frame {
    index: Vec<DateTime<Utc>>,
    columns: Vec<Tag>,
    data: Vec<Vec<f64>>,
}

impl Frame {
    /// Create a frame with the given row index and no columns.
    ///
    /// # Errors
    /// Returns `Data` if the index is not strictly increasing.
    pub fn with_index(index: Vec<DateTime<Utc>>) -> Result<Self, SluiceError> {
        if let Some(w) = index.windows(2).find(|w| w[0] >= w[1]) {
            return Err(SluiceError::Data(format!(
                "frame index is not strictly increasing at {}",
                w[1]
            )));
        }
        Ok(Self {
            index,
            columns: Vec::new(),
            data: Vec::new(),
        })
    }

    /// Append a column aligned with the row index.
    ///
    /// # Errors
    /// Returns `Data` if the column length differs from the row count or the
    /// name is already present.
    pub fn push_column(
        &mut self,
        name: impl Into<Tag>,
        values: Vec<f64>,
    ) -> Result<(), SluiceError> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(SluiceError::Data(format!(
                "column '{name}' has {} values for {} rows",
                values.len(),
                self.index.len()
            )));
        }
        if self.position(name.as_str()).is_some() {
            return Err(SluiceError::Data(format!("duplicate column '{name}'")));
        }
        self.columns.push(name);
        self.data.push(values);
        Ok(())
    }

    /// Row timestamps.
    #[must_use]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Column names in order.
    #[must_use]
    pub fn columns(&self) -> &[Tag] {
        &self.columns
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.index.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Whether the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Position of the column named `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.as_str() == name)
    }

    /// Values of the column named `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.position(name).map(|i| self.data[i].as_slice())
    }

    /// Mutable values of the column named `name`.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut [f64]> {
        let i = self.position(name)?;
        Some(self.data[i].as_mut_slice())
    }

    /// Cell at (`ts`, `name`), if both exist.
    #[must_use]
    pub fn get(&self, ts: DateTime<Utc>, name: &str) -> Option<f64> {
        let row = self.index.binary_search(&ts).ok()?;
        self.column(name).map(|c| c[row])
    }

    /// Row positions whose timestamps lie strictly between `start` and `end`.
    #[must_use]
    pub fn rows_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> core::ops::Range<usize> {
        let lo = self.index.partition_point(|ts| *ts <= start);
        let hi = self.index.partition_point(|ts| *ts < end);
        lo..hi.max(lo)
    }

    /// Remove every row that holds a `NaN` in any column; returns the number removed.
    pub fn drop_na_rows(&mut self) -> usize {
        let keep: Vec<bool> = (0..self.index.len())
            .map(|row| self.data.iter().all(|col| !col[row].is_nan()))
            .collect();
        let removed = keep.iter().filter(|k| !**k).count();
        if removed == 0 {
            return 0;
        }
        let mut flags = keep.iter();
        self.index.retain(|_| *flags.next().unwrap_or(&false));
        for col in &mut self.data {
            let mut flags = keep.iter();
            col.retain(|_| *flags.next().unwrap_or(&false));
        }
        removed
    }
}

#[derive(Deserialize)]
struct RawFrame {
    index: Vec<DateTime<Utc>>,
    columns: Vec<Tag>,
    data: Vec<Vec<f64>>,
}

impl TryFrom<RawFrame> for Frame {
    type Error = SluiceError;

    fn try_from(raw: RawFrame) -> Result<Self, Self::Error> {
        if raw.columns.len() != raw.data.len() {
            return Err(SluiceError::Data(format!(
                "frame has {} column names but {} columns",
                raw.columns.len(),
                raw.data.len()
            )));
        }
        let mut frame = Self::with_index(raw.index)?;
        for (name, values) in raw.columns.into_iter().zip(raw.data) {
            frame.push_column(name, values)?;
        }
        Ok(frame)
    }
}

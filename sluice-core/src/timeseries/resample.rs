use chrono::{DateTime, TimeDelta, Utc};

use crate::{Aggregation, Series, SluiceError, TimeRange};

/// Build the dense row axis `from, from + resolution, ...` strictly below `to`.
///
/// # Errors
/// Returns `InvalidArg` if the range is empty/inverted or `resolution` is not positive.
pub fn grid(range: TimeRange, resolution: TimeDelta) -> Result<Vec<DateTime<Utc>>, SluiceError> {
    if resolution <= TimeDelta::zero() {
        return Err(SluiceError::InvalidArg(format!(
            "resolution must be positive, got {resolution}"
        )));
    }
    let range = TimeRange::try_new(range.from, range.to)?;

    let mut out = Vec::new();
    let mut cur = range.from;
    while cur < range.to {
        out.push(cur);
        cur = cur
            .checked_add_signed(resolution)
            .ok_or_else(|| SluiceError::InvalidArg("grid exceeds timestamp range".into()))?;
    }
    Ok(out)
}

#[derive(Default)]
struct BucketAgg {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
    first: f64,
    last: f64,
}

impl BucketAgg {
    fn push(&mut self, v: f64) {
        if self.count == 0 {
            self.min = v;
            self.max = v;
            self.first = v;
        } else {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
        self.last = v;
        self.sum += v;
        self.count += 1;
    }

    fn finish(&self, aggregation: Aggregation) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        match aggregation {
            Aggregation::Min => self.min,
            Aggregation::Max => self.max,
            Aggregation::First => self.first,
            Aggregation::Last => self.last,
            Aggregation::Sum => self.sum,
            #[allow(clippy::cast_precision_loss)]
            Aggregation::Mean => self.sum / self.count as f64,
            _ => f64::NAN,
        }
    }
}

/// Aggregate `series` onto `grid`, one value per grid cell.
///
/// Behavior:
/// - Cell `i` covers `[grid[i], grid[i + 1])`; the last cell spans `resolution`.
/// - Samples before the first cell or after the last one are ignored, as are `NaN` samples.
/// - Cells without samples become `NaN`; interpolation is a separate step.
///
/// # Errors
/// Returns `Data` if `grid` is not strictly increasing.
pub fn resample(
    series: &Series,
    grid: &[DateTime<Utc>],
    resolution: TimeDelta,
    aggregation: Aggregation,
) -> Result<Series, SluiceError> {
    let mut values = vec![f64::NAN; grid.len()];
    if grid.is_empty() {
        return Series::new(series.name().clone(), Vec::new(), values);
    }
    let last_end = grid[grid.len() - 1] + resolution;
    let cell_end = |i: usize| grid.get(i + 1).copied().unwrap_or(last_end);

    let mut cell = 0usize;
    let mut agg = BucketAgg::default();
    for (ts, v) in series.iter() {
        if ts < grid[0] || v.is_nan() {
            continue;
        }
        if ts >= last_end {
            break;
        }
        while ts >= cell_end(cell) {
            values[cell] = agg.finish(aggregation);
            agg = BucketAgg::default();
            cell += 1;
        }
        agg.push(v);
    }
    values[cell] = agg.finish(aggregation);

    Series::new(series.name().clone(), grid.to_vec(), values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(sec: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(sec, 0).unwrap()
    }

    #[test]
    fn grid_is_half_open() {
        let g = grid(TimeRange::new(t(0), t(30)), TimeDelta::seconds(10)).unwrap();
        assert_eq!(g, vec![t(0), t(10), t(20)]);
    }

    #[test]
    fn grid_rejects_bad_inputs() {
        assert!(grid(TimeRange::new(t(0), t(30)), TimeDelta::zero()).is_err());
        assert!(grid(TimeRange::new(t(30), t(0)), TimeDelta::seconds(1)).is_err());
    }

    #[test]
    fn mean_per_cell_and_empty_cells_are_nan() {
        let s = Series::from_points(
            "a",
            [(t(0), 1.0), (t(5), 3.0), (t(25), 7.0), (t(40), 100.0)],
        )
        .unwrap();
        let g = grid(TimeRange::new(t(0), t(30)), TimeDelta::seconds(10)).unwrap();
        let r = resample(&s, &g, TimeDelta::seconds(10), Aggregation::Mean).unwrap();
        assert_eq!(r.values()[0], 2.0);
        assert!(r.values()[1].is_nan());
        assert_eq!(r.values()[2], 7.0);
        assert_eq!(r.name().as_str(), "a");
    }

    #[test]
    fn aggregations_pick_expected_values() {
        let s = Series::from_points("a", [(t(0), 4.0), (t(1), 1.0), (t(2), 9.0)]).unwrap();
        let g = vec![t(0)];
        let step = TimeDelta::seconds(10);
        let pick = |a| resample(&s, &g, step, a).unwrap().values()[0];
        assert_eq!(pick(Aggregation::Min), 1.0);
        assert_eq!(pick(Aggregation::Max), 9.0);
        assert_eq!(pick(Aggregation::First), 4.0);
        assert_eq!(pick(Aggregation::Last), 9.0);
        assert_eq!(pick(Aggregation::Sum), 14.0);
    }
}

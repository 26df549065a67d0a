use chrono::TimeDelta;

use super::resample::{grid, resample};
use crate::{Aggregation, Frame, Interpolation, Series, SluiceError, TimeRange};

/// Fill `NaN` runs in `values` according to `method`.
///
/// - `LinearInterpolation` fills only runs bounded by real values on both sides.
/// - `Ffill` carries the last real value forward, including trailing runs.
/// - Leading runs (before the first real value) are never filled.
/// - `limit` caps how many cells of each run are filled, counting from the left.
pub fn interpolate(values: &mut [f64], method: Interpolation, limit: Option<usize>) {
    if matches!(method, Interpolation::None) {
        return;
    }
    let mut prev: Option<usize> = None;
    let mut i = 0;
    while i < values.len() {
        if !values[i].is_nan() {
            prev = Some(i);
            i += 1;
            continue;
        }
        let run_start = i;
        while i < values.len() && values[i].is_nan() {
            i += 1;
        }
        let Some(left) = prev else {
            continue;
        };
        let right = (i < values.len()).then_some(i);
        let cap = limit.unwrap_or(usize::MAX);
        let fill_end = run_start + (i - run_start).min(cap);

        match (method, right) {
            (Interpolation::LinearInterpolation, Some(right)) => {
                let (lv, rv) = (values[left], values[right]);
                #[allow(clippy::cast_precision_loss)]
                let span = (right - left) as f64;
                for (k, cell) in values.iter_mut().enumerate().take(fill_end).skip(run_start) {
                    #[allow(clippy::cast_precision_loss)]
                    let frac = (k - left) as f64 / span;
                    *cell = lv + (rv - lv) * frac;
                }
            }
            (Interpolation::Ffill, _) => {
                let lv = values[left];
                for cell in &mut values[run_start..fill_end] {
                    *cell = lv;
                }
            }
            _ => {}
        }
    }
}

/// Join raw series into one frame over a dense `[from, to)` grid.
///
/// - Every series is resampled onto the grid with `aggregation`, then interpolated.
/// - Columns keep the order of `series`; duplicate names are rejected.
/// - `limit` bounds how long a run of empty cells interpolation may bridge; it is
///   converted to a cell count by flooring `limit / resolution`.
///
/// # Errors
/// Returns `InvalidArg` for an empty range or non-positive resolution, and
/// `Data` for duplicate series names.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "sluice_core::timeseries::join_series",
        skip(series, range, resolution, limit),
        fields(series = series.len(), resolution = %resolution),
    )
)]
pub fn join_series(
    series: &[Series],
    range: TimeRange,
    resolution: TimeDelta,
    aggregation: Aggregation,
    interpolation: Interpolation,
    limit: Option<TimeDelta>,
) -> Result<Frame, SluiceError> {
    let index = grid(range, resolution)?;
    let cell_limit = limit.map(|l| {
        let cells = l.num_microseconds().unwrap_or(i64::MAX)
            / resolution.num_microseconds().unwrap_or(i64::MAX).max(1);
        usize::try_from(cells.max(0)).unwrap_or(usize::MAX)
    });

    let mut frame = Frame::with_index(index.clone())?;
    for s in series {
        let resampled = resample(s, &index, resolution, aggregation)?;
        let mut values = resampled.values().to_vec();
        interpolate(&mut values, interpolation, cell_limit);
        frame.push_column(s.name().clone(), values)?;
    }
    Ok(frame)
}

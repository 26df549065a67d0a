use chrono::TimeDelta;

use crate::{Gap, Series};

/// Collect every step of `series` that is strictly wider than `threshold`.
///
/// Each gap runs from the earlier sample to the later one, so the two real
/// samples bounding a gap are not part of it. Gaps are returned in time order.
///
/// ```
/// use chrono::{DateTime, TimeDelta};
/// use sluice_core::{find_gaps, Series};
///
/// let t = |s: i64| DateTime::from_timestamp(s, 0).unwrap();
/// let s = Series::from_points("x", [0, 1, 2, 10, 11].map(|i| (t(i), 0.0))).unwrap();
/// let gaps = find_gaps(&s, TimeDelta::seconds(2));
/// assert_eq!(gaps.len(), 1);
/// assert_eq!((gaps[0].start, gaps[0].end), (t(2), t(10)));
/// ```
#[must_use]
pub fn find_gaps(series: &Series, threshold: TimeDelta) -> Vec<Gap> {
    series
        .steps()
        .filter_map(|(earlier, later)| {
            let diff = later - earlier;
            (diff > threshold).then(|| Gap {
                start: earlier,
                end: earlier + diff,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn t(sec: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(sec, 0).unwrap()
    }

    fn series(ts: &[i64]) -> Series {
        Series::from_points("s", ts.iter().map(|&s| (t(s), 1.0))).unwrap()
    }

    #[test]
    fn gap_must_strictly_exceed_threshold() {
        let s = series(&[0, 2, 4, 7]);
        let gaps = find_gaps(&s, TimeDelta::seconds(2));
        assert_eq!(
            gaps,
            vec![Gap {
                start: t(4),
                end: t(7)
            }]
        );
    }

    #[test]
    fn short_series_have_no_gaps() {
        assert!(find_gaps(&series(&[]), TimeDelta::zero()).is_empty());
        assert!(find_gaps(&series(&[5]), TimeDelta::zero()).is_empty());
    }
}

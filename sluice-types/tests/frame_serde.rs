use chrono::{DateTime, Utc};
use serde_json::json;
use sluice_types::{Frame, Series};

fn t(sec: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(sec, 0).unwrap()
}

#[test]
fn series_deserialize_rejects_unsorted_index() {
    let raw = json!({
        "name": "x",
        "index": [t(10), t(0)],
        "values": [1.0, 2.0],
    });
    let err = serde_json::from_value::<Series>(raw).unwrap_err();
    assert!(err.to_string().contains("not strictly increasing"), "{err}");
}

#[test]
fn series_deserialize_rejects_length_mismatch() {
    let raw = json!({
        "name": "x",
        "index": [t(0), t(10)],
        "values": [1.0],
    });
    assert!(serde_json::from_value::<Series>(raw).is_err());
}

#[test]
fn series_roundtrip_keeps_points() {
    let s = Series::from_points("x", [(t(0), 1.0), (t(5), 2.5)]).unwrap();
    let back: Series = serde_json::from_str(&serde_json::to_string(&s).unwrap()).unwrap();
    assert_eq!(back, s);
}

#[test]
fn frame_deserialize_rejects_short_column() {
    let raw = json!({
        "index": [t(0), t(5), t(10)],
        "columns": ["a"],
        "data": [[1.0]],
    });
    let err = serde_json::from_value::<Frame>(raw).unwrap_err();
    assert!(err.to_string().contains("column 'a'"), "{err}");
}

#[test]
fn frame_deserialize_rejects_unnamed_columns() {
    let raw = json!({
        "index": [t(0)],
        "columns": [],
        "data": [[1.0]],
    });
    assert!(serde_json::from_value::<Frame>(raw).is_err());
}

#[test]
fn frame_roundtrip_keeps_columns() {
    let mut frame = Frame::with_index(vec![t(0), t(5)]).unwrap();
    frame.push_column("a", vec![1.0, 2.0]).unwrap();
    frame.push_column("b", vec![3.0, 4.0]).unwrap();
    let back: Frame = serde_json::from_str(&serde_json::to_string(&frame).unwrap()).unwrap();
    assert_eq!(back, frame);
}

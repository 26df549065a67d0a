use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde_json::json;
use sluice::{DataProvider, DatasetConfig, Series, Sluice, TimeRange};
use sluice_mock::{FixtureProvider, RandomDataProvider};

fn sensor_with_outage(start: DateTime<Utc>) -> Result<Series, sluice::SluiceError> {
    // one sample per minute, with a silent hour in the middle
    let minutes = (0..120).chain(180..360);
    Series::from_points(
        "sensor-with-outage",
        minutes.map(|m: i32| (start + TimeDelta::minutes(m.into()), f64::from(m % 50))),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,sluice=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();

    let start: DateTime<Utc> = "2024-03-01T00:00:00Z".parse()?;
    let range = TimeRange::try_new(start, start + TimeDelta::hours(6))?;

    let fixtures = FixtureProvider::new("fixtures").with_series(sensor_with_outage(start)?);
    let random = RandomDataProvider::new(100, 400, Some(7))?;
    println!("random provider config: {}", serde_json::to_string(&random.to_config())?);

    // Fixture tags take priority; everything else falls through to the random provider.
    let sluice = Sluice::builder()
        .with_provider(Arc::new(fixtures))
        .with_provider(Arc::new(random))
        .build()?;

    let mut cfg = DatasetConfig::new(
        vec!["sensor-with-outage".into(), "synthetic-1".into()],
        range,
    );
    cfg.preprocessor = json!({"type": "fill_gaps", "gap_size": "15min", "replace_value": null})
        .as_object()
        .cloned();

    let report = sluice.dataset(&cfg).get_data()?;
    for summary in &report.gap_summaries {
        println!("{summary}");
    }
    println!(
        "{} rows x {} columns ({} rows dropped)",
        report.frame.height(),
        report.frame.width(),
        report.rows_dropped
    );
    Ok(())
}

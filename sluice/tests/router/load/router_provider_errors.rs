use std::sync::Arc;

use sluice::{DataProvider, SluiceError, load_from_providers};
use sluice_mock::RegexProvider;

use crate::helpers::{fixture, flat, range, tags};

#[test]
fn provider_error_passes_through_unchanged_and_fuses() {
    let boom = SluiceError::provider("fx", "backend unavailable");
    let fx = Arc::new(
        fixture("fx", [flat("ok", &[0], 1.0)]).fail_with("bad", boom.clone()),
    );
    let later = Arc::new(fixture("later", [flat("z", &[0], 1.0)]));
    let providers: Vec<Arc<dyn DataProvider>> = vec![fx, later.clone()];

    let mut it = load_from_providers(&providers, range(0, 10), tags(&["bad", "ok", "z"]));
    assert_eq!(it.next(), Some(Err(boom)));
    assert!(it.next().is_none());
    assert!(later.calls().is_empty());
}

#[test]
fn series_before_the_failure_are_still_delivered() {
    let fx = Arc::new(
        fixture("fx", [flat("ok", &[0], 1.0)])
            .fail_with("bad", SluiceError::not_found("bad in fx")),
    );
    let providers: Vec<Arc<dyn DataProvider>> = vec![fx];

    let out: Vec<_> =
        load_from_providers(&providers, range(0, 10), tags(&["ok", "bad"])).collect();
    assert_eq!(out.len(), 2);
    assert!(out[0].is_ok());
    assert_eq!(out[1], Err(SluiceError::not_found("bad in fx")));
}

#[test]
fn overclaiming_provider_failure_is_not_retried_elsewhere() {
    let greedy = Arc::new(GreedyProvider(RegexProvider::new("greedy", "ok.*").unwrap()));
    let fallback = Arc::new(fixture("fallback", [flat("nope", &[0], 1.0)]));
    let providers: Vec<Arc<dyn DataProvider>> = vec![greedy, fallback.clone()];

    let out: Vec<_> = load_from_providers(&providers, range(0, 10), tags(&["nope"])).collect();
    assert!(matches!(out.as_slice(), [Err(SluiceError::NotFound { .. })]));
    assert!(fallback.calls().is_empty());
}

/// Claims everything but only serves tags starting with "ok".
struct GreedyProvider(RegexProvider);

impl DataProvider for GreedyProvider {
    fn name(&self) -> &'static str {
        self.0.name()
    }
    fn can_handle_tag(&self, _tag: &sluice::Tag) -> bool {
        true
    }
    fn load_series<'a>(
        &'a self,
        range: sluice::TimeRange,
        tags: Vec<sluice::Tag>,
    ) -> sluice::SeriesStream<'a> {
        self.0.load_series(range, tags)
    }
}

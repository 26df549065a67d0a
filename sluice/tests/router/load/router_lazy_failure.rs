use std::sync::Arc;

use sluice::{DataProvider, SluiceError, load_from_providers};

use crate::helpers::{ab_provider, containing_b_provider, range, tags};

#[test]
fn unroutable_tag_fails_on_first_next_before_any_provider_call() {
    let ab = ab_provider();
    let b = containing_b_provider();
    let providers: Vec<Arc<dyn DataProvider>> = vec![ab.clone(), b.clone()];

    let mut it = load_from_providers(&providers, range(0, 10), tags(&["ab", "unmatched"]));
    // construction alone does nothing
    assert_eq!(ab.call_count() + b.call_count(), 0);

    let err = it.next().unwrap().unwrap_err();
    assert!(err.is_routing());
    assert_eq!(err.unroutable_tags(), &["unmatched".to_string()]);
    assert_eq!(ab.call_count() + b.call_count(), 0);

    assert!(it.next().is_none());
    assert!(it.next().is_none());
    assert_eq!(ab.call_count() + b.call_count(), 0);
}

#[test]
fn every_unmatched_tag_is_named() {
    let providers: Vec<Arc<dyn DataProvider>> = vec![ab_provider()];
    let mut it = load_from_providers(&providers, range(0, 10), tags(&["x", "abc", "y"]));
    let err = it.next().unwrap().unwrap_err();
    assert_eq!(
        err,
        SluiceError::unroutable(["x".to_string(), "y".to_string()])
    );
}

#[test]
fn empty_tag_list_yields_nothing() {
    let ab = ab_provider();
    let providers: Vec<Arc<dyn DataProvider>> = vec![ab.clone()];
    let mut it = load_from_providers(&providers, range(0, 10), Vec::new());
    assert!(it.next().is_none());
    assert_eq!(ab.call_count(), 0);
}

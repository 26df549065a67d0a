use std::sync::Arc;

use sluice::{DataProvider, load_from_providers};

use crate::helpers::{ab_provider, containing_b_provider, fixture, flat, names, range, tags};

#[test]
fn groups_follow_provider_priority() {
    let ab = ab_provider();
    let b = containing_b_provider();
    let providers: Vec<Arc<dyn DataProvider>> = vec![ab.clone(), b.clone()];

    let out: Vec<_> = load_from_providers(&providers, range(0, 10), tags(&["cba", "abba"]))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(names(&out), vec!["abba", "cba"]);
    assert_eq!(ab.calls(), vec![tags(&["abba"])]);
    assert_eq!(b.calls(), vec![tags(&["cba"])]);
}

#[test]
fn each_provider_gets_one_batch_in_input_order() {
    let ab = ab_provider();
    let b = containing_b_provider();
    let providers: Vec<Arc<dyn DataProvider>> = vec![ab.clone(), b.clone()];

    let out: Vec<_> = load_from_providers(
        &providers,
        range(0, 10),
        tags(&["abz", "cb", "aba", "bb"]),
    )
    .collect::<Result<_, _>>()
    .unwrap();

    assert_eq!(names(&out), vec!["abz", "aba", "cb", "bb"]);
    assert_eq!(ab.calls(), vec![tags(&["abz", "aba"])]);
    assert_eq!(b.calls(), vec![tags(&["cb", "bb"])]);
}

#[test]
fn partial_consumption_skips_later_groups() {
    let first = Arc::new(fixture("first", [flat("a", &[0, 1], 1.0)]));
    let second = Arc::new(fixture("second", [flat("b", &[0, 1], 2.0)]));
    let providers: Vec<Arc<dyn DataProvider>> = vec![first.clone(), second.clone()];

    let mut it = load_from_providers(&providers, range(0, 10), tags(&["a", "b"]));
    let a = it.next().unwrap().unwrap();
    assert_eq!(a.name().as_str(), "a");
    drop(it);

    assert_eq!(first.calls().len(), 1);
    assert!(second.calls().is_empty());
}

#[test]
fn series_are_clipped_by_provider_to_range() {
    let fx = Arc::new(fixture("fx", [flat("a", &[0, 5, 10, 15], 1.0)]));
    let providers: Vec<Arc<dyn DataProvider>> = vec![fx];
    let out: Vec<_> = load_from_providers(&providers, range(5, 15), tags(&["a"]))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(out[0].len(), 2);
}

use std::sync::Arc;

use sluice::{DataProvider, load_from_providers};

use crate::helpers::{ab_provider, containing_b_provider, names, range, tags};

#[test]
fn earlier_provider_wins_shared_tag() {
    let ab = ab_provider();
    let b = containing_b_provider();
    let providers: Vec<Arc<dyn DataProvider>> = vec![ab.clone(), b.clone()];

    let out: Vec<_> = load_from_providers(&providers, range(0, 10), tags(&["abba"]))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(names(&out), vec!["abba"]);
    assert_eq!(ab.calls(), vec![tags(&["abba"])]);
    assert_eq!(b.call_count(), 0);
}

#[test]
fn reversed_registration_reverses_winner() {
    let ab = ab_provider();
    let b = containing_b_provider();
    let providers: Vec<Arc<dyn DataProvider>> = vec![b.clone(), ab.clone()];

    let out: Vec<_> = load_from_providers(&providers, range(0, 10), tags(&["abba"]))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(names(&out), vec!["abba"]);
    assert_eq!(b.calls(), vec![tags(&["abba"])]);
    assert_eq!(ab.call_count(), 0);
}

#[test]
fn orchestrator_load_uses_registered_priority() {
    let ab = ab_provider();
    let b = containing_b_provider();
    let providers: Vec<Arc<dyn DataProvider>> = vec![ab.clone(), b.clone()];
    let sluice = crate::helpers::sluice_with(&providers);

    let out: Vec<_> = sluice
        .load(range(0, 10), &tags(&["abc", "xbx"]))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(names(&out), vec!["abc", "xbx"]);
    assert_eq!(ab.calls(), vec![tags(&["abc"])]);
    assert_eq!(b.calls(), vec![tags(&["xbx"])]);
}

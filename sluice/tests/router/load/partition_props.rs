use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use sluice::{DataProvider, SluiceError, load_from_providers};
use sluice_mock::RegexProvider;

use crate::helpers::range;

fn providers() -> Vec<Arc<dyn DataProvider>> {
    vec![
        Arc::new(RegexProvider::new("a", "a.*").unwrap()),
        Arc::new(RegexProvider::new("b", "b.*").unwrap()),
        Arc::new(RegexProvider::new("c", "c.*").unwrap()),
    ]
}

proptest! {
    #[test]
    fn resolvable_tags_appear_exactly_once(
        raw in prop::collection::btree_set("[abc][a-c]{0,3}", 0..12)
    ) {
        let tags: Vec<sluice::Tag> = raw.iter().map(|s| sluice::Tag::from(s.as_str())).collect();
        let providers = providers();
        let out: Vec<_> = load_from_providers(&providers, range(0, 10), tags)
            .collect::<Result<_, _>>()
            .unwrap();
        let got: Vec<String> = out.iter().map(|s| s.name().to_string()).collect();
        let unique: BTreeSet<String> = got.iter().cloned().collect();
        prop_assert_eq!(got.len(), raw.len());
        prop_assert_eq!(unique, raw);
    }

    #[test]
    fn any_unresolvable_tag_fails_first(
        raw in prop::collection::vec("[abc][a-c]{0,3}", 0..8),
        bad in "[xyz][a-z]{0,3}",
        pos in 0usize..8,
    ) {
        let mut names = raw;
        let at = pos.min(names.len());
        names.insert(at, bad.clone());
        let tags = names.iter().map(|s| sluice::Tag::from(s.as_str())).collect();
        let providers = providers();
        let mut it = load_from_providers(&providers, range(0, 10), tags);
        let first = it.next();
        prop_assert_eq!(first, Some(Err(SluiceError::unroutable([bad]))));
        prop_assert!(it.next().is_none());
    }
}

use std::iter::FusedIterator;
use std::sync::Arc;

use sluice_core::{DataProvider, Series, SeriesStream, SluiceError, Tag, TimeRange};

/// Tags assigned to one provider, identified by its index in the priority list.
pub(crate) type TagGroup = (usize, Vec<Tag>);

/// Assign every tag to the first provider claiming it.
///
/// Returns the non-empty groups in provider priority order (tags keep their input
/// order inside a group) and the tags no provider claimed.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "sluice::router::partition",
        skip(providers, tags),
        fields(providers = providers.len(), tags = tags.len()),
    )
)]
pub(crate) fn partition(
    providers: &[Arc<dyn DataProvider>],
    tags: Vec<Tag>,
) -> (Vec<TagGroup>, Vec<Tag>) {
    let mut buckets: Vec<Vec<Tag>> = vec![Vec::new(); providers.len()];
    let mut unmatched = Vec::new();
    for tag in tags {
        match providers.iter().position(|p| p.can_handle_tag(&tag)) {
            Some(i) => buckets[i].push(tag),
            None => unmatched.push(tag),
        }
    }
    let groups = buckets
        .into_iter()
        .enumerate()
        .filter(|(_, b)| !b.is_empty())
        .collect();
    (groups, unmatched)
}

enum State<'a> {
    Pending(Vec<Tag>),
    Dispatching {
        groups: std::vec::IntoIter<TagGroup>,
        current: Option<SeriesStream<'a>>,
    },
    Done,
}

/// Lazy, fused stream of raw series routed across providers.
///
/// Created by [`load_from_providers`] or [`crate::Sluice::load`]. No provider is
/// consulted until the first call to `next()`.
pub struct RoutedSeries<'a> {
    providers: &'a [Arc<dyn DataProvider>],
    range: TimeRange,
    state: State<'a>,
}

/// Load `tags` over `range`, routing each tag to the first provider that claims it.
///
/// Behavior:
/// - Construction does no work and cannot fail.
/// - The first `next()` partitions the tags. If any tag is unclaimed it yields
///   [`SluiceError::Unroutable`] naming those tags before any provider is invoked.
/// - Each provider group is loaded with a single batch call, in provider priority
///   order; series are yielded in the order the provider returns them.
/// - Provider errors are yielded unchanged.
/// - After any error the iterator is exhausted.
/// - An empty tag list yields nothing.
pub fn load_from_providers(
    providers: &[Arc<dyn DataProvider>],
    range: TimeRange,
    tags: Vec<Tag>,
) -> RoutedSeries<'_> {
    RoutedSeries {
        providers,
        range,
        state: State::Pending(tags),
    }
}

impl Iterator for RoutedSeries<'_> {
    type Item = Result<Series, SluiceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let providers = self.providers;
        loop {
            match &mut self.state {
                State::Pending(tags) => {
                    let (groups, unmatched) = partition(providers, std::mem::take(tags));
                    if !unmatched.is_empty() {
                        self.state = State::Done;
                        return Some(Err(SluiceError::unroutable(
                            unmatched.into_iter().map(Tag::into_inner),
                        )));
                    }
                    self.state = State::Dispatching {
                        groups: groups.into_iter(),
                        current: None,
                    };
                }
                State::Dispatching { groups, current } => {
                    if let Some(stream) = current.as_mut() {
                        match stream.next() {
                            Some(Ok(series)) => return Some(Ok(series)),
                            Some(Err(e)) => {
                                self.state = State::Done;
                                return Some(Err(e));
                            }
                            None => *current = None,
                        }
                        continue;
                    }
                    let Some((idx, tags)) = groups.next() else {
                        self.state = State::Done;
                        return None;
                    };
                    let provider = &providers[idx];
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        provider = provider.name(),
                        tags = tags.len(),
                        "dispatching tag group"
                    );
                    *current = Some(provider.load_series(self.range, tags));
                }
                State::Done => return None,
            }
        }
    }
}

impl FusedIterator for RoutedSeries<'_> {}

use std::collections::HashSet;
use std::hash::Hash;

use crate::index::trie::ApproximateHit;

/// Yield items whose key has not been seen yet, keeping the first occurrence.
pub fn unique_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> impl Iterator<Item = T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(move |item| seen.insert(key(item)))
}

/// Put approximate hits into their acceptance order and drop repeated keys.
///
/// Order: ascending distance, then shorter key, then lexicographic key. The
/// clusterers accept the first qualifying hit in this order, so it decides
/// every tie between equally close candidates.
#[must_use]
pub fn rank_hits<V>(mut hits: Vec<ApproximateHit<'_, V>>) -> Vec<ApproximateHit<'_, V>> {
    hits.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| a.key.len().cmp(&b.key.len()))
            .then_with(|| a.key.cmp(&b.key))
    });
    unique_by(hits, |hit| hit.key.clone()).collect()
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Distance used for bounded-mismatch lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Substitutions, insertions and deletions each cost one
    #[default]
    Levenshtein,
    /// Substitutions only; keys must have the query's length
    Hamming,
}

/// A key found inside a scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstringHit<'a, V> {
    /// Byte offset where the key starts in the text
    pub start: usize,
    /// Byte offset one past the key's end
    pub end: usize,
    pub value: &'a V,
}

impl<V> SubstringHit<'_, V> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A key within the distance budget of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproximateHit<'a, V> {
    pub key: Vec<u8>,
    pub value: &'a V,
    pub distance: usize,
}

#[derive(Debug, Clone)]
struct Node<V> {
    children: BTreeMap<u8, usize>,
    value: Option<V>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            value: None,
        }
    }
}

/// Byte-keyed prefix trie backed by a node arena.
///
/// Values are written once: [`Trie::insert_if_absent`] never overwrites an
/// existing key.
#[derive(Debug, Clone)]
pub struct Trie<V> {
    nodes: Vec<Node<V>>,
    len: usize,
    /// Length of the longest stored key
    depth: usize,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    const ROOT: usize = 0;

    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
            len: 0,
            depth: 0,
        }
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of arena nodes, including the root
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn find_node(&self, key: &[u8]) -> Option<usize> {
        let mut node = Self::ROOT;
        for byte in key {
            node = *self.nodes[node].children.get(byte)?;
        }
        Some(node)
    }

    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        self.find_node(key)
            .and_then(|idx| self.nodes[idx].value.as_ref())
    }

    #[must_use]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Store `value` under `key` unless the key is already present.
    ///
    /// Returns `true` if the value was stored.
    pub fn insert_if_absent(&mut self, key: &[u8], value: V) -> bool {
        let mut node = Self::ROOT;
        for &byte in key {
            node = match self.nodes[node].children.get(&byte) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::new());
                    self.nodes[node].children.insert(byte, child);
                    child
                }
            };
        }

        let slot = &mut self.nodes[node].value;
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        self.len += 1;
        self.depth = self.depth.max(key.len());
        true
    }

    /// Every stored key occurring as a contiguous substring of `text`.
    ///
    /// Hits are ordered by start offset, then by length. A key occurring at
    /// several offsets is reported once per offset.
    #[must_use]
    pub fn find_in(&self, text: &[u8]) -> Vec<SubstringHit<'_, V>> {
        let mut hits = Vec::new();
        for start in 0..text.len() {
            let mut node = Self::ROOT;
            for (offset, byte) in text[start..].iter().enumerate() {
                match self.nodes[node].children.get(byte) {
                    Some(&child) => node = child,
                    None => break,
                }
                if let Some(value) = &self.nodes[node].value {
                    hits.push(SubstringHit {
                        start,
                        end: start + offset + 1,
                        value,
                    });
                }
            }
        }
        hits
    }

    /// Every stored key within `max_distance` of `query`.
    ///
    /// Each key is reported at most once, with its smallest distance. Hits come
    /// back in depth-first trie order; callers that need a specific order sort
    /// them.
    #[must_use]
    pub fn approximate(
        &self,
        query: &[u8],
        max_distance: usize,
        metric: DistanceMetric,
    ) -> Vec<ApproximateHit<'_, V>> {
        // No key can be farther than this from the query
        let max_distance = max_distance.min(query.len() + self.depth);
        match metric {
            DistanceMetric::Levenshtein => self.approximate_levenshtein(query, max_distance),
            DistanceMetric::Hamming => self.approximate_hamming(query, max_distance),
        }
    }

    /// Walk the trie carrying one banded edit-distance row per node.
    ///
    /// Row `d` holds the distances between the first `d` key bytes and the
    /// query prefixes of length `d - max ..= d + max`; cells outside that band
    /// already exceed the budget. Branches whose band minimum exceeds the
    /// budget are pruned.
    fn approximate_levenshtein(
        &self,
        query: &[u8],
        max_distance: usize,
    ) -> Vec<ApproximateHit<'_, V>> {
        let over = max_distance + 1;
        let width = 2 * max_distance + 1;

        // Query prefix length held by band cell `k` of row `depth`
        let prefix_len = |depth: usize, k: usize| (depth + k).checked_sub(max_distance);

        let mut hits = Vec::new();
        let root_band: Vec<usize> = (0..width)
            .map(|k| match prefix_len(0, k) {
                Some(i) if i <= query.len() => i,
                _ => over,
            })
            .collect();

        if let Some(value) = &self.nodes[Self::ROOT].value {
            if query.len() <= max_distance {
                hits.push(ApproximateHit {
                    key: Vec::new(),
                    value,
                    distance: query.len(),
                });
            }
        }

        let mut path: Vec<u8> = Vec::new();
        // (node, byte, depth, parent band)
        let mut stack: Vec<(usize, u8, usize, Rc<[usize]>)> = Vec::new();
        let root_band: Rc<[usize]> = root_band.into();
        for (&byte, &child) in self.nodes[Self::ROOT].children.iter().rev() {
            stack.push((child, byte, 1, Rc::clone(&root_band)));
        }

        while let Some((idx, byte, depth, parent)) = stack.pop() {
            path.truncate(depth - 1);
            path.push(byte);

            let mut band = vec![over; width];
            for k in 0..width {
                let Some(i) = prefix_len(depth, k) else {
                    continue;
                };
                if i > query.len() {
                    break;
                }
                let substitution = if i >= 1 {
                    parent[k] + usize::from(query[i - 1] != byte)
                } else {
                    over
                };
                let insertion = if k >= 1 { band[k - 1] + 1 } else { over };
                let deletion = if k + 1 < width { parent[k + 1] + 1 } else { over };
                band[k] = substitution.min(insertion).min(deletion).min(over);
            }

            let node = &self.nodes[idx];
            if let Some(value) = &node.value {
                let distance = (query.len() + max_distance)
                    .checked_sub(depth)
                    .filter(|&k| k < width)
                    .map_or(over, |k| band[k]);
                if distance <= max_distance {
                    hits.push(ApproximateHit {
                        key: path.clone(),
                        value,
                        distance,
                    });
                }
            }

            let best = band.iter().copied().min().unwrap_or(over);
            if best > max_distance || node.children.is_empty() {
                continue;
            }

            let band: Rc<[usize]> = band.into();
            for (&next, &child) in node.children.iter().rev() {
                stack.push((child, next, depth + 1, Rc::clone(&band)));
            }
        }

        hits
    }

    fn approximate_hamming(&self, query: &[u8], max_distance: usize) -> Vec<ApproximateHit<'_, V>> {
        let mut hits = Vec::new();
        if query.is_empty() {
            if let Some(value) = &self.nodes[Self::ROOT].value {
                hits.push(ApproximateHit {
                    key: Vec::new(),
                    value,
                    distance: 0,
                });
            }
            return hits;
        }

        let mut path: Vec<u8> = Vec::new();
        // (node, byte, depth, mismatches so far including this byte)
        let mut stack: Vec<(usize, u8, usize, usize)> = self.nodes[Self::ROOT]
            .children
            .iter()
            .rev()
            .map(|(&byte, &node)| (node, byte, 1, usize::from(query[0] != byte)))
            .filter(|&(.., mismatches)| mismatches <= max_distance)
            .collect();

        while let Some((idx, byte, depth, mismatches)) = stack.pop() {
            path.truncate(depth - 1);
            path.push(byte);

            let node = &self.nodes[idx];
            if depth == query.len() {
                if let Some(value) = &node.value {
                    hits.push(ApproximateHit {
                        key: path.clone(),
                        value,
                        distance: mismatches,
                    });
                }
                continue;
            }

            for (&next, &child) in node.children.iter().rev() {
                let total = mismatches + usize::from(query[depth] != next);
                if total <= max_distance {
                    stack.push((child, next, depth + 1, total));
                }
            }
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie(keys: &[&str]) -> Trie<usize> {
        let mut t = Trie::new();
        for (i, k) in keys.iter().enumerate() {
            t.insert_if_absent(k.as_bytes(), i);
        }
        t
    }

    fn keys<V>(hits: &[ApproximateHit<'_, V>]) -> Vec<(String, usize)> {
        let mut out: Vec<_> = hits
            .iter()
            .map(|h| (String::from_utf8(h.key.clone()).unwrap(), h.distance))
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_insert_if_absent_first_writer_wins() {
        let mut t = Trie::new();
        assert!(t.insert_if_absent(b"ACGT", 1));
        assert!(!t.insert_if_absent(b"ACGT", 2));
        assert_eq!(t.get(b"ACGT"), Some(&1));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_prefix_is_not_a_key() {
        let t = trie(&["ACGT"]);
        assert!(t.contains_key(b"ACGT"));
        assert!(!t.contains_key(b"ACG"));
        assert!(!t.contains_key(b"ACGTA"));
    }

    #[test]
    fn test_find_in_reports_all_offsets() {
        let t = trie(&["AA", "AAA", "CG"]);
        let hits = t.find_in(b"AAACG");
        let found: Vec<(usize, usize)> = hits.iter().map(|h| (h.start, h.end)).collect();
        assert_eq!(found, vec![(0, 2), (0, 3), (1, 3), (3, 5)]);
    }

    #[test]
    fn test_find_in_empty_text() {
        let t = trie(&["AA"]);
        assert!(t.find_in(b"").is_empty());
    }

    #[test]
    fn test_approximate_levenshtein_substitution() {
        let t = trie(&["ACGT", "TGCA"]);
        let hits = t.approximate(b"ACGA", 1, DistanceMetric::Levenshtein);
        assert_eq!(keys(&hits), vec![("ACGT".to_string(), 1)]);
    }

    #[test]
    fn test_approximate_levenshtein_indels() {
        let t = trie(&["ACGT", "ACG", "ACGTT", "AGT"]);
        let hits = t.approximate(b"ACGT", 1, DistanceMetric::Levenshtein);
        assert_eq!(
            keys(&hits),
            vec![
                ("ACG".to_string(), 1),
                ("ACGT".to_string(), 0),
                ("ACGTT".to_string(), 1),
                ("AGT".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_approximate_levenshtein_zero_budget_is_exact() {
        let t = trie(&["ACGT", "ACGA"]);
        let hits = t.approximate(b"ACGT", 0, DistanceMetric::Levenshtein);
        assert_eq!(keys(&hits), vec![("ACGT".to_string(), 0)]);
    }

    #[test]
    fn test_approximate_hamming_requires_equal_length() {
        let t = trie(&["ACGT", "ACG", "ACGTT", "TTTT"]);
        let hits = t.approximate(b"ACGA", 1, DistanceMetric::Hamming);
        assert_eq!(keys(&hits), vec![("ACGT".to_string(), 1)]);

        let hits = t.approximate(b"ACGA", 4, DistanceMetric::Hamming);
        assert_eq!(
            keys(&hits),
            vec![("ACGT".to_string(), 1), ("TTTT".to_string(), 4)]
        );
    }

    #[test]
    fn test_approximate_reports_each_key_once() {
        let t = trie(&["AAAA", "AAAT", "AATT"]);
        let hits = t.approximate(b"AAAA", 2, DistanceMetric::Levenshtein);
        let mut seen: Vec<_> = hits.iter().map(|h| h.key.clone()).collect();
        let before = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), before);
        assert_eq!(before, 3);
    }

    #[test]
    fn test_unbounded_budget_is_clamped() {
        let t = trie(&["ACGT", "TT"]);
        let hits = t.approximate(b"AC", usize::MAX, DistanceMetric::Levenshtein);
        assert_eq!(
            keys(&hits),
            vec![("ACGT".to_string(), 2), ("TT".to_string(), 2)]
        );

        let hits = t.approximate(b"AC", usize::MAX, DistanceMetric::Hamming);
        assert_eq!(keys(&hits), vec![("TT".to_string(), 2)]);
    }

    #[test]
    fn test_long_key_does_not_overflow_stack() {
        let long = "ACGT".repeat(20_000);
        let t = trie(&[long.as_str()]);
        let hits = t.approximate(long.as_bytes(), 0, DistanceMetric::Levenshtein);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].distance, 0);
    }
}

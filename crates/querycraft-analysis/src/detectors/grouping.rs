//! Order-preserving grouping of queries by a derived key.

use std::hash::Hash;

use querycraft_core::types::{FxHashMap, QueryRecord};

/// Group `queries` by `key`. Groups appear in order of their first member
/// and members keep input order, so output never depends on hash order.
pub fn group_by_key<'q, K, F>(queries: &'q [QueryRecord], mut key: F) -> Vec<Vec<&'q QueryRecord>>
where
    K: Hash + Eq,
    F: FnMut(&QueryRecord) -> K,
{
    let mut slots: FxHashMap<K, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<&QueryRecord>> = Vec::new();

    for query in queries {
        let slot = *slots.entry(key(query)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(query);
    }

    groups
}

/// Sum of durations in a group, in milliseconds.
pub fn total_time_ms(group: &[&QueryRecord]) -> f64 {
    group.iter().map(|q| q.duration_ms).sum()
}

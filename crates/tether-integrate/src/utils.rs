//! Small grouping helpers shared by the join, populate and association steps.

use std::hash::Hash;

use fxhash::FxHashMap as HashMap;

/// Group `items` by `key`, keeping groups in first-seen key order and items in
/// input order within each group.
pub(crate) fn group_ordered<K, T, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::default();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(&item);
        match slots.get(&k) {
            Some(&slot) => groups[slot].1.push(item),
            None => {
                slots.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }
    groups
}

/// Group `items` into a lookup map, keeping input order within each group.
/// Items for which `key` returns `None` are dropped.
pub(crate) fn group_into_map<K, T, F>(items: impl IntoIterator<Item = T>, mut key: F) -> HashMap<K, Vec<T>>
where
    K: Eq + Hash,
    F: FnMut(&T) -> Option<K>,
{
    let mut map: HashMap<K, Vec<T>> = HashMap::default();
    for item in items {
        if let Some(k) = key(&item) {
            map.entry(k).or_default().push(item);
        }
    }
    map
}

use tether_core::{Record, Value};

use crate::result::PopulatedRow;
use crate::sanitize::LinkedRow;
use crate::utils::group_into_map;

/// Attach `rows` to `base` under `alias`.
///
/// `base[i]` receives, in order, the rows joined from parent row `i` whose
/// link equals its own `parent_key` value (absent reads as `Null`), or an
/// empty sequence. Base rows are never reordered. Parents sharing a key value
/// each get only the rows joined from themselves.
pub fn populate(base: &mut [PopulatedRow], alias: &str, rows: Vec<LinkedRow>, parent_key: &str) {
    let attached = rows.len();
    let mut groups = group_into_map(rows, |row: &LinkedRow| Some(row.origin));

    let mut claimed = 0usize;
    for (origin, parent) in base.iter_mut().enumerate() {
        let key: &Value = parent.record.get_or_null(parent_key);
        let children: Vec<Record> = groups
            .remove(&origin)
            .unwrap_or_default()
            .into_iter()
            .filter(|linked| &linked.link == key)
            .map(|linked| linked.record)
            .collect();
        if !children.is_empty() {
            claimed += 1;
        }
        parent.associations.insert(alias.to_string(), children);
    }

    tracing::debug!(
        alias,
        parents = base.len(),
        parents_with_children = claimed,
        attached,
        "populated association"
    );
}

//! Turning raw joined rows into the records attached under an alias.
//!
//! The parent row never contributes columns to a cleaned record: each record
//! is built from the associated table's segment only, then the `omit` set
//! (empty unless the by-name parent column rule is configured) is applied.

use tether_core::{ColumnSet, Record, Value};

use crate::join::JoinedRow;

/// A cleaned child record, the parent key value it belongs to, and the index
/// of the parent row it was joined from.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedRow {
    pub origin: usize,
    pub link: Value,
    pub record: Record,
}

/// Clean the output of a single parent-to-child join.
///
/// Unmatched placeholders are dropped, and the child's back-reference column
/// (`child_key`, whose value is the parent's key) is removed.
pub fn sanitize_one_to_many(
    rows: Vec<JoinedRow<'_>>,
    link_key: &str,
    child_key: &str,
    omit: &ColumnSet,
) -> Vec<LinkedRow> {
    rows.into_iter()
        .filter_map(|row| {
            let child = row.joined(0)?;
            let mut record = child.clone();
            record.remove(child_key);
            record.omit(omit);
            Some(LinkedRow {
                origin: row.origin(),
                link: row.root_record().get_or_null(link_key).clone(),
                record,
            })
        })
        .collect()
}

/// Clean the output of a parent-to-junction-to-target join chain.
///
/// - rows whose junction `fk` is absent or falsy are dropped;
/// - junction columns never appear; the record starts from the target row
///   (empty if the target was unmatched);
/// - `fk` is removed and its value re-inserted under `pk`, after `omit` is
///   applied.
pub fn sanitize_many_to_many(
    rows: Vec<JoinedRow<'_>>,
    link_key: &str,
    fk: &str,
    pk: &str,
    omit: &ColumnSet,
) -> Vec<LinkedRow> {
    rows.into_iter()
        .filter_map(|row| {
            let pk_value = row
                .joined(0)
                .and_then(|junction| junction.get(fk))
                .filter(|v| v.is_truthy())?
                .clone();

            let mut record = row.joined(1).cloned().unwrap_or_default();
            record.omit(omit);
            record.remove(fk);
            record.insert(pk, pk_value);
            Some(LinkedRow {
                origin: row.origin(),
                link: row.root_record().get_or_null(link_key).clone(),
                record,
            })
        })
        .collect()
}

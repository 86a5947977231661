//! Pairwise left outer join over cached record sequences.
//!
//! A [`JoinedRow`] keeps one segment per table in the join chain instead of a
//! flattened record, so later steps can tell which table contributed which
//! column. Segments borrow from the cache; nothing is copied here.

use tether_core::{Record, Value};

use crate::utils::group_into_map;

/// One row of a (possibly chained) left outer join.
///
/// `root` is the row of the table the chain starts from and `origin` its
/// position in that table. `joined[i]` is the record matched by the `i`-th
/// join, or `None` where that join found no match (an outer-join placeholder).
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow<'a> {
    origin: usize,
    root: &'a Record,
    joined: Vec<Option<&'a Record>>,
}

impl<'a> JoinedRow<'a> {
    pub fn root(origin: usize, record: &'a Record) -> Self {
        Self {
            origin,
            root: record,
            joined: Vec::new(),
        }
    }

    pub fn root_record(&self) -> &'a Record {
        self.root
    }

    /// Index of the root row in the table the chain starts from.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Record matched by the `hop`-th join (0-based).
    pub fn joined(&self, hop: usize) -> Option<&'a Record> {
        self.joined.get(hop).copied().flatten()
    }

    /// Number of joins applied so far.
    pub fn hops(&self) -> usize {
        self.joined.len()
    }

    /// The most recently joined segment; the root when no join has run yet.
    /// `None` when the latest join found no match.
    pub fn tail(&self) -> Option<&'a Record> {
        match self.joined.last() {
            Some(segment) => *segment,
            None => Some(self.root),
        }
    }

    /// Flatten every segment into one superset record. Later segments win on
    /// column-name collisions.
    pub fn merged(&self) -> Record {
        let mut merged = self.root.clone();
        for segment in self.joined.iter().flatten() {
            merged.extend_from(segment);
        }
        merged
    }

    fn extended(&self, segment: Option<&'a Record>) -> Self {
        let mut joined = Vec::with_capacity(self.joined.len() + 1);
        joined.extend_from_slice(&self.joined);
        joined.push(segment);
        Self {
            origin: self.origin,
            root: self.root,
            joined,
        }
    }
}

/// Left outer join of `left` with `right` on `tail[left_key] == right[right_key]`.
///
/// - `left_key` is read from each left row's most recent segment; a row whose
///   latest join was unmatched cannot match again.
/// - `Null` or absent keys never match.
/// - Every left row appears at least once: once per matching right row (in
///   `right` order), or once with an empty segment when nothing matches.
pub fn left_outer_join<'a>(
    left: Vec<JoinedRow<'a>>,
    right: &'a [Record],
    left_key: &str,
    right_key: &str,
) -> Vec<JoinedRow<'a>> {
    let index = group_into_map(right.iter(), |row: &&'a Record| {
        let row: &'a Record = *row;
        row.get(right_key).filter(|v| !v.is_null())
    });

    let mut out = Vec::with_capacity(left.len().max(right.len()));
    for row in left {
        let key: Option<&Value> = row
            .tail()
            .and_then(|tail| tail.get(left_key))
            .filter(|v| !v.is_null());
        match key.and_then(|k| index.get(k)) {
            Some(matches) => out.extend(matches.iter().map(|m| row.extended(Some(*m)))),
            None => out.push(row.extended(None)),
        }
    }
    tracing::trace!(
        left_key,
        right_key,
        right_rows = right.len(),
        joined_rows = out.len(),
        "left outer join"
    );
    out
}

/// Wrap every row of a table as a chain root.
pub fn roots(rows: &[Record]) -> Vec<JoinedRow<'_>> {
    rows.iter()
        .enumerate()
        .map(|(origin, row)| JoinedRow::root(origin, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::record;

    fn ids(rows: &[JoinedRow<'_>], hop: usize) -> Vec<Option<i64>> {
        rows.iter()
            .map(|r| r.joined(hop).and_then(|s| s.get("id")).and_then(Value::as_int))
            .collect()
    }

    #[test]
    fn keeps_unmatched_left_rows() {
        let users = vec![record! { "id" => 1 }, record! { "id" => 2 }];
        let posts = vec![
            record! { "id" => 10, "userId" => 1 },
            record! { "id" => 11, "userId" => 1 },
        ];
        let joined = left_outer_join(roots(&users), &posts, "id", "userId");
        assert_eq!(ids(&joined, 0), vec![Some(10), Some(11), None]);
        assert_eq!(joined[2].root_record(), &users[1]);
        assert_eq!(joined.iter().map(JoinedRow::origin).collect::<Vec<_>>(), vec![0, 0, 1]);
    }

    #[test]
    fn integral_float_keys_match_integer_keys() {
        let users = vec![record! { "id" => 1 }, record! { "id" => 2.0 }];
        let posts = vec![
            record! { "id" => 10, "userId" => 1.0 },
            record! { "id" => 11, "userId" => 2 },
            record! { "id" => 12, "userId" => 1.5 },
        ];
        let joined = left_outer_join(roots(&users), &posts, "id", "userId");
        assert_eq!(ids(&joined, 0), vec![Some(10), Some(11)]);
    }

    #[test]
    fn null_keys_never_match() {
        let left = vec![record! { "k" => Value::Null }, record! { "other" => 1 }];
        let right = vec![record! { "id" => 5, "k" => Value::Null }];
        let joined = left_outer_join(roots(&left), &right, "k", "k");
        assert_eq!(joined.len(), 2);
        assert!(joined.iter().all(|r| r.joined(0).is_none()));
    }

    #[test]
    fn chained_join_reads_key_from_latest_segment() {
        let users = vec![record! { "id" => 1, "tagId" => 9 }];
        let links = vec![
            record! { "id" => 100, "userId" => 1, "tagId" => 8 },
            record! { "id" => 101, "userId" => 1, "tagId" => 404 },
        ];
        let tags = vec![record! { "id" => 8, "label" => "a" }, record! { "id" => 9, "label" => "b" }];

        let first = left_outer_join(roots(&users), &links, "id", "userId");
        let second = left_outer_join(first, &tags, "tagId", "id");

        assert_eq!(second.len(), 2);
        assert_eq!(ids(&second, 1), vec![Some(8), None]);
        assert!(second.iter().all(|r| r.hops() == 2));
    }

    #[test]
    fn unmatched_hop_stays_unmatched() {
        let users = vec![record! { "id" => 1, "tagId" => 9 }];
        let tags = vec![record! { "id" => 9 }];
        let first = left_outer_join(roots(&users), &[], "id", "userId");
        let second = left_outer_join(first, &tags, "tagId", "id");
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].joined(1), None);
    }

    #[test]
    fn merged_prefers_later_segments() {
        let users = vec![record! { "id" => 1, "name" => "A" }];
        let posts = vec![record! { "id" => 10, "userId" => 1 }];
        let joined = left_outer_join(roots(&users), &posts, "id", "userId");
        assert_eq!(
            joined[0].merged(),
            record! { "id" => 10, "name" => "A", "userId" => 1 }
        );
    }
}

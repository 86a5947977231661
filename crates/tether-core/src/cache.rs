use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Record;

/// Already-fetched rows keyed by table name.
///
/// Row order within a table is fetch order and is never changed here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableCache(BTreeMap<String, Vec<Record>>);

impl TableCache {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert, replacing any rows already cached for `table`.
    pub fn with_table(mut self, table: impl Into<String>, rows: Vec<Record>) -> Self {
        self.insert_table(table, rows);
        self
    }

    pub fn insert_table(&mut self, table: impl Into<String>, rows: Vec<Record>) -> Option<Vec<Record>> {
        self.0.insert(table.into(), rows)
    }

    pub fn table(&self, table: &str) -> Option<&[Record]> {
        self.0.get(table).map(Vec::as_slice)
    }

    pub fn contains_table(&self, table: &str) -> bool {
        self.0.contains_key(table)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<Record>)> for TableCache {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Record>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    #[test]
    fn deserializes_from_table_map() {
        let cache: TableCache = serde_json::from_str(
            r#"{ "user": [{ "id": 1, "name": "A" }], "post": [] }"#,
        )
        .expect("cache json");
        assert_eq!(cache.table("user"), Some(&[record! { "id" => 1, "name" => "A" }][..]));
        assert_eq!(cache.table("post").map(<[Record]>::len), Some(0));
        assert!(cache.table("tag").is_none());
    }

    #[test]
    fn with_table_preserves_row_order() {
        let cache = TableCache::new().with_table(
            "post",
            vec![record! { "id" => 11 }, record! { "id" => 10 }],
        );
        let ids: Vec<_> = cache
            .table("post")
            .unwrap_or_default()
            .iter()
            .filter_map(|r| r.get("id").and_then(|v| v.as_int()))
            .collect();
        assert_eq!(ids, vec![11, 10]);
    }
}

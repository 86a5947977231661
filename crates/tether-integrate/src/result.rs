use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tether_core::Record;
use tether_error::{Error, Result};

/// A parent row with its populated associations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulatedRow {
    /// The parent row exactly as it was fetched.
    pub record: Record,
    /// Alias to the ordered child records attached under it.
    pub associations: BTreeMap<String, Vec<Record>>,
}

impl PopulatedRow {
    pub fn new(record: Record) -> Self {
        Self {
            record,
            associations: BTreeMap::new(),
        }
    }

    /// Child records under `alias`, if that alias has been populated.
    pub fn association(&self, alias: &str) -> Option<&[Record]> {
        self.associations.get(alias).map(Vec::as_slice)
    }
}

/// Serializes as one flat object: parent columns, then one array per alias.
/// An alias that shares a name with a parent column replaces that column.
impl Serialize for PopulatedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let columns: Vec<_> = self
            .record
            .iter()
            .filter(|(name, _)| !self.associations.contains_key(*name))
            .collect();
        let mut map = serializer.serialize_map(Some(columns.len() + self.associations.len()))?;
        for (name, value) in columns {
            map.serialize_entry(name, value)?;
        }
        for (alias, rows) in &self.associations {
            map.serialize_entry(alias, rows)?;
        }
        map.end()
    }
}

/// Serialize a result set into a JSON array.
pub fn rows_to_json(rows: &[PopulatedRow]) -> Result<serde_json::Value> {
    serde_json::to_value(rows).map_err(|e| Error::Serialization(e.to_string()))
}

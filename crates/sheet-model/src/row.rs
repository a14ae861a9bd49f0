//! Ordered rows of cells.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// One decoded data row: column name to raw value, in source column order.
///
/// Keys are unique; inserting an existing key replaces its value in place.
/// Serializes as a JSON object with keys in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Get the value for a column, if the column is present.
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Get the value for a column, treating an absent column as empty.
    pub fn value(&self, key: &str) -> &CellValue {
        self.get(key).unwrap_or(&EMPTY)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cells.iter().any(|(name, _)| name == key)
    }

    /// Insert or replace a value. Returns the previous value, if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<CellValue>,
    ) -> Option<CellValue> {
        let key = key.into();
        let value = value.into();
        if let Some((_, slot)) = self.cells.iter_mut().find(|(name, _)| *name == key) {
            return Some(std::mem::replace(slot, value));
        }
        self.cells.push((key, value));
        None
    }

    /// Remove a column, preserving the order of the remaining cells.
    pub fn remove(&mut self, key: &str) -> Option<CellValue> {
        let idx = self.cells.iter().position(|(name, _)| name == key)?;
        Some(self.cells.remove(idx).1)
    }

    /// Keep only the cells whose column name satisfies the predicate.
    pub fn retain_keys<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.cells.retain(|(name, _)| keep(name));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of column names to cell values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut row = Row::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, CellValue>()? {
                    row.insert(key, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

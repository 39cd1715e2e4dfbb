use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single spreadsheet cell as seen by the ingestion pipeline.
///
/// Serializes untagged so raw sheet rows round-trip as plain JSON objects
/// (`{"VM": "web01", "CPUs": 2}`), which is the shape the analysis backend expects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Boolean(bool),
    String(String),
    /// Excel error literal such as `#N/A`. Deserializes back as [`CellValue::String`].
    Error(String),
}

impl CellValue {
    /// Returns true for [`CellValue::Empty`] and for strings that are blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text rendering used when a cell is consumed as a label (VM names, host names, OS).
    ///
    /// Numbers render without a trailing `.0` when integral so a VM literally named `1001`
    /// keeps its name.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Boolean(b) => Some(b.to_string()),
            CellValue::Error(e) => Some(e.clone()),
        }
    }

    /// Numeric reading of the cell. Numeric text is accepted; anything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

/// One data row of a sheet, keyed by the sheet's header row.
///
/// Column order follows the sheet. Empty cells are not stored, matching the
/// "missing key means absent" convention consumers rely on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value stored under `header`. Empty values are dropped.
    pub fn insert(&mut self, header: impl Into<String>, value: CellValue) {
        let header = header.into();
        if matches!(value, CellValue::Empty) {
            self.cells.retain(|(h, _)| h != &header);
            return;
        }
        match self.cells.iter_mut().find(|(h, _)| h == &header) {
            Some(slot) => slot.1 = value,
            None => self.cells.push((header, value)),
        }
    }

    /// Builder-style [`Row::insert`].
    pub fn with(mut self, header: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(header, value.into());
        self
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(h, _)| h == header).map(|(_, v)| v)
    }

    /// First non-blank value among `headers`, in the order given.
    pub fn first_of(&self, headers: &[&str]) -> Option<&CellValue> {
        headers
            .iter()
            .filter_map(|h| self.get(h))
            .find(|v| !v.is_blank())
    }

    /// First text value among `headers`.
    pub fn text_of(&self, headers: &[&str]) -> Option<String> {
        headers
            .iter()
            .filter_map(|h| self.get(h))
            .find_map(CellValue::as_text)
    }

    /// First numeric value among `headers`. Zero counts as absent so the next candidate
    /// header gets a chance, the same way a blank cell would.
    pub fn number_of(&self, headers: &[&str]) -> Option<f64> {
        headers
            .iter()
            .filter_map(|h| self.get(h))
            .filter_map(CellValue::as_number)
            .find(|n| *n != 0.0)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v.into());
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (header, value) in &self.cells {
            map.serialize_entry(header, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = Row;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column header to cell value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Row, A::Error> {
                let mut row = Row::new();
                while let Some((header, value)) = access.next_entry::<String, CellValue>()? {
                    row.insert(header, value);
                }
                Ok(row)
            }
        }

        deserializer.deserialize_map(RowVisitor)
    }
}

use serde::{Deserialize, Serialize};

use crate::{FileType, Row, VmRecord};

/// All rows of one sheet, in sheet order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<Row>,
}

/// Sheets of a workbook in workbook order.
///
/// Serializes as a JSON object keyed by sheet name (the `rawSheets` shape the analysis
/// backend reads).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawSheets {
    sheets: Vec<RawSheet>,
}

impl RawSheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sheet, replacing the rows of an existing sheet with the same name.
    pub fn push(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        let name = name.into();
        match self.sheets.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.rows = rows,
            None => self.sheets.push(RawSheet { name, rows }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Row]> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.rows.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sheets.iter().any(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawSheet> {
        self.sheets.iter()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl Serialize for RawSheets {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.sheets.len()))?;
        for sheet in &self.sheets {
            map.serialize_entry(&sheet.name, &sheet.rows)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RawSheets {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SheetsVisitor;

        impl<'de> serde::de::Visitor<'de> for SheetsVisitor {
            type Value = RawSheets;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of sheet name to row records")
            }

            fn visit_map<A: serde::de::MapAccess<'de>>(
                self,
                mut access: A,
            ) -> Result<RawSheets, A::Error> {
                let mut sheets = RawSheets::new();
                while let Some((name, rows)) = access.next_entry::<String, Vec<Row>>()? {
                    sheets.push(name, rows);
                }
                Ok(sheets)
            }
        }

        deserializer.deserialize_map(SheetsVisitor)
    }
}

/// Normalized result of parsing one workbook.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversalData {
    pub file_type: FileType,
    pub file_name: String,
    pub vm_count: usize,
    pub vms: Vec<VmRecord>,
    pub raw_sheets: RawSheets,
}

impl UniversalData {
    pub fn new(
        file_type: FileType,
        file_name: impl Into<String>,
        vms: Vec<VmRecord>,
        raw_sheets: RawSheets,
    ) -> Self {
        Self {
            file_type,
            file_name: file_name.into(),
            vm_count: vms.len(),
            vms,
            raw_sheets,
        }
    }

    /// Rows of `sheet`, or an empty slice when the workbook has no such sheet.
    pub fn sheet_rows(&self, sheet: &str) -> &[Row] {
        self.raw_sheets.get(sheet).unwrap_or(&[])
    }
}

/// One uploaded workbook's contribution to a session.
///
/// `data` is `None` for sources restored from a persisted snapshot until the workbook is
/// uploaded again; such sources contribute nothing to correlation or assessment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub code: String,
    pub name: String,
    pub vm_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    #[serde(skip)]
    pub data: Option<UniversalData>,
}

impl DataSource {
    pub fn new(code: impl Into<String>, name: impl Into<String>, data: UniversalData) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            vm_count: data.vm_count,
            file_type: Some(data.file_type),
            data: Some(data),
        }
    }

    /// VM records of this source; empty for summary-only sources.
    pub fn vms(&self) -> &[VmRecord] {
        self.data.as_ref().map(|d| d.vms.as_slice()).unwrap_or(&[])
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }
}

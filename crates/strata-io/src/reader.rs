//! Workbook reading on top of `calamine`.
//!
//! Every worksheet is turned into header-keyed [`Row`]s: the first row of the used range is
//! the header row, blank rows are skipped and empty cells are omitted.

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use strata_model::{CellValue, RawSheets, Row};

use crate::ReadError;

/// Header name given to columns whose header cell is blank.
pub const EMPTY_HEADER: &str = "__EMPTY";

/// Read every worksheet of the workbook at `path`.
pub fn read_sheets_path(path: impl AsRef<Path>) -> Result<RawSheets, ReadError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    Ok(read_all(&mut workbook))
}

/// Read every worksheet of an in-memory workbook. The container format is sniffed from
/// the bytes.
pub fn read_sheets_bytes(bytes: impl Into<Vec<u8>>) -> Result<RawSheets, ReadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.into()))?;
    Ok(read_all(&mut workbook))
}

fn read_all<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> RawSheets {
    let mut out = RawSheets::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet_name);
        let records = sheet_records(&sheet_name, range);
        out.push(sheet_name, records);
    }
    out
}

/// Rows of one worksheet. A sheet that fails to load is kept with no rows so the rest of
/// the workbook still parses.
fn sheet_records(sheet_name: &str, range: Result<Range<Data>, calamine::Error>) -> Vec<Row> {
    let range = match range {
        Ok(range) => range,
        Err(err) => {
            log::warn!("skipping sheet `{sheet_name}`: {err}");
            return Vec::new();
        }
    };

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_names(header_row),
        None => Vec::new(),
    };

    let records: Vec<Row> = rows
        .map(|cells| to_row(&headers, cells))
        .filter(|row| !row.is_empty())
        .collect();

    log::debug!("sheet `{sheet_name}`: {} data rows", records.len());
    records
}

/// Column headers for a header row. Blank headers become `__EMPTY`, `__EMPTY_1`, ...;
/// repeated headers get a `_1`, `_2`, ... suffix so every column keeps a distinct key.
fn header_names(cells: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    cells
        .iter()
        .map(|cell| {
            let base = convert_value(cell)
                .as_text()
                .unwrap_or_else(|| EMPTY_HEADER.to_string());
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}_{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

fn to_row(headers: &[String], cells: &[Data]) -> Row {
    let mut row = Row::new();
    for (header, cell) in headers.iter().zip(cells) {
        let value = convert_value(cell);
        if value.is_blank() {
            continue;
        }
        row.insert(header.as_str(), value);
    }
    row
}

fn convert_value(value: &Data) -> CellValue {
    match value {
        Data::Empty => CellValue::Empty,
        Data::Bool(v) => CellValue::Boolean(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Float(v) => CellValue::Number(*v),
        Data::String(v) => CellValue::String(v.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::DateTime(v) => CellValue::Number(v.as_f64()),
        Data::DateTimeIso(v) => CellValue::String(v.clone()),
        Data::DurationIso(v) => CellValue::String(v.clone()),
    }
}

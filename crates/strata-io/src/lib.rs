//! Spreadsheet ingestion for RVTools and Azure Migrate inventory exports.
//!
//! The pipeline is: read every sheet ([`reader`]) -> classify the workbook from its sheet
//! names ([`detect`]) -> normalize VM rows ([`extract`]). [`parse_workbook_path`] and
//! [`parse_workbook_bytes`] run all three and return a [`UniversalData`].

use std::path::{Path, PathBuf};

use strata_model::UniversalData;
use thiserror::Error;

pub mod detect;
pub mod extract;
pub mod reader;
pub mod validate;

pub use detect::{detect_file_type, is_azmigrate_sheet};
pub use extract::{build_universal_data, extract_vms};
pub use reader::{read_sheets_bytes, read_sheets_path};
pub use validate::{check_extension, validate_file_name, INVALID_FILE_NAME_MESSAGE};

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to open workbook: {0}")]
    Open(#[from] calamine::Error),
    #[error("unsupported file type `{}` (expected .xlsx or .xls)", .path.display())]
    UnsupportedExtension { path: PathBuf },
    #[error("{}", INVALID_FILE_NAME_MESSAGE)]
    InvalidFileName { file_name: String },
    #[error("missing file name for `{}`", .path.display())]
    MissingFileName { path: PathBuf },
}

/// Options applied before and during parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Require `rvtools_export_XXXX_NN.xlsx` / `azmigrate_export_XXXX_NN.xlsx` names.
    pub strict_file_names: bool,
}

/// Parse the workbook at `path` into the normalized per-upload structure.
pub fn parse_workbook_path(
    path: impl AsRef<Path>,
    options: ParseOptions,
) -> Result<UniversalData, ReadError> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ReadError::MissingFileName {
            path: path.to_path_buf(),
        })?
        .to_string();

    if options.strict_file_names {
        validate_file_name(&file_name)?;
    }
    check_extension(path)?;

    let sheets = read_sheets_path(path)?;
    Ok(build_universal_data(sheets, file_name))
}

/// Parse an uploaded workbook held in memory.
pub fn parse_workbook_bytes(
    bytes: impl Into<Vec<u8>>,
    file_name: &str,
    options: ParseOptions,
) -> Result<UniversalData, ReadError> {
    if options.strict_file_names {
        validate_file_name(file_name)?;
    }
    check_extension(Path::new(file_name))?;

    let sheets = read_sheets_bytes(bytes)?;
    Ok(build_universal_data(sheets, file_name))
}

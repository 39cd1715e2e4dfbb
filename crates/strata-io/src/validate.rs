use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use strata_model::FileType;

use crate::ReadError;

/// Extensions accepted for upload (lower-case, without the dot).
pub const ACCEPTED_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// Message shown when strict file-name validation rejects an upload.
pub const INVALID_FILE_NAME_MESSAGE: &str = "Invalid file format. Please use:\n\
     • rvtools_export_[4letters]_[2digits].xlsx\n\
     • azmigrate_export_[4letters]_[2digits].xlsx";

fn rvtools_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^rvtools_export_[A-Za-z]{4}_[0-9]{2}\.xlsx$").expect("static regex is valid")
    })
}

fn azmigrate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^azmigrate_export_[A-Za-z]{4}_[0-9]{2}\.xlsx$").expect("static regex is valid")
    })
}

/// Strict naming convention check, applied before any parsing when enabled.
///
/// Returns the schema the name announces. Sheet-based detection still decides how the
/// workbook is extracted.
pub fn validate_file_name(file_name: &str) -> Result<FileType, ReadError> {
    if rvtools_pattern().is_match(file_name) {
        return Ok(FileType::RvTools);
    }
    if azmigrate_pattern().is_match(file_name) {
        return Ok(FileType::AzMigrate);
    }
    Err(ReadError::InvalidFileName {
        file_name: file_name.to_string(),
    })
}

/// Reject paths whose extension is not a spreadsheet format we read.
pub fn check_extension(path: &Path) -> Result<(), ReadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(ReadError::UnsupportedExtension {
            path: path.to_path_buf(),
        })
    }
}

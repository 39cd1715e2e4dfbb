use strata_model::FileType;

/// Sheets whose presence marks an RVTools export.
pub const RVTOOLS_MARKER_SHEETS: [&str; 3] = ["vInfo", "vCPU", "vMemory"];

/// Lower-case fragments that mark a sheet as Azure Migrate machine inventory.
pub const AZMIGRATE_SHEET_FRAGMENTS: [&str; 3] = ["server", "machine", "assessment"];

/// Classify a workbook from its sheet names.
///
/// RVTools wins over Azure Migrate: a workbook carrying any of the exact RVTools marker
/// sheets is `rvtools` even if another sheet name would also match the Azure Migrate rule.
pub fn detect_file_type<'a, I>(sheet_names: I) -> FileType
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = sheet_names.into_iter().collect();

    if names.iter().any(|n| RVTOOLS_MARKER_SHEETS.contains(n)) {
        return FileType::RvTools;
    }
    if names.iter().any(|n| is_azmigrate_sheet(n)) {
        return FileType::AzMigrate;
    }
    FileType::Unknown
}

/// Whether a sheet name looks like Azure Migrate machine inventory.
pub fn is_azmigrate_sheet(name: &str) -> bool {
    let lower = name.to_lowercase();
    AZMIGRATE_SHEET_FRAGMENTS
        .iter()
        .any(|fragment| lower.contains(fragment))
}

//! Normalization of export rows into [`VmRecord`]s.
//!
//! Header names and fallback orders are fixed per schema. All defaulting of missing
//! fields happens here; downstream code can rely on every record being fully populated.

use strata_model::{FileType, RawSheets, Row, SourceType, UniversalData, VmRecord};

use crate::detect::{detect_file_type, is_azmigrate_sheet};

/// RVTools sheet holding one row per VM.
pub const RVTOOLS_VM_SHEET: &str = "vInfo";

mod rvtools {
    pub const NAME: &str = "VM";
    pub const HOST: &str = "Host";
    pub const DATACENTER: &str = "Datacenter";
    pub const CPUS: &str = "CPUs";
    pub const MEMORY: &str = "Memory";
    pub const OS: &str = "OS";
    pub const POWER_STATE: &str = "Powerstate";
}

mod azmigrate {
    pub const NAME: [&str; 6] = [
        "Server name",
        "Machine name",
        "Display name",
        "Name",
        "ServerName",
        "MachineName",
    ];
    pub const HOST: [&str; 2] = ["Host name", "Host"];
    pub const DATACENTER: [&str; 2] = ["Datacenter", "Location"];
    pub const CPU: [&str; 3] = ["Cores", "CPU cores", "vCPUs"];
    pub const MEMORY: [&str; 3] = ["Memory in MB", "RAM (MB)", "Memory"];
    pub const OS: [&str; 2] = ["Operating system", "OS"];
}

/// Extract normalized VM records for the given schema.
///
/// `Unknown` yields no records.
pub fn extract_vms(sheets: &RawSheets, file_type: FileType) -> Vec<VmRecord> {
    match file_type {
        FileType::RvTools => extract_rvtools(sheets),
        FileType::AzMigrate => extract_azmigrate(sheets),
        FileType::Unknown => Vec::new(),
    }
}

/// Detect the schema, extract VM records and keep every raw sheet.
pub fn build_universal_data(sheets: RawSheets, file_name: impl Into<String>) -> UniversalData {
    let file_name = file_name.into();
    let file_type = detect_file_type(sheets.names());
    if file_type == FileType::Unknown {
        log::warn!("`{file_name}` is neither an RVTools nor an Azure Migrate export; no VMs extracted");
    } else {
        log::debug!("`{file_name}` detected as {file_type}");
    }

    let vms = extract_vms(&sheets, file_type);
    UniversalData::new(file_type, file_name, vms, sheets)
}

fn extract_rvtools(sheets: &RawSheets) -> Vec<VmRecord> {
    let Some(rows) = sheets.get(RVTOOLS_VM_SHEET) else {
        return Vec::new();
    };

    let vms: Vec<VmRecord> = rows.iter().filter_map(rvtools_record).collect();
    log::debug!(
        "{RVTOOLS_VM_SHEET}: {} of {} rows carry a VM name",
        vms.len(),
        rows.len()
    );
    vms
}

fn rvtools_record(row: &Row) -> Option<VmRecord> {
    let name = row.text_of(&[rvtools::NAME])?;
    Some(VmRecord {
        name,
        host: row.text_of(&[rvtools::HOST]),
        datacenter: row.text_of(&[rvtools::DATACENTER]),
        cpu: to_core_count(row.number_of(&[rvtools::CPUS])),
        memory: row.number_of(&[rvtools::MEMORY]).unwrap_or(0.0),
        os: row.text_of(&[rvtools::OS]),
        power_state: row.text_of(&[rvtools::POWER_STATE]),
        source_type: SourceType::RvTools,
        sheet_name: None,
    })
}

fn extract_azmigrate(sheets: &RawSheets) -> Vec<VmRecord> {
    let mut vms = Vec::new();
    for sheet in sheets.iter() {
        if !is_azmigrate_sheet(&sheet.name) {
            continue;
        }
        let before = vms.len();
        vms.extend(
            sheet
                .rows
                .iter()
                .filter_map(|row| azmigrate_record(row, &sheet.name)),
        );
        log::debug!(
            "{}: {} of {} rows carry a machine name",
            sheet.name,
            vms.len() - before,
            sheet.rows.len()
        );
    }
    vms
}

fn azmigrate_record(row: &Row, sheet_name: &str) -> Option<VmRecord> {
    let name = row.text_of(&azmigrate::NAME)?;
    Some(VmRecord {
        name,
        host: row.text_of(&azmigrate::HOST),
        datacenter: row.text_of(&azmigrate::DATACENTER),
        cpu: to_core_count(row.number_of(&azmigrate::CPU)),
        memory: row.number_of(&azmigrate::MEMORY).unwrap_or(0.0),
        os: row.text_of(&azmigrate::OS),
        power_state: None,
        source_type: SourceType::AzMigrate,
        sheet_name: Some(sheet_name.to_string()),
    })
}

fn to_core_count(value: Option<f64>) -> u32 {
    match value {
        Some(n) if n > 0.0 => n.trunc().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

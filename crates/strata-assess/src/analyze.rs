//! Readiness aggregation over normalized VM records.

use strata_model::{Assessment, DataSource, FileType, OsFamily, Tier, UniversalData, VmRecord};

use crate::correlate::correlate;
use crate::recommend::generate_recommendations;

/// Largest vCPU count a VM can have and still be considered lift-and-shift ready.
pub const READY_MAX_CPU: u32 = 8;
/// Largest memory size (MB) a VM can have and still be considered lift-and-shift ready.
pub const READY_MAX_MEMORY_MB: f64 = 32768.0;

/// RVTools sheet listing one row per virtual disk.
pub const RVTOOLS_DISK_SHEET: &str = "vDisk";
const DISK_CAPACITY_HEADER: &str = "Capacity MB";

/// Readiness tier of a single record. Rules are evaluated in order; the first match wins.
///
/// Only records reporting `poweredOn` can be `Ready`. Azure Migrate exports carry no
/// power state, so their machines land in `Complex` or `NeedsWork` by size alone.
pub fn classify_tier(vm: &VmRecord) -> Tier {
    let oversized = vm.cpu > READY_MAX_CPU || vm.memory > READY_MAX_MEMORY_MB;
    if vm.is_powered_on() && !oversized {
        Tier::Ready
    } else if oversized {
        Tier::Complex
    } else {
        Tier::NeedsWork
    }
}

/// Licensing family from the free-text OS field. Windows is checked before Linux.
pub fn classify_os(vm: &VmRecord) -> OsFamily {
    let os = vm.os.as_deref().unwrap_or_default().to_lowercase();
    if os.contains("windows") {
        OsFamily::Windows
    } else if os.contains("linux") {
        OsFamily::Linux
    } else {
        OsFamily::Other
    }
}

/// Aggregate `records` into an assessment. `storage_gb` is supplied by the caller since
/// disk capacity is not tracked per record.
pub fn analyze_records<'a, I>(records: I, storage_gb: f64) -> Assessment
where
    I: IntoIterator<Item = &'a VmRecord>,
{
    let mut assessment = Assessment::default();
    for vm in records {
        assessment.total_vms += 1;
        assessment.compute.total_cpu += u64::from(vm.cpu);
        assessment.compute.total_memory_gb += vm.memory_gb();

        match classify_os(vm) {
            OsFamily::Windows => assessment.licensing.windows_vms += 1,
            OsFamily::Linux => assessment.licensing.linux_vms += 1,
            OsFamily::Other => {}
        }

        assessment.cloud_readiness.record(classify_tier(vm));
    }
    assessment.storage.total_storage_gb = storage_gb;
    assessment.recommendations = generate_recommendations(&assessment);
    assessment
}

/// Total provisioned disk in GB for one upload. Only RVTools exports contribute.
pub fn storage_gb(data: &UniversalData) -> f64 {
    if data.file_type != FileType::RvTools {
        return 0.0;
    }
    data.sheet_rows(RVTOOLS_DISK_SHEET)
        .iter()
        .filter_map(|row| row.number_of(&[DISK_CAPACITY_HEADER]))
        .map(|mb| mb / 1024.0)
        .sum()
}

/// Assessment of a single upload.
pub fn analyze_source(data: &UniversalData) -> Assessment {
    analyze_records(&data.vms, storage_gb(data))
}

/// Assessment over the correlated union of `sources`.
///
/// Each distinct VM identity is counted once, using the record from the source that
/// first introduced it. Storage is summed over every loaded RVTools source.
pub fn analyze_union<'a, I>(sources: I) -> Assessment
where
    I: IntoIterator<Item = &'a DataSource>,
{
    let sources: Vec<&DataSource> = sources.into_iter().collect();
    let index = correlate(sources.iter().copied());
    let storage: f64 = sources
        .iter()
        .filter_map(|s| s.data.as_ref())
        .map(storage_gb)
        .sum();

    analyze_records(index.anchors().filter_map(|a| a.primary_record()), storage)
}

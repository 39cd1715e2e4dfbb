use pretty_assertions::assert_eq;
use strata_assess::recommend::{HIGH_COMPLEXITY_TITLE, RIGHT_SIZING_TITLE, WINDOWS_LICENSING_TITLE};
use strata_assess::{
    analyze_records, analyze_source, analyze_union, classify_os, classify_tier,
    generate_recommendations,
};
use strata_model::{
    Assessment, DataSource, FileType, OsFamily, RawSheets, Row, Severity, SourceType, Tier,
    UniversalData, VmRecord,
};

fn rv(name: &str, cpu: u32, memory: f64, os: &str, power: &str) -> VmRecord {
    let mut vm = VmRecord::new(name, SourceType::RvTools);
    vm.cpu = cpu;
    vm.memory = memory;
    vm.os = (!os.is_empty()).then(|| os.to_string());
    vm.power_state = (!power.is_empty()).then(|| power.to_string());
    vm
}

fn az(name: &str, cpu: u32, memory: f64) -> VmRecord {
    let mut vm = VmRecord::new(name, SourceType::AzMigrate);
    vm.cpu = cpu;
    vm.memory = memory;
    vm.sheet_name = Some("Servers".into());
    vm
}

#[test]
fn single_windows_vm_scenario() {
    let vms = vec![rv("web01", 2, 4096.0, "Windows Server 2019", "poweredOn")];
    let a = analyze_records(&vms, 0.0);

    assert_eq!(a.total_vms, 1);
    assert_eq!(a.compute.total_cpu, 2);
    assert_eq!(a.compute.total_memory_gb, 4.0);
    assert_eq!(a.licensing.windows_vms, 1);
    assert_eq!(a.licensing.linux_vms, 0);
    assert_eq!(a.cloud_readiness.ready, 1);

    let titles: Vec<&str> = a.recommendations.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec![WINDOWS_LICENSING_TITLE]);
}

#[test]
fn size_threshold_overrides_power_state() {
    let vm = rv("big", 16, 65536.0, "", "poweredOn");
    assert_eq!(classify_tier(&vm), Tier::Complex);

    let mem_only = rv("mem", 2, 32769.0, "", "poweredOn");
    assert_eq!(classify_tier(&mem_only), Tier::Complex);

    let at_limit = rv("edge", 8, 32768.0, "", "poweredOn");
    assert_eq!(classify_tier(&at_limit), Tier::Ready);
}

#[test]
fn powered_off_small_vms_need_work() {
    assert_eq!(classify_tier(&rv("off", 2, 2048.0, "", "poweredOff")), Tier::NeedsWork);
    assert_eq!(classify_tier(&rv("odd", 2, 2048.0, "", "PoweredOn")), Tier::NeedsWork);
}

#[test]
fn azure_migrate_records_are_never_ready() {
    assert_eq!(classify_tier(&az("small", 2, 2048.0)), Tier::NeedsWork);
    assert_eq!(classify_tier(&az("large", 32, 2048.0)), Tier::Complex);
}

#[test]
fn os_classification_prefers_windows_and_ignores_others() {
    assert_eq!(classify_os(&rv("a", 1, 0.0, "Microsoft WINDOWS 10", "")), OsFamily::Windows);
    assert_eq!(classify_os(&rv("b", 1, 0.0, "Oracle Linux 7", "")), OsFamily::Linux);
    assert_eq!(classify_os(&rv("c", 1, 0.0, "Windows Subsystem for Linux", "")), OsFamily::Windows);
    assert_eq!(classify_os(&rv("d", 1, 0.0, "FreeBSD 13", "")), OsFamily::Other);
    assert_eq!(classify_os(&rv("e", 1, 0.0, "", "")), OsFamily::Other);

    let vms = vec![
        rv("a", 1, 0.0, "Windows", ""),
        rv("b", 1, 0.0, "FreeBSD", ""),
        rv("c", 1, 0.0, "", ""),
    ];
    let a = analyze_records(&vms, 0.0);
    assert_eq!(a.licensing.windows_vms + a.licensing.linux_vms, 1);
}

#[test]
fn empty_estate_has_no_findings() {
    let a = analyze_records(&Vec::<VmRecord>::new(), 0.0);
    assert_eq!(a.total_vms, 0);
    assert_eq!(a.cloud_readiness.total(), 0);
    assert!(a.recommendations.is_empty());
    assert!(!a.has_recommendation(RIGHT_SIZING_TITLE));
}

#[test]
fn recommendations_fire_independently_in_order() {
    let vms = vec![
        rv("w1", 1, 1024.0, "Windows", "poweredOn"),
        rv("big", 16, 1024.0, "Linux", "poweredOn"),
        rv("l1", 1, 1024.0, "Linux", "poweredOn"),
    ];
    // complex = 1 > 0.9, windows = 1, avg cpu = 6 -> no right-sizing.
    let a = analyze_records(&vms, 0.0);
    let kinds: Vec<(Severity, &str)> = a
        .recommendations
        .iter()
        .map(|r| (r.severity, r.title.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (Severity::Warning, HIGH_COMPLEXITY_TITLE),
            (Severity::Info, WINDOWS_LICENSING_TITLE),
        ]
    );
    assert_eq!(
        a.recommendations[0].description,
        "1 VMs may require significant refactoring for cloud migration."
    );
}

#[test]
fn right_sizing_fires_for_small_average() {
    let mut assessment = Assessment::default();
    assessment.total_vms = 4;
    assessment.compute.total_cpu = 7;
    let recs = generate_recommendations(&assessment);
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].severity, Severity::Success);
    assert_eq!(recs[0].title, RIGHT_SIZING_TITLE);
}

#[test]
fn complexity_threshold_is_strict() {
    let mut assessment = Assessment::default();
    assessment.total_vms = 10;
    assessment.compute.total_cpu = 40;
    assessment.cloud_readiness.complex = 3;
    assert!(generate_recommendations(&assessment).is_empty());

    assessment.cloud_readiness.complex = 4;
    assert!(generate_recommendations(&assessment)
        .iter()
        .any(|r| r.title == HIGH_COMPLEXITY_TITLE));
}

fn rvtools_source(code: &str, vms: Vec<VmRecord>, disks_mb: &[f64]) -> DataSource {
    let mut sheets = RawSheets::new();
    sheets.push(
        "vInfo",
        vms.iter().map(|vm| Row::new().with("VM", vm.name.as_str())).collect(),
    );
    sheets.push(
        "vDisk",
        disks_mb
            .iter()
            .map(|mb| Row::new().with("VM", "x").with("Capacity MB", *mb))
            .collect(),
    );
    let data = UniversalData::new(FileType::RvTools, format!("{code}.xlsx"), vms, sheets);
    DataSource::new(code, code, data)
}

#[test]
fn storage_sums_vdisk_capacity_for_rvtools_only() {
    let source = rvtools_source("01", vec![rv("a", 2, 1024.0, "", "")], &[1024.0, 2048.0, 512.0]);
    let a = analyze_source(source.data.as_ref().unwrap());
    assert_eq!(a.storage.total_storage_gb, 3.5);

    let mut sheets = RawSheets::new();
    sheets.push("Servers", Vec::new());
    sheets.push("vDisk", vec![Row::new().with("Capacity MB", 4096.0)]);
    let azm = UniversalData::new(FileType::AzMigrate, "azm.xlsx", vec![az("s", 2, 1.0)], sheets);
    assert_eq!(analyze_source(&azm).storage.total_storage_gb, 0.0);
}

#[test]
fn union_assessment_deduplicates_across_sources() {
    let first = rvtools_source(
        "01",
        vec![
            rv("WEB01", 2, 4096.0, "Windows", "poweredOn"),
            rv("db01", 4, 8192.0, "Linux", "poweredOff"),
        ],
        &[1024.0],
    );
    let second = rvtools_source(
        "02",
        vec![
            rv("web01", 32, 4096.0, "Windows", "poweredOn"),
            rv("app01", 2, 2048.0, "Linux", "poweredOn"),
        ],
        &[2048.0],
    );

    let a = analyze_union([&first, &second]);
    assert_eq!(a.total_vms, 3);
    // WEB01 is taken from the first source (2 vCPU, ready), not the 32 vCPU duplicate.
    assert_eq!(a.compute.total_cpu, 2 + 4 + 2);
    assert_eq!(a.cloud_readiness.ready, 2);
    assert_eq!(a.cloud_readiness.needs_work, 1);
    assert_eq!(a.cloud_readiness.complex, 0);
    assert_eq!(a.storage.total_storage_gb, 3.0);
}

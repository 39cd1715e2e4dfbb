use std::collections::HashSet;

use pretty_assertions::assert_eq;
use strata_assess::{correlate, correlated_metrics, filter_active, filter_by_codes};
use strata_model::{DataSource, FileType, RawSheets, Row, SourceType, UniversalData, VmRecord};

fn record(name: &str, host: &str, cpu: u32) -> VmRecord {
    let mut vm = VmRecord::new(name, SourceType::RvTools);
    vm.host = Some(host.to_string());
    vm.cpu = cpu;
    vm
}

fn source(code: &str, vms: Vec<VmRecord>) -> DataSource {
    let data = UniversalData::new(FileType::RvTools, format!("{code}.xlsx"), vms, RawSheets::new());
    DataSource::new(code, code, data)
}

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

#[test]
fn case_variants_across_sources_share_one_anchor() {
    let a = source("01", vec![record("WEB01", "esx01", 2)]);
    let b = source("02", vec![record("web01", "esx99", 4)]);

    let index = correlate([&a, &b]);
    assert_eq!(index.len(), 1);

    let anchor = index.get("Web01").expect("lookup is case-insensitive");
    assert_eq!(anchor.vm_name, "WEB01");
    assert_eq!(anchor.host_name.as_deref(), Some("esx01"));
    assert_eq!(anchor.source_codes().collect::<Vec<_>>(), vec!["01", "02"]);
    assert_eq!(anchor.sources["02"].cpu, 4);
    assert_eq!(anchor.primary_record().unwrap().cpu, 2);
}

#[test]
fn same_source_twice_under_two_codes_counts_distinct_names() {
    let vms = vec![
        record("alpha", "h", 1),
        record("Beta", "h", 1),
        record("ALPHA", "h", 1),
        record("gamma", "h", 1),
    ];
    let distinct: HashSet<String> = vms.iter().map(|v| v.name.to_lowercase()).collect();

    let first = source("01", vms.clone());
    let again = source("02", vms);
    let index = correlate([&first, &again]);
    assert_eq!(index.len(), distinct.len());
    assert_eq!(index.len(), 3);
}

#[test]
fn later_rows_within_a_source_overwrite_earlier_ones() {
    let s = source("01", vec![record("db", "h1", 2), record("DB", "h2", 8)]);
    let index = correlate([&s]);
    let anchor = index.get("db").unwrap();
    assert_eq!(anchor.vm_name, "db");
    assert_eq!(anchor.host_name.as_deref(), Some("h1"));
    assert_eq!(anchor.sources["01"].cpu, 8);
}

#[test]
fn anchors_iterate_in_first_seen_order() {
    let a = source("01", vec![record("zeta", "h", 1), record("alpha", "h", 1)]);
    let b = source("02", vec![record("mid", "h", 1), record("ZETA", "h", 1)]);
    let index = correlate([&a, &b]);
    let keys: Vec<&str> = index.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn filters_restrict_sources_and_drop_orphans() {
    let a = source("01", vec![record("shared", "h", 1), record("only-a", "h", 1)]);
    let b = source("02", vec![record("shared", "h", 1), record("only-b", "h", 1)]);
    let all = vec![a, b];

    let active = filter_active(&all, &codes(&["02"]));
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].code, "02");

    let index = correlate(&all);
    let filtered = filter_by_codes(&index, &codes(&["02"]));
    let keys: Vec<&str> = filtered.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["shared", "only-b"]);
    assert_eq!(
        filtered.get("shared").unwrap().source_codes().collect::<Vec<_>>(),
        vec!["02"]
    );
}

#[test]
fn metrics_collect_detail_rows_from_active_rvtools_sources() {
    let mut sheets = RawSheets::new();
    sheets.push("vInfo", vec![Row::new().with("VM", "web01")]);
    sheets.push(
        "vCPU",
        vec![
            Row::new().with("VM", "other").with("Max", 100.0),
            Row::new().with("VM", "WEB01").with("Max", 2400.0),
        ],
    );
    sheets.push("vMemory", vec![Row::new().with("VM", "web01").with("Size MB", 4096.0)]);
    sheets.push(
        "vDisk",
        vec![
            Row::new().with("VM", "web01").with("Disk", "Hard disk 1"),
            Row::new().with("VM", "web01").with("Disk", "Hard disk 2"),
            Row::new().with("VM", "db01").with("Disk", "Hard disk 1"),
        ],
    );
    let data = UniversalData::new(
        FileType::RvTools,
        "rv.xlsx",
        vec![record("web01", "esx01", 2)],
        sheets,
    );
    let rv = DataSource::new("01", "rv", data);
    let inactive = source("02", vec![record("web01", "esx02", 2)]);
    let sources = vec![rv, inactive];
    let index = correlate(&sources);

    let metrics = correlated_metrics("web01", &index, &sources, &codes(&["01"])).unwrap();
    assert_eq!(metrics.basic.keys().collect::<Vec<_>>(), vec!["01"]);
    assert_eq!(
        metrics.cpu["01"].get("Max").and_then(|v| v.as_number()),
        Some(2400.0)
    );
    assert!(metrics.memory.contains_key("01"));
    assert_eq!(metrics.disk["01"].len(), 2);

    assert!(correlated_metrics("ghost", &index, &sources, &codes(&["01"])).is_none());
}

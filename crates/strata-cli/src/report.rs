//! Plain-text renderings of the library results. JSON output goes through `serde` in
//! [`crate::cli`] instead.

use std::io::{self, Write};

use serde::Serialize;
use strata_assess::{CorrelatedMetrics, CorrelationIndex, EnterpriseMetrics, Session};
use strata_model::{Assessment, UniversalData, VmRecord};

/// Sheet name and row count, in workbook order.
#[derive(Debug, Serialize)]
pub struct SheetSummary<'a> {
    pub name: &'a str,
    pub rows: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport<'a> {
    pub file_name: &'a str,
    pub file_type: &'static str,
    pub vm_count: usize,
    pub sheets: Vec<SheetSummary<'a>>,
    pub vms: &'a [VmRecord],
}

impl<'a> InspectReport<'a> {
    pub fn new(data: &'a UniversalData) -> Self {
        Self {
            file_name: &data.file_name,
            file_type: data.file_type.as_str(),
            vm_count: data.vm_count,
            sheets: data
                .raw_sheets
                .iter()
                .map(|s| SheetSummary {
                    name: &s.name,
                    rows: s.rows.len(),
                })
                .collect(),
            vms: &data.vms,
        }
    }
}

pub fn write_inspect<W: Write>(out: &mut W, report: &InspectReport<'_>) -> io::Result<()> {
    writeln!(out, "File: {}", report.file_name)?;
    writeln!(out, "Type: {}", report.file_type)?;
    writeln!(out, "VMs: {}", report.vm_count)?;
    writeln!(out, "Sheets:")?;
    for sheet in &report.sheets {
        writeln!(out, "  {} ({} rows)", sheet.name, sheet.rows)?;
    }
    if !report.vms.is_empty() {
        writeln!(out)?;
        for vm in report.vms {
            writeln!(
                out,
                "  {:<24} {:>3} vCPU {:>9.1} GB  {}",
                vm.name,
                vm.cpu,
                vm.memory_gb(),
                vm.os.as_deref().unwrap_or("-")
            )?;
        }
    }
    Ok(())
}

pub fn write_assessment<W: Write>(out: &mut W, assessment: &Assessment) -> io::Result<()> {
    writeln!(out, "Total VMs: {}", assessment.total_vms)?;
    writeln!(
        out,
        "Compute: {} vCPU, {:.1} GB memory",
        assessment.compute.total_cpu, assessment.compute.total_memory_gb
    )?;
    writeln!(out, "Storage: {:.1} GB", assessment.storage.total_storage_gb)?;
    writeln!(
        out,
        "Licensing: {} Windows, {} Linux",
        assessment.licensing.windows_vms, assessment.licensing.linux_vms
    )?;
    let readiness = &assessment.cloud_readiness;
    writeln!(
        out,
        "Readiness: ready={} needsWork={} complex={}",
        readiness.ready, readiness.needs_work, readiness.complex
    )?;

    if assessment.recommendations.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "Recommendations:")?;
    for rec in &assessment.recommendations {
        write!(out, "  {rec}")?;
    }
    Ok(())
}

pub fn write_enterprise<W: Write>(out: &mut W, metrics: &EnterpriseMetrics) -> io::Result<()> {
    let cost = &metrics.cost_optimization;
    writeln!(
        out,
        "Monthly spend: {:.2} (projected savings {:.2})",
        cost.current_spend, cost.projected_savings
    )?;
    let c = &metrics.migration_complexity;
    writeln!(
        out,
        "Complexity: simple={} moderate={} complex={} blockers={}",
        c.simple, c.moderate, c.complex, c.blockers
    )?;
    let s = &metrics.readiness_score;
    writeln!(
        out,
        "Scores: overall={} compute={} storage={} network={} security={} governance={}",
        s.overall, s.compute, s.storage, s.network, s.security, s.governance
    )?;
    for risk in metrics
        .risk_analysis
        .security_risks
        .iter()
        .chain(&metrics.risk_analysis.performance_risks)
    {
        writeln!(out, "  risk: {risk}")?;
    }
    writeln!(
        out,
        "Sustainability: carbon={:.1} efficiency={:.1}",
        metrics.sustainability.carbon_footprint, metrics.sustainability.energy_efficiency
    )
}

/// Source list with `*` marking active sources.
pub fn write_sources<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    if session.sources().is_empty() {
        return writeln!(out, "No data sources.");
    }
    for source in session.sources() {
        let marker = if session.is_active(&source.code) { '*' } else { ' ' };
        let kind = source.file_type.map(|t| t.as_str()).unwrap_or("unknown");
        let loaded = if source.is_loaded() { "" } else { ", not loaded" };
        writeln!(
            out,
            "{marker} {:<4} {} ({kind}, {} VMs{loaded})",
            source.code, source.name, source.vm_count
        )?;
    }
    Ok(())
}

pub fn write_correlation<W: Write>(out: &mut W, index: &CorrelationIndex) -> io::Result<()> {
    writeln!(out, "Distinct VMs: {}", index.len())?;
    for anchor in index.anchors() {
        let codes: Vec<&str> = anchor.source_codes().collect();
        writeln!(
            out,
            "  {:<24} host={:<12} sources={}",
            anchor.vm_name,
            anchor.host_name.as_deref().unwrap_or("-"),
            codes.join(",")
        )?;
    }
    Ok(())
}

pub fn write_metrics<W: Write>(
    out: &mut W,
    vm_name: &str,
    metrics: &CorrelatedMetrics,
) -> io::Result<()> {
    writeln!(out, "{vm_name}")?;
    for (code, record) in &metrics.basic {
        writeln!(
            out,
            "  [{code}] {} vCPU, {:.1} GB, {}",
            record.cpu,
            record.memory_gb(),
            record.power_state.as_deref().unwrap_or("-")
        )?;
        if metrics.cpu.contains_key(code) {
            writeln!(out, "       vCPU row present")?;
        }
        if metrics.memory.contains_key(code) {
            writeln!(out, "       vMemory row present")?;
        }
        if let Some(disks) = metrics.disk.get(code) {
            writeln!(out, "       {} disk(s)", disks.len())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_assess::analyze_records;
    use strata_model::SourceType;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn assessment_text_lists_totals_and_findings() {
        let mut vm = VmRecord::new("web01", SourceType::RvTools);
        vm.cpu = 2;
        vm.memory = 4096.0;
        vm.os = Some("Windows Server 2019".into());
        vm.power_state = Some("poweredOn".into());
        let assessment = analyze_records(&[vm], 0.0);

        let text = render(|out| write_assessment(out, &assessment));
        assert!(text.starts_with("Total VMs: 1\nCompute: 2 vCPU, 4.0 GB memory\n"));
        assert!(text.contains("Readiness: ready=1 needsWork=0 complex=0"));
        assert!(text.contains("  [info] Windows Licensing Optimization\n"));
    }

    #[test]
    fn empty_session_has_a_placeholder() {
        let text = render(|out| write_sources(out, &Session::new()));
        assert_eq!(text, "No data sources.\n");
    }
}

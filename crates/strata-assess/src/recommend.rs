use strata_model::{Assessment, Recommendation, Severity};

pub const HIGH_COMPLEXITY_TITLE: &str = "High Complexity VMs Detected";
pub const WINDOWS_LICENSING_TITLE: &str = "Windows Licensing Optimization";
pub const RIGHT_SIZING_TITLE: &str = "Right-sizing Opportunity";

/// Share of complex VMs above which the estate is flagged.
pub const COMPLEX_SHARE_THRESHOLD: f64 = 0.3;
/// Average vCPUs per VM below which right-sizing is suggested.
pub const RIGHT_SIZING_AVG_CPU: f64 = 2.0;

/// Advisory findings for a completed assessment, in fixed order.
///
/// Checks are independent. Ratios use floating-point division, so an empty estate
/// (`total_vms == 0`) yields NaN and never triggers the right-sizing finding.
pub fn generate_recommendations(assessment: &Assessment) -> Vec<Recommendation> {
    let mut out = Vec::new();
    let total_vms = assessment.total_vms as f64;
    let complex = assessment.cloud_readiness.complex;

    if complex as f64 > total_vms * COMPLEX_SHARE_THRESHOLD {
        out.push(Recommendation {
            severity: Severity::Warning,
            title: HIGH_COMPLEXITY_TITLE.to_string(),
            description: format!(
                "{complex} VMs may require significant refactoring for cloud migration."
            ),
        });
    }

    let windows = assessment.licensing.windows_vms;
    if windows > 0 {
        out.push(Recommendation {
            severity: Severity::Info,
            title: WINDOWS_LICENSING_TITLE.to_string(),
            description: format!(
                "Consider Azure Hybrid Benefit for {windows} Windows VMs to reduce costs."
            ),
        });
    }

    let avg_cpu = assessment.compute.total_cpu as f64 / total_vms;
    if avg_cpu < RIGHT_SIZING_AVG_CPU {
        out.push(Recommendation {
            severity: Severity::Success,
            title: RIGHT_SIZING_TITLE.to_string(),
            description: "Many VMs appear over-provisioned. Consider smaller cloud instances."
                .to_string(),
        });
    }

    out
}

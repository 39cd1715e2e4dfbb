use std::fmt;

use serde::{Deserialize, Serialize};

/// Cloud-migration readiness tier of a single VM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "ready")]
    Ready,
    #[serde(rename = "needsWork")]
    NeedsWork,
    #[serde(rename = "complex")]
    Complex,
}

impl Tier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Tier::Ready => "ready",
            Tier::NeedsWork => "needsWork",
            Tier::Complex => "complex",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Licensing family inferred from a VM's OS string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Windows,
    Linux,
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputeTotals {
    #[serde(rename = "totalCPU")]
    pub total_cpu: u64,
    #[serde(rename = "totalMemoryGB")]
    pub total_memory_gb: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageTotals {
    #[serde(rename = "totalStorageGB")]
    pub total_storage_gb: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensingCounts {
    #[serde(rename = "windowsVMs")]
    pub windows_vms: usize,
    #[serde(rename = "linuxVMs")]
    pub linux_vms: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessCounts {
    pub ready: usize,
    pub needs_work: usize,
    pub complex: usize,
}

impl ReadinessCounts {
    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Ready => self.ready += 1,
            Tier::NeedsWork => self.needs_work += 1,
            Tier::Complex => self.complex += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.ready + self.needs_work + self.complex
    }
}

/// Severity of an advisory finding. Serialized as the recommendation's `type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Info,
    Success,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Success => "success",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {}", self.severity.as_str(), self.title)?;
        writeln!(f, "      {}", self.description)
    }
}

/// Aggregate readiness assessment over a set of VM records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(rename = "totalVMs")]
    pub total_vms: usize,
    pub compute: ComputeTotals,
    pub storage: StorageTotals,
    pub licensing: LicensingCounts,
    pub cloud_readiness: ReadinessCounts,
    pub recommendations: Vec<Recommendation>,
}

impl Assessment {
    pub fn has_recommendation(&self, title: &str) -> bool {
        self.recommendations.iter().any(|r| r.title == title)
    }
}

//! Executive-dashboard metrics: a simple cost model, migration complexity buckets,
//! readiness scores, risk notes and a sustainability estimate.
//!
//! Unlike the readiness assessment, these heuristics fill unknown sizing with
//! [`SizingDefaults`] instead of zero.

use serde::Serialize;
use strata_model::VmRecord;

/// Sizing assumed for records that report no CPU or memory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizingDefaults {
    pub cpu: u32,
    pub memory_mb: f64,
}

impl Default for SizingDefaults {
    fn default() -> Self {
        Self {
            cpu: 2,
            memory_mb: 4096.0,
        }
    }
}

impl SizingDefaults {
    fn cpu(&self, vm: &VmRecord) -> u32 {
        if vm.cpu == 0 {
            self.cpu
        } else {
            vm.cpu
        }
    }

    fn memory_gb(&self, vm: &VmRecord) -> f64 {
        let mb = if vm.memory == 0.0 {
            self.memory_mb
        } else {
            vm.memory
        };
        mb / 1024.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationComplexity {
    Simple,
    Moderate,
    Complex,
    Blockers,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOptimization {
    pub current_spend: f64,
    pub projected_savings: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComplexityCounts {
    pub simple: usize,
    pub moderate: usize,
    pub complex: usize,
    pub blockers: usize,
}

impl ComplexityCounts {
    fn record(&mut self, complexity: MigrationComplexity) {
        match complexity {
            MigrationComplexity::Simple => self.simple += 1,
            MigrationComplexity::Moderate => self.moderate += 1,
            MigrationComplexity::Complex => self.complex += 1,
            MigrationComplexity::Blockers => self.blockers += 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReadinessScore {
    pub overall: u32,
    pub compute: u32,
    pub storage: u32,
    pub network: u32,
    pub security: u32,
    pub governance: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    pub security_risks: Vec<String>,
    pub performance_risks: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sustainability {
    pub carbon_footprint: f64,
    pub energy_efficiency: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseMetrics {
    pub cost_optimization: CostOptimization,
    pub migration_complexity: ComplexityCounts,
    pub readiness_score: ReadinessScore,
    pub risk_analysis: RiskAnalysis,
    pub sustainability: Sustainability,
}

/// Monthly cost of the VM as provisioned today.
pub fn current_cost(vm: &VmRecord, defaults: &SizingDefaults) -> f64 {
    f64::from(defaults.cpu(vm)) * 50.0 + defaults.memory_gb(vm) * 10.0
}

/// Monthly cost after right-sizing to 70% CPU / 80% memory at optimized rates.
pub fn optimized_cost(vm: &VmRecord, defaults: &SizingDefaults) -> f64 {
    let cpu = (f64::from(defaults.cpu(vm)) * 0.7).ceil().max(1.0);
    let memory = (defaults.memory_gb(vm) * 0.8).ceil().max(1.0);
    cpu * 45.0 + memory * 9.0
}

pub fn migration_complexity(vm: &VmRecord, defaults: &SizingDefaults) -> MigrationComplexity {
    let os = os_lower(vm);
    let cpu = defaults.cpu(vm);
    let memory_gb = defaults.memory_gb(vm);

    if os.contains("windows") && os.contains("2003") {
        MigrationComplexity::Blockers
    } else if cpu > 16 || memory_gb > 64.0 {
        MigrationComplexity::Complex
    } else if os.contains("linux") && cpu <= 4 {
        MigrationComplexity::Simple
    } else {
        MigrationComplexity::Moderate
    }
}

fn readiness_score(vm: &VmRecord, defaults: &SizingDefaults) -> ReadinessScore {
    let os = os_lower(vm);
    ReadinessScore {
        overall: if os.contains("linux") { 85 } else { 75 },
        compute: if defaults.cpu(vm) <= 8 { 90 } else { 60 },
        storage: 80,
        network: 85,
        security: if os.contains("windows") { 70 } else { 85 },
        governance: 75,
    }
}

fn os_lower(vm: &VmRecord) -> String {
    vm.os.as_deref().unwrap_or_default().to_lowercase()
}

/// Compute the dashboard metrics over `records`.
///
/// Readiness scores are averaged over the number of records and rounded.
pub fn enterprise_metrics<'a, I>(records: I, defaults: &SizingDefaults) -> EnterpriseMetrics
where
    I: IntoIterator<Item = &'a VmRecord>,
{
    let mut metrics = EnterpriseMetrics::default();
    let mut score_sums = [0u64; 6];
    let mut count = 0u64;

    for vm in records {
        count += 1;

        let current = current_cost(vm, defaults);
        metrics.cost_optimization.current_spend += current;
        metrics.cost_optimization.projected_savings += current - optimized_cost(vm, defaults);

        metrics
            .migration_complexity
            .record(migration_complexity(vm, defaults));

        let score = readiness_score(vm, defaults);
        for (sum, value) in score_sums.iter_mut().zip([
            score.overall,
            score.compute,
            score.storage,
            score.network,
            score.security,
            score.governance,
        ]) {
            *sum += u64::from(value);
        }

        let os = os_lower(vm);
        if os.contains("2003") || os.contains("2008") {
            metrics
                .risk_analysis
                .security_risks
                .push(format!("{}: End-of-life OS detected", vm.name));
        }
        let cpu = defaults.cpu(vm);
        if cpu > 16 {
            metrics
                .risk_analysis
                .performance_risks
                .push(format!("{}: High CPU count may impact migration", vm.name));
        }

        metrics.sustainability.carbon_footprint +=
            f64::from(cpu) * 0.5 + defaults.memory_gb(vm) * 0.2;
        metrics.sustainability.energy_efficiency += if cpu <= 4 { 10.0 } else { 5.0 };
    }

    if count > 0 {
        let avg = |sum: u64| (sum as f64 / count as f64).round() as u32;
        metrics.readiness_score = ReadinessScore {
            overall: avg(score_sums[0]),
            compute: avg(score_sums[1]),
            storage: avg(score_sums[2]),
            network: avg(score_sums[3]),
            security: avg(score_sums[4]),
            governance: avg(score_sums[5]),
        };
    }

    metrics
}

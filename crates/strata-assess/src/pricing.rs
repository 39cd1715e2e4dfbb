use serde::{Deserialize, Serialize};

/// A pricing region and its closest datacenter on each cloud.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Region {
    pub value: &'static str,
    pub label: &'static str,
    pub aws: &'static str,
    pub azure: &'static str,
    pub gcp: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
}

impl Region {
    pub fn code_for(&self, provider: Provider) -> &'static str {
        match provider {
            Provider::Aws => self.aws,
            Provider::Azure => self.azure,
            Provider::Gcp => self.gcp,
        }
    }
}

const fn region(
    value: &'static str,
    label: &'static str,
    aws: &'static str,
    azure: &'static str,
    gcp: &'static str,
) -> Region {
    Region {
        value,
        label,
        aws,
        azure,
        gcp,
    }
}

pub const REGIONS: [Region; 13] = [
    region("us-east-1", "US East (N. Virginia)", "us-east-1", "eastus", "us-east1"),
    region("us-east-2", "US East (Ohio)", "us-east-2", "eastus2", "us-east4"),
    region("us-west-1", "US West (N. California)", "us-west-1", "westus", "us-west2"),
    region("us-west-2", "US West (Oregon)", "us-west-2", "westus2", "us-west1"),
    region("us-central", "US Central", "us-east-1", "centralus", "us-central1"),
    region("us-south", "US South", "us-east-1", "southcentralus", "us-central1"),
    region(
        "ca-central",
        "Canada Central",
        "ca-central-1",
        "canadacentral",
        "northamerica-northeast1",
    ),
    region("eu-west", "Europe West", "eu-west-1", "westeurope", "europe-west1"),
    region("eu-central", "Europe Central", "eu-central-1", "northeurope", "europe-west3"),
    region("eu-north", "Europe North", "eu-north-1", "northeurope", "europe-north1"),
    region(
        "ap-southeast",
        "Asia Pacific Southeast",
        "ap-southeast-1",
        "southeastasia",
        "asia-southeast1",
    ),
    region(
        "ap-northeast",
        "Asia Pacific Northeast",
        "ap-northeast-1",
        "japaneast",
        "asia-northeast1",
    ),
    region("ap-south", "Asia Pacific South", "ap-south-1", "centralindia", "asia-south1"),
];

pub fn region_by_value(value: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.value == value)
}

/// Human label for a provider-specific region code, or the code itself when unmapped.
///
/// Several regions share a provider code (e.g. `us-east-1` on AWS); the first entry wins.
pub fn region_label(provider: Provider, code: &str) -> &str {
    REGIONS
        .iter()
        .find(|r| r.code_for(provider) == code)
        .map(|r| r.label)
        .unwrap_or(code)
}

/// OS assumed when pricing target instances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingOs {
    #[default]
    Linux,
    Windows,
}

/// Optional pricing inputs forwarded to the analysis backend.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PricingOptions {
    pub region: Region,
    pub os: PricingOs,
}

impl PricingOptions {
    /// Options for the region with `value` (e.g. `eu-west`), if it exists.
    pub fn for_region(value: &str, os: PricingOs) -> Option<Self> {
        region_by_value(value).map(|region| Self {
            region: *region,
            os,
        })
    }
}

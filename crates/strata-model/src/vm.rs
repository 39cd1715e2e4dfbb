use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Export schema a workbook was recognized as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    RvTools,
    AzMigrate,
    Unknown,
}

impl FileType {
    pub const fn as_str(self) -> &'static str {
        match self {
            FileType::RvTools => "rvtools",
            FileType::AzMigrate => "azmigrate",
            FileType::Unknown => "unknown",
        }
    }

    /// The record source type produced by this schema, if it yields any records.
    pub const fn source_type(self) -> Option<SourceType> {
        match self {
            FileType::RvTools => Some(SourceType::RvTools),
            FileType::AzMigrate => Some(SourceType::AzMigrate),
            FileType::Unknown => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown file type `{0}` (expected: rvtools|azmigrate|unknown)")]
pub struct ParseFileTypeError(pub String);

impl FromStr for FileType {
    type Err = ParseFileTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rvtools" => Ok(FileType::RvTools),
            "azmigrate" => Ok(FileType::AzMigrate),
            "unknown" => Ok(FileType::Unknown),
            _ => Err(ParseFileTypeError(s.to_string())),
        }
    }
}

/// Schema a single [`VmRecord`] was normalized from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    RvTools,
    AzMigrate,
}

impl SourceType {
    pub const fn as_str(self) -> &'static str {
        match self {
            SourceType::RvTools => "rvtools",
            SourceType::AzMigrate => "azmigrate",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Power state RVTools reports for running machines.
pub const POWERED_ON: &str = "poweredOn";

/// One machine normalized from any supported export.
///
/// Every field is populated: `cpu` and `memory` default to `0` when the source row has
/// no usable value. `memory` is in megabytes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<String>,
    #[serde(default)]
    pub cpu: u32,
    #[serde(default)]
    pub memory: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_state: Option<String>,
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
}

impl VmRecord {
    /// A record with only the identity and source type set.
    pub fn new(name: impl Into<String>, source_type: SourceType) -> Self {
        Self {
            name: name.into(),
            host: None,
            datacenter: None,
            cpu: 0,
            memory: 0.0,
            os: None,
            power_state: None,
            source_type,
            sheet_name: None,
        }
    }

    /// Correlation key: the lower-cased name.
    pub fn identity_key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn is_powered_on(&self) -> bool {
        self.power_state.as_deref() == Some(POWERED_ON)
    }

    pub fn memory_gb(&self) -> f64 {
        self.memory / 1024.0
    }
}

//! Correlation, readiness assessment and session handling for parsed inventory
//! workbooks.
//!
//! Inputs are the [`strata_model::DataSource`]s produced from `strata-io` parses. Nothing
//! here does I/O except [`session::SnapshotStore`].

pub mod analyze;
pub mod correlate;
pub mod enterprise;
pub mod payload;
pub mod pricing;
pub mod recommend;
pub mod session;

pub use analyze::{
    analyze_records, analyze_source, analyze_union, classify_os, classify_tier, storage_gb,
};
pub use correlate::{
    correlate, correlated_metrics, filter_active, filter_by_codes, Anchor, CorrelatedMetrics,
    CorrelationIndex,
};
pub use enterprise::{enterprise_metrics, EnterpriseMetrics, SizingDefaults};
pub use payload::{analyze_url, AnalyzeRequest};
pub use pricing::{region_by_value, region_label, PricingOptions, PricingOs, Provider, REGIONS};
pub use recommend::generate_recommendations;
pub use session::{Page, Session, SessionError, SessionSnapshot, SnapshotStore};

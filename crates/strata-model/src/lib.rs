//! `strata-model` defines the data shared across the StrataRelay inventory pipeline:
//! - spreadsheet cells and header-keyed rows as read from RVTools / Azure Migrate exports
//! - the normalized [`VmRecord`] every schema is mapped onto
//! - per-workbook payloads ([`UniversalData`]) and session sources ([`DataSource`])
//! - the readiness [`Assessment`] and its recommendations
//!
//! Everything here is plain data with a stable camelCase JSON layout so it can cross the
//! backend boundary unchanged.

mod assessment;
mod source;
mod value;
mod vm;

pub use assessment::{
    Assessment, ComputeTotals, LicensingCounts, OsFamily, ReadinessCounts, Recommendation,
    Severity, StorageTotals, Tier,
};
pub use source::{DataSource, RawSheet, RawSheets, UniversalData};
pub use value::{CellValue, Row};
pub use vm::{FileType, ParseFileTypeError, SourceType, VmRecord, POWERED_ON};

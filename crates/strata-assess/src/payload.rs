//! Request body for the external `/analyze` backend.

use serde::Serialize;
use strata_model::{FileType, RawSheets, UniversalData};

use crate::pricing::PricingOptions;

pub const DEFAULT_CUSTOMER_ID: &str = "DEMO";
pub const DEFAULT_DOC_CODE: &str = "01";

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeData<'a> {
    pub file_type: FileType,
    pub raw_sheets: &'a RawSheets,
}

/// `POST {api_url}/analyze` body: the raw sheets plus routing identifiers.
#[derive(Clone, Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub data: AnalyzeData<'a>,
    pub customer_id: String,
    pub doc_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_options: Option<PricingOptions>,
}

impl<'a> AnalyzeRequest<'a> {
    pub fn new(
        data: &'a UniversalData,
        customer_id: impl Into<String>,
        doc_code: impl Into<String>,
    ) -> Self {
        Self {
            data: AnalyzeData {
                file_type: data.file_type,
                raw_sheets: &data.raw_sheets,
            },
            customer_id: customer_id.into(),
            doc_code: doc_code.into(),
            pricing_options: None,
        }
    }

    pub fn with_pricing(mut self, options: Option<PricingOptions>) -> Self {
        self.pricing_options = options;
        self
    }
}

/// URL of the analysis endpoint under `api_url`.
pub fn analyze_url(api_url: &str) -> String {
    format!("{}/analyze", api_url.trim_end_matches('/'))
}

use crate::{CollectionStatus, JobId, ProductLineId, SinceDateOption, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub fetching_product_lines: bool,
    pub load_error: Option<String>,
    pub panels: Vec<PanelView>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn panel(&self, product_line_id: &str) -> Option<&PanelView> {
        self.panels
            .iter()
            .find(|panel| panel.product_line_id == product_line_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub product_line_id: ProductLineId,
    pub title: String,
    pub is_expanded: bool,
    pub metadata: Vec<MetadataRow>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// Date-filtered, presentation-sorted rows.
    pub jobs: Vec<JobRowView>,
    pub since_date: Timestamp,
    pub since_dates: Vec<SinceDateOption>,
    /// State of the store collection for the same product line.
    pub collection: CollectionSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    pub label: &'static str,
    pub value: String,
}

impl MetadataRow {
    pub(crate) fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub name: Option<String>,
    pub status: Option<String>,
    pub created_on: Option<Timestamp>,
    pub loading: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionSummary {
    pub status: CollectionStatus,
    pub record_count: usize,
    pub loading_count: usize,
    pub since_date: Option<Timestamp>,
    pub error: Option<String>,
}

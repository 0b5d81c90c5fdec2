use crate::{JobRecord, ProductLine, ProductLineId, Timestamp};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchProductLines,
    /// Store path: listing that resolves to job identifiers only.
    FetchJobIds {
        product_line_id: ProductLineId,
        since_date: Timestamp,
    },
    /// Panel path: listing that resolves to full job records.
    FetchJobs {
        product_line_id: ProductLineId,
        since_date: Timestamp,
    },
    Notify(Notification),
}

/// Fire-and-forget notifications for the map and activity views.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    JobSelected(JobRecord),
    JobDeselected,
    JobHoverIn(JobRecord),
    JobHoverOut(JobRecord),
    PanTo(ProductLine),
}

use productline_core::{ErrorInfo, Job, JobId, ProductLine, ProductLineId, Timestamp};
use thiserror::Error;

/// Completion reports produced by engine tasks, in completion order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ProductLinesFetched(Result<Vec<ProductLine>, ErrorInfo>),
    JobIdsFetched {
        product_line_id: ProductLineId,
        since_date: Timestamp,
        result: Result<Vec<JobId>, ErrorInfo>,
    },
    JobsFetched {
        product_line_id: ProductLineId,
        since_date: Timestamp,
        result: Result<Vec<Job>, ErrorInfo>,
    },
    ImportStarted {
        product_line_id: ProductLineId,
        job_id: JobId,
    },
    ImportCompleted {
        product_line_id: ProductLineId,
        job_id: JobId,
        result: Result<Job, ErrorInfo>,
    },
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {status} from {url}")]
    HttpStatus { status: u16, url: String },
    #[error("request timed out")]
    Timeout(#[source] reqwest::Error),
    #[error("network error")]
    Network(#[source] reqwest::Error),
    #[error("could not decode response")]
    Decode(#[from] serde_json::Error),
    #[error("cancelled")]
    Cancelled,
}

impl ClientError {
    /// Normalized form stored in core state.
    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo::from_error(self)
    }
}
